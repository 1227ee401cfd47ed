//! Load run observation.
//!
//! The engine reports progress to an injected [`LoadObserver`]. The default
//! [`TracingObserver`] turns each event into a `tracing` event.

use std::path::Path;

use seedplan_registry::{Unit, UnitKey};

/// Origin of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
	/// Inferred from a belongs-to relationship.
	Implicit,
	/// Declared by a script.
	Explicit,
}

/// Receives engine progress events. Every hook defaults to a no-op.
pub trait LoadObserver {
	/// A location was discovered; `changed` units were created or replaced.
	fn discovered(&self, _location: &Path, _changed: usize) {}

	/// A load was requested; `depth` is the length of the resolution chain.
	fn requested(&self, _key: &UnitKey, _depth: usize) {}

	/// `from` requires `to` before it can be applied.
	fn dependency(&self, _from: &UnitKey, _to: &str, _kind: DependencyKind) {}

	/// A unit was applied. `rows` is `None` for scripts.
	fn loaded(&self, _unit: &Unit, _rows: Option<usize>) {}

	/// A load was requested for a unit that is already loaded.
	fn skipped(&self, _key: &UnitKey) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl LoadObserver for SilentObserver {}

/// Observer that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
	fn discovered(&self, location: &Path, changed: usize) {
		tracing::debug!(location = %location.display(), changed, "Discovered location");
	}

	fn requested(&self, key: &UnitKey, depth: usize) {
		tracing::debug!(key = %key, depth, "Request load");
	}

	fn dependency(&self, from: &UnitKey, to: &str, kind: DependencyKind) {
		tracing::debug!(from = %from, to, ?kind, "Depends");
	}

	fn loaded(&self, unit: &Unit, rows: Option<usize>) {
		tracing::info!(
			key = %unit.key,
			kind = %unit.kind,
			location = %unit.location.display(),
			rows,
			"Loaded unit"
		);
	}

	fn skipped(&self, key: &UnitKey) {
		tracing::trace!(key = %key, "Already loaded");
	}
}
