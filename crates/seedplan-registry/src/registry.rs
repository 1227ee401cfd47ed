//! Unit registry for a single load run.
//!
//! The registry maps unit keys to units. Insertion order is preserved and is
//! the default load order of a run.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{LoadError, LoadResult};
use crate::unit::{LoadState, Unit, UnitKey};

/// Base name of the manifest control file, never treated as a unit.
pub const MANIFEST_STEM: &str = "datasets";

/// Lists the entries of a location.
///
/// Implementations return every candidate file; filtering by kind happens in
/// the registry.
pub trait DirectoryLister {
	/// Lists files at `location`.
	///
	/// # Errors
	///
	/// Returns an error if the location does not exist or cannot be read.
	fn list(&self, location: &Path) -> std::io::Result<Vec<PathBuf>>;
}

/// Filesystem-backed [`DirectoryLister`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
	fn list(&self, location: &Path) -> std::io::Result<Vec<PathBuf>> {
		let mut paths = Vec::new();
		for entry in std::fs::read_dir(location)? {
			let path = entry?.path();
			if path.is_file() {
				paths.push(path);
			}
		}
		Ok(paths)
	}
}

/// How a unit discovered in a later location treats an already registered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowPolicy {
	/// The later unit replaces location and kind; the key keeps its position.
	#[default]
	Overlay,
	/// The first registration is kept and later units are ignored.
	FirstWins,
}

/// Registry of units discovered for one run.
pub struct UnitRegistry {
	units: IndexMap<UnitKey, Unit>,
	policy: ShadowPolicy,
	lister: Box<dyn DirectoryLister>,
}

impl UnitRegistry {
	/// Creates an empty registry reading from the filesystem.
	pub fn new() -> Self {
		Self {
			units: IndexMap::new(),
			policy: ShadowPolicy::default(),
			lister: Box::new(FsLister),
		}
	}

	/// Sets the shadowing policy for keys discovered more than once.
	pub fn with_policy(mut self, policy: ShadowPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Replaces the directory lister.
	pub fn with_lister<L: DirectoryLister + 'static>(mut self, lister: L) -> Self {
		self.lister = Box::new(lister);
		self
	}

	/// Returns the shadowing policy.
	pub fn policy(&self) -> ShadowPolicy {
		self.policy
	}

	/// Discovers the units at `location` and merges them into the registry.
	///
	/// Files with unrecognized extensions and the manifest control file are
	/// skipped. Candidates are ordered by kind precedence, so when a key has
	/// several files in one location the earliest-precedence one is used.
	///
	/// Returns the number of units created or replaced.
	///
	/// # Errors
	///
	/// Returns [`LoadError::LocationNotFound`] if the location cannot be listed.
	pub fn discover(&mut self, location: &Path) -> LoadResult<usize> {
		let entries = self
			.lister
			.list(location)
			.map_err(|source| LoadError::LocationNotFound {
				location: location.to_path_buf(),
				source,
			})?;

		let mut candidates: Vec<Unit> = entries
			.iter()
			.filter_map(|path| Unit::from_path(path))
			.filter(|unit| unit.key.as_str() != MANIFEST_STEM)
			.collect();
		candidates.sort_by(|a, b| {
			a.kind
				.precedence()
				.cmp(&b.kind.precedence())
				.then_with(|| a.location.cmp(&b.location))
		});

		let mut seen = HashSet::new();
		let mut changed = 0;
		for unit in candidates {
			if !seen.insert(unit.key.clone()) {
				tracing::trace!(
					key = %unit.key,
					location = %unit.location.display(),
					"Skipping lower-precedence payload"
				);
				continue;
			}
			if self.insert(unit) {
				changed += 1;
			}
		}

		tracing::debug!(
			location = %location.display(),
			changed,
			total = self.units.len(),
			"Discovered units"
		);
		Ok(changed)
	}

	/// Registers a unit, applying the shadowing policy when the key exists.
	///
	/// Returns true when the registry changed. A unit that has already left the
	/// `Untouched` state is never replaced.
	pub fn insert(&mut self, unit: Unit) -> bool {
		let Some(existing) = self.units.get_mut(&unit.key) else {
			self.units.insert(unit.key.clone(), unit);
			return true;
		};

		match self.policy {
			ShadowPolicy::FirstWins => false,
			ShadowPolicy::Overlay if existing.state != LoadState::Untouched => {
				tracing::warn!(
					key = %unit.key,
					state = %existing.state,
					"Ignoring overlay for a unit that is already in progress"
				);
				false
			}
			ShadowPolicy::Overlay => {
				tracing::debug!(
					key = %unit.key,
					from = %existing.location.display(),
					to = %unit.location.display(),
					"Overlaying unit"
				);
				existing.location = unit.location;
				existing.kind = unit.kind;
				true
			}
		}
	}

	/// Gets a unit by key.
	pub fn get(&self, key: &str) -> Option<&Unit> {
		self.units.get(key)
	}

	/// Gets a mutable unit by key.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Unit> {
		self.units.get_mut(key)
	}

	/// Returns true if the key is registered.
	pub fn contains(&self, key: &str) -> bool {
		self.units.contains_key(key)
	}

	/// Returns the state of a unit, if registered.
	pub fn state(&self, key: &str) -> Option<LoadState> {
		self.units.get(key).map(|unit| unit.state)
	}

	/// Sets the state of a unit and returns the previous one.
	pub fn set_state(&mut self, key: &str, state: LoadState) -> Option<LoadState> {
		self.units
			.get_mut(key)
			.map(|unit| std::mem::replace(&mut unit.state, state))
	}

	/// Registered keys in discovery order.
	pub fn keys(&self) -> impl Iterator<Item = &UnitKey> {
		self.units.keys()
	}

	/// Registered units in discovery order.
	pub fn iter(&self) -> impl Iterator<Item = &Unit> {
		self.units.values()
	}

	/// Returns the number of registered units.
	pub fn len(&self) -> usize {
		self.units.len()
	}

	/// Returns true if no units are registered.
	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	/// Returns true if every registered unit is loaded.
	pub fn all_loaded(&self) -> bool {
		self.units.values().all(Unit::is_loaded)
	}
}

impl Default for UnitRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for UnitRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UnitRegistry")
			.field("units", &self.units)
			.field("policy", &self.policy)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::unit::UnitKind;
	use rstest::rstest;
	use std::fs;
	use tempfile::TempDir;

	fn dataset(files: &[&str]) -> TempDir {
		let dir = TempDir::new().unwrap();
		for name in files {
			fs::write(dir.path().join(name), "").unwrap();
		}
		dir
	}

	struct FixedLister(Vec<&'static str>);

	impl DirectoryLister for FixedLister {
		fn list(&self, location: &Path) -> std::io::Result<Vec<PathBuf>> {
			Ok(self.0.iter().map(|name| location.join(name)).collect())
		}
	}

	#[rstest]
	fn test_discover_filters_unknown_and_control_files() {
		let dir = dataset(&["users.yml", "datasets.yml", "notes.txt", "README"]);
		let mut registry = UnitRegistry::new();

		let changed = registry.discover(dir.path()).unwrap();

		assert_eq!(changed, 1);
		assert_eq!(registry.len(), 1);
		assert!(registry.contains("users"));
		assert!(!registry.contains("datasets"));
	}

	#[rstest]
	fn test_discover_orders_by_precedence() {
		let registry = {
			let mut registry = UnitRegistry::new().with_lister(FixedLister(vec![
				"c.seed", "b.csv", "a.yml", "d.json",
			]));
			registry.discover(Path::new("base")).unwrap();
			registry
		};

		let keys: Vec<&str> = registry.keys().map(UnitKey::as_str).collect();
		assert_eq!(keys, vec!["a", "d", "b", "c"]);
	}

	#[rstest]
	fn test_earliest_precedence_wins_within_location() {
		let dir = dataset(&["a.yml", "b.csv", "b.seed"]);
		let mut registry = UnitRegistry::new();

		registry.discover(dir.path()).unwrap();

		let unit = registry.get("b").unwrap();
		assert_eq!(unit.kind, UnitKind::Csv);
		assert_eq!(unit.location, dir.path().join("b.csv"));
		assert_eq!(registry.len(), 2);
	}

	#[rstest]
	fn test_overlay_replaces_location_and_keeps_position() {
		let base = dataset(&["one.yml", "two.yml"]);
		let overlay = dataset(&["one.seed"]);
		let mut registry = UnitRegistry::new();

		registry.discover(base.path()).unwrap();
		let changed = registry.discover(overlay.path()).unwrap();

		assert_eq!(changed, 1);
		let keys: Vec<&str> = registry.keys().map(UnitKey::as_str).collect();
		assert_eq!(keys, vec!["one", "two"]);
		let unit = registry.get("one").unwrap();
		assert_eq!(unit.kind, UnitKind::Script);
		assert_eq!(unit.location, overlay.path().join("one.seed"));
	}

	#[rstest]
	fn test_first_wins_ignores_later_locations() {
		let base = dataset(&["one.yml"]);
		let overlay = dataset(&["one.csv", "three.csv"]);
		let mut registry = UnitRegistry::new().with_policy(ShadowPolicy::FirstWins);

		registry.discover(base.path()).unwrap();
		let changed = registry.discover(overlay.path()).unwrap();

		assert_eq!(changed, 1);
		let unit = registry.get("one").unwrap();
		assert_eq!(unit.kind, UnitKind::Yaml);
		assert_eq!(unit.location, base.path().join("one.yml"));
		assert!(registry.contains("three"));
	}

	#[rstest]
	fn test_overlay_skips_units_in_progress() {
		let mut registry = UnitRegistry::new();
		registry.insert(Unit::new("one", "base/one.yml", UnitKind::Yaml));
		registry.set_state("one", LoadState::Requested);

		let changed = registry.insert(Unit::new("one", "overlay/one.csv", UnitKind::Csv));

		assert!(!changed);
		assert_eq!(registry.get("one").unwrap().kind, UnitKind::Yaml);
	}

	#[rstest]
	fn test_discover_missing_location() {
		let mut registry = UnitRegistry::new();
		let result = registry.discover(Path::new("/nonexistent/seedplan/base"));
		assert!(matches!(result, Err(LoadError::LocationNotFound { .. })));
	}

	#[rstest]
	fn test_state_bookkeeping() {
		let mut registry = UnitRegistry::new();
		registry.insert(Unit::new("one", "base/one.yml", UnitKind::Yaml));

		assert_eq!(registry.state("one"), Some(LoadState::Untouched));
		assert_eq!(
			registry.set_state("one", LoadState::Loaded),
			Some(LoadState::Untouched)
		);
		assert!(registry.all_loaded());
		assert_eq!(registry.set_state("missing", LoadState::Loaded), None);
	}
}
