//! Script payloads.
//!
//! A script unit generates data programmatically. While it runs it can
//! declare further dependencies through a [`DependencyScope`]; it never sees
//! the engine itself.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use seedplan_registry::{LoadError, LoadResult, UnitKey};

/// Capability handed to a running script.
pub trait DependencyScope {
	/// Loads `key` before the script continues.
	///
	/// # Errors
	///
	/// Returns [`LoadError::UnsatisfiedDependency`] if `key` was never
	/// discovered, and any error raised while loading it.
	fn depends(&mut self, key: &str) -> LoadResult<()>;
}

/// The unit a script runs for.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
	/// Key of the script unit.
	pub key: &'a UnitKey,
	/// Location of the script payload.
	pub location: &'a Path,
}

/// Executes script units.
pub trait ScriptRunner {
	/// Runs the script described by `context`.
	fn run(&self, context: &ScriptContext<'_>, scope: &mut dyn DependencyScope) -> LoadResult<()>;
}

type ScriptFn = Box<dyn Fn(&ScriptContext<'_>, &mut dyn DependencyScope) -> LoadResult<()>>;

/// [`ScriptRunner`] backed by closures registered per unit key.
///
/// # Example
///
/// ```ignore
/// let mut scripts = ScriptRegistry::new();
/// scripts.register("zips", |_ctx, scope| {
///     scope.depends("states")?;
///     // generate zip codes for every state
///     Ok(())
/// });
/// ```
#[derive(Default)]
pub struct ScriptRegistry {
	scripts: HashMap<UnitKey, ScriptFn>,
}

impl ScriptRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the script for `key`, replacing any previous one.
	pub fn register<F>(&mut self, key: &str, script: F)
	where
		F: Fn(&ScriptContext<'_>, &mut dyn DependencyScope) -> LoadResult<()> + 'static,
	{
		self.scripts.insert(UnitKey::new(key), Box::new(script));
	}

	/// Builder form of [`ScriptRegistry::register`].
	pub fn with_script<F>(mut self, key: &str, script: F) -> Self
	where
		F: Fn(&ScriptContext<'_>, &mut dyn DependencyScope) -> LoadResult<()> + 'static,
	{
		self.register(key, script);
		self
	}

	/// Returns true if a script is registered for `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.scripts.contains_key(&UnitKey::new(key))
	}

	/// Returns the number of registered scripts.
	pub fn len(&self) -> usize {
		self.scripts.len()
	}

	/// Returns true if no scripts are registered.
	pub fn is_empty(&self) -> bool {
		self.scripts.is_empty()
	}
}

impl ScriptRunner for ScriptRegistry {
	fn run(&self, context: &ScriptContext<'_>, scope: &mut dyn DependencyScope) -> LoadResult<()> {
		let script = self.scripts.get(context.key).ok_or_else(|| {
			LoadError::import_failure(
				context.key.as_str(),
				format!("no script registered for {}", context.location.display()),
			)
		})?;
		script(context, scope)
	}
}

impl fmt::Debug for ScriptRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<&str> = self.scripts.keys().map(UnitKey::as_str).collect();
		keys.sort_unstable();
		f.debug_struct("ScriptRegistry").field("scripts", &keys).finish()
	}
}
