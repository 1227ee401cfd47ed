//! Dependency-aware load engine.
//!
//! The engine owns the registry of one run. Loading a unit first loads the
//! units its model belongs to, then applies the unit's payload. Resolution is
//! strictly sequential: the recursion of [`LoadEngine::request_load`] is the
//! scheduler, and a unit in the `Requested` state is an ancestor on the
//! current call chain. Requesting it again is a cycle.
//!
//! # Example
//!
//! ```ignore
//! use seedplan_engine::prelude::*;
//!
//! let graph = ModelGraph::new()
//!     .model("User", "users")
//!     .model("Post", "posts")
//!     .with_belongs_to("Post", "author", "User");
//!
//! let mut engine = LoadEngine::builder(StoreImporter::new(MemoryStore::new()))
//!     .relations(graph)
//!     .build();
//! let report = engine.run(&Manifest::load(Path::new("db"), "blog/test")?)?;
//! assert_eq!(report.order(), vec!["users", "posts"]);
//! ```

use std::fmt;
use std::path::Path;

use seedplan_registry::{
	DirectoryLister, LoadError, LoadResult, LoadState, Manifest, ShadowPolicy, Unit, UnitKey,
	UnitKind, UnitRegistry,
};

use crate::importer::FixtureImporter;
use crate::observer::{DependencyKind, LoadObserver, TracingObserver};
use crate::relations::{NoRelations, RelationshipLookup};
use crate::script::{DependencyScope, ScriptContext, ScriptRunner};

/// A unit applied during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedUnit {
	/// Key of the unit.
	pub key: UnitKey,
	/// Kind the unit was applied as.
	pub kind: UnitKind,
	/// Rows imported, `None` for scripts.
	pub rows: Option<usize>,
}

/// The realized load plan of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
	units: Vec<LoadedUnit>,
}

impl LoadReport {
	/// Keys in the order they finished loading.
	pub fn order(&self) -> Vec<&str> {
		self.units.iter().map(|unit| unit.key.as_str()).collect()
	}

	/// Position of `key` in the load order.
	pub fn position(&self, key: &str) -> Option<usize> {
		self.units.iter().position(|unit| unit.key.as_str() == key)
	}

	/// Total number of fixture rows imported.
	pub fn rows_imported(&self) -> usize {
		self.units.iter().filter_map(|unit| unit.rows).sum()
	}

	/// Returns the number of loaded units.
	pub fn len(&self) -> usize {
		self.units.len()
	}

	/// Returns true if nothing was loaded.
	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	/// Returns an iterator over the loaded units.
	pub fn iter(&self) -> impl Iterator<Item = &LoadedUnit> {
		self.units.iter()
	}
}

struct Collaborators {
	relations: Box<dyn RelationshipLookup>,
	importer: Box<dyn FixtureImporter>,
	scripts: Option<Box<dyn ScriptRunner>>,
	observer: Box<dyn LoadObserver>,
}

/// Mutable part of a run, split from the collaborators so that a running
/// script can borrow it while the engine still holds the script runner.
struct RunState {
	registry: UnitRegistry,
	chain: Vec<UnitKey>,
	report: LoadReport,
}

impl RunState {
	fn request_load(&mut self, env: &Collaborators, key: &str) -> LoadResult<()> {
		let key = UnitKey::new(key);
		let mut unit = self
			.registry
			.get(key.as_str())
			.cloned()
			.ok_or_else(|| LoadError::UnknownDependency(key.to_string()))?;

		match unit.state {
			LoadState::Loaded => {
				env.observer.skipped(&unit.key);
				return Ok(());
			}
			LoadState::Requested if !self.chain.contains(&unit.key) => {
				return Err(LoadError::IncompleteUnit(unit.key.to_string()));
			}
			LoadState::Requested => {
				let mut chain: Vec<String> = self.chain.iter().map(ToString::to_string).collect();
				chain.push(unit.key.to_string());
				return Err(LoadError::CircularDependency {
					key: unit.key.to_string(),
					chain,
				});
			}
			LoadState::Untouched => {}
		}

		self.registry.set_state(unit.key.as_str(), LoadState::Requested);
		self.chain.push(unit.key.clone());
		env.observer.requested(&unit.key, self.chain.len());

		let result = self
			.load_model_dependencies(env, &unit.key)
			.and_then(|()| self.apply(env, &unit));
		self.chain.pop();
		let rows = result?;

		self.registry.set_state(unit.key.as_str(), LoadState::Loaded);
		unit.state = LoadState::Loaded;
		env.observer.loaded(&unit, rows);
		self.report.units.push(LoadedUnit {
			key: unit.key,
			kind: unit.kind,
			rows,
		});
		Ok(())
	}

	/// Loads the units backing every model the unit's model belongs to.
	fn load_model_dependencies(&mut self, env: &Collaborators, key: &UnitKey) -> LoadResult<()> {
		let Some(model) = env.relations.model_for(key.as_str()) else {
			return Ok(());
		};

		for relation in env.relations.belongs_to(&model) {
			// Self-referential rows are resolved inside a single load.
			if relation.target == model {
				continue;
			}
			let Some(storage_key) = env.relations.storage_key_for(&relation.target) else {
				tracing::trace!(
					model = %model,
					target = %relation.target,
					"Related model has no storage key"
				);
				continue;
			};
			env.observer.dependency(key, &storage_key, DependencyKind::Implicit);
			self.request_load(env, &storage_key)?;
		}
		Ok(())
	}

	fn apply(&mut self, env: &Collaborators, unit: &Unit) -> LoadResult<Option<usize>> {
		match unit.kind {
			UnitKind::Yaml | UnitKind::Json | UnitKind::Csv => {
				if !env.importer.supports(unit.kind) {
					return Err(LoadError::UnsupportedKind {
						kind: unit.kind,
						location: unit.location.clone(),
					});
				}
				let key = unit.key.as_str();
				let into_failure = |err: LoadError| match err {
					err @ LoadError::ImportFailure { .. } => err,
					other => LoadError::import_failure(key, other),
				};
				env.importer.purge(key).map_err(into_failure)?;
				let rows = env
					.importer
					.import(key, &unit.location, unit.kind)
					.map_err(into_failure)?;
				Ok(Some(rows))
			}
			UnitKind::Script => {
				let Some(runner) = env.scripts.as_deref() else {
					return Err(LoadError::UnsupportedKind {
						kind: unit.kind,
						location: unit.location.clone(),
					});
				};
				let context = ScriptContext {
					key: &unit.key,
					location: &unit.location,
				};
				let mut scope = ScriptScope {
					state: self,
					env,
					requester: &unit.key,
				};
				runner.run(&context, &mut scope)?;
				Ok(None)
			}
		}
	}
}

/// The only view of the engine a running script gets.
struct ScriptScope<'a> {
	state: &'a mut RunState,
	env: &'a Collaborators,
	requester: &'a UnitKey,
}

impl DependencyScope for ScriptScope<'_> {
	fn depends(&mut self, key: &str) -> LoadResult<()> {
		let target = UnitKey::new(key);
		if !self.state.registry.contains(target.as_str()) {
			return Err(LoadError::UnsatisfiedDependency {
				key: target.to_string(),
				requested_by: self.requester.to_string(),
			});
		}
		self.env
			.observer
			.dependency(self.requester, target.as_str(), DependencyKind::Explicit);
		self.state.request_load(self.env, target.as_str())
	}
}

/// Builder for [`LoadEngine`].
pub struct LoadEngineBuilder {
	registry: UnitRegistry,
	relations: Box<dyn RelationshipLookup>,
	importer: Box<dyn FixtureImporter>,
	scripts: Option<Box<dyn ScriptRunner>>,
	observer: Box<dyn LoadObserver>,
}

impl LoadEngineBuilder {
	fn new(importer: Box<dyn FixtureImporter>) -> Self {
		Self {
			registry: UnitRegistry::new(),
			relations: Box::new(NoRelations),
			importer,
			scripts: None,
			observer: Box::new(TracingObserver),
		}
	}

	/// Sets how later locations treat keys that are already registered.
	pub fn policy(mut self, policy: ShadowPolicy) -> Self {
		self.registry = self.registry.with_policy(policy);
		self
	}

	/// Replaces the directory lister used for discovery.
	pub fn lister<L: DirectoryLister + 'static>(mut self, lister: L) -> Self {
		self.registry = self.registry.with_lister(lister);
		self
	}

	/// Sets the relationship lookup used for implicit dependencies.
	pub fn relations<R: RelationshipLookup + 'static>(mut self, relations: R) -> Self {
		self.relations = Box::new(relations);
		self
	}

	/// Installs a script runner. Without one, script units are unsupported.
	pub fn scripts<S: ScriptRunner + 'static>(mut self, scripts: S) -> Self {
		self.scripts = Some(Box::new(scripts));
		self
	}

	/// Replaces the observer.
	pub fn observer<O: LoadObserver + 'static>(mut self, observer: O) -> Self {
		self.observer = Box::new(observer);
		self
	}

	/// Builds the engine.
	pub fn build(self) -> LoadEngine {
		LoadEngine {
			state: RunState {
				registry: self.registry,
				chain: Vec::new(),
				report: LoadReport::default(),
			},
			env: Collaborators {
				relations: self.relations,
				importer: self.importer,
				scripts: self.scripts,
				observer: self.observer,
			},
		}
	}
}

impl fmt::Debug for LoadEngineBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadEngineBuilder")
			.field("registry", &self.registry)
			.field("scripts", &self.scripts.is_some())
			.finish_non_exhaustive()
	}
}

/// Resolves and executes the load plan of one run.
pub struct LoadEngine {
	state: RunState,
	env: Collaborators,
}

impl LoadEngine {
	/// Starts building an engine that applies fixtures with `importer`.
	pub fn builder<I: FixtureImporter + 'static>(importer: I) -> LoadEngineBuilder {
		LoadEngineBuilder::new(Box::new(importer))
	}

	/// Returns the registry of this run.
	pub fn registry(&self) -> &UnitRegistry {
		&self.state.registry
	}

	/// Returns the registry for manual registration.
	pub fn registry_mut(&mut self) -> &mut UnitRegistry {
		&mut self.state.registry
	}

	/// Returns the state of a unit, if registered.
	pub fn state(&self, key: &str) -> Option<LoadState> {
		self.state.registry.state(UnitKey::new(key).as_str())
	}

	/// Returns the load plan realized so far.
	pub fn report(&self) -> &LoadReport {
		&self.state.report
	}

	/// Discovers the units at `location` into the registry.
	///
	/// # Errors
	///
	/// Returns [`LoadError::LocationNotFound`] if the location cannot be listed.
	pub fn discover(&mut self, location: &Path) -> LoadResult<usize> {
		let changed = self.state.registry.discover(location)?;
		self.env.observer.discovered(location, changed);
		Ok(changed)
	}

	/// Loads `key` after its dependencies. Loading a loaded unit is a no-op.
	///
	/// # Errors
	///
	/// - [`LoadError::UnknownDependency`] if `key` or a related storage key was never discovered
	/// - [`LoadError::CircularDependency`] if `key` is already being resolved
	/// - [`LoadError::IncompleteUnit`] if an earlier load of `key` failed
	/// - [`LoadError::UnsupportedKind`] or [`LoadError::ImportFailure`] from applying a payload
	pub fn request_load(&mut self, key: &str) -> LoadResult<()> {
		self.state.request_load(&self.env, key)
	}

	/// Requests every registered unit, in registry order.
	pub fn load_all(&mut self) -> LoadResult<()> {
		let keys: Vec<UnitKey> = self.state.registry.keys().cloned().collect();
		for key in keys {
			self.request_load(key.as_str())?;
		}
		Ok(())
	}

	/// Runs a manifest: discovers every location, target last, then loads
	/// every unit.
	///
	/// The first error aborts the run. Units applied before it stay applied.
	pub fn run(&mut self, manifest: &Manifest) -> LoadResult<LoadReport> {
		for location in manifest.discovery_order() {
			self.discover(location)?;
		}
		self.load_all()?;

		tracing::info!(
			units = self.state.report.len(),
			rows = self.state.report.rows_imported(),
			"Load plan complete"
		);
		Ok(self.state.report.clone())
	}
}

impl fmt::Debug for LoadEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadEngine")
			.field("registry", &self.state.registry)
			.field("chain", &self.state.chain)
			.field("report", &self.state.report)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::relations::ModelGraph;
	use crate::script::ScriptRegistry;
	use parking_lot::Mutex;
	use rstest::rstest;
	use std::path::PathBuf;
	use std::sync::Arc;

	#[derive(Debug, Clone, Default)]
	struct Journal(Arc<Mutex<Vec<String>>>);

	impl Journal {
		fn push(&self, entry: impl Into<String>) {
			self.0.lock().push(entry.into());
		}

		fn entries(&self) -> Vec<String> {
			self.0.lock().clone()
		}

		fn count(&self, entry: &str) -> usize {
			self.0.lock().iter().filter(|e| e.as_str() == entry).count()
		}
	}

	struct JournalImporter {
		journal: Journal,
		failing: Option<&'static str>,
		unsupported: Option<UnitKind>,
	}

	impl JournalImporter {
		fn new(journal: &Journal) -> Self {
			Self {
				journal: journal.clone(),
				failing: None,
				unsupported: None,
			}
		}
	}

	impl FixtureImporter for JournalImporter {
		fn supports(&self, kind: UnitKind) -> bool {
			kind.is_fixture() && Some(kind) != self.unsupported
		}

		fn purge(&self, key: &str) -> LoadResult<()> {
			self.journal.push(format!("purge:{}", key));
			Ok(())
		}

		fn import(&self, key: &str, _location: &Path, _kind: UnitKind) -> LoadResult<usize> {
			if self.failing == Some(key) {
				return Err(LoadError::InvalidFixture {
					origin: key.to_string(),
					message: "duplicate label".to_string(),
				});
			}
			self.journal.push(format!("import:{}", key));
			Ok(1)
		}
	}

	struct FixedLister(Vec<&'static str>);

	impl DirectoryLister for FixedLister {
		fn list(&self, location: &Path) -> std::io::Result<Vec<PathBuf>> {
			if location == Path::new("missing") {
				return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
			}
			Ok(self.0.iter().map(|name| location.join(name)).collect())
		}
	}

	fn engine(files: Vec<&'static str>, graph: ModelGraph, journal: &Journal) -> LoadEngine {
		let mut engine = LoadEngine::builder(JournalImporter::new(journal))
			.lister(FixedLister(files))
			.relations(graph)
			.build();
		engine.discover(Path::new("base")).unwrap();
		engine
	}

	fn imports(journal: &Journal) -> Vec<String> {
		journal
			.entries()
			.into_iter()
			.filter(|entry| !entry.starts_with("purge:"))
			.collect()
	}

	#[rstest]
	fn test_single_unit_loads() {
		let journal = Journal::default();
		let mut engine = engine(vec!["one.yml"], ModelGraph::new(), &journal);

		engine.load_all().unwrap();

		assert_eq!(engine.state("one"), Some(LoadState::Loaded));
		assert_eq!(journal.entries(), vec!["purge:one", "import:one"]);
		assert_eq!(engine.report().order(), vec!["one"]);
		assert_eq!(engine.report().rows_imported(), 1);
	}

	#[rstest]
	fn test_belongs_to_loads_prerequisite_first() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("User", "users")
			.model("Comment", "comments")
			.with_belongs_to("Comment", "author", "User");
		let mut engine = engine(vec!["users.yml", "comments.yml"], graph, &journal);
		let discovered: Vec<&str> = engine.registry().keys().map(UnitKey::as_str).collect();
		assert_eq!(discovered, vec!["comments", "users"]);

		engine.load_all().unwrap();

		assert_eq!(imports(&journal), vec!["import:users", "import:comments"]);
		assert_eq!(engine.report().order(), vec!["users", "comments"]);
		assert!(engine.registry().all_loaded());
	}

	#[rstest]
	fn test_request_load_is_idempotent() {
		let journal = Journal::default();
		let mut engine = engine(vec!["one.yml"], ModelGraph::new(), &journal);

		engine.request_load("one").unwrap();
		engine.request_load("one").unwrap();
		engine.request_load("ONE").unwrap();

		assert_eq!(journal.count("purge:one"), 1);
		assert_eq!(journal.count("import:one"), 1);
		assert_eq!(engine.report().len(), 1);
	}

	#[rstest]
	fn test_self_reference_is_not_a_dependency() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("Three", "three")
			.with_belongs_to("Three", "parent", "Three");
		let mut engine = engine(vec!["three.yml"], graph, &journal);

		engine.load_all().unwrap();

		assert_eq!(engine.state("three"), Some(LoadState::Loaded));
	}

	#[rstest]
	fn test_mutual_dependency_is_circular() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("A", "a")
			.model("B", "b")
			.with_belongs_to("A", "b", "B")
			.with_belongs_to("B", "a", "A");
		let mut engine = engine(vec!["a.yml", "b.yml"], graph, &journal);

		let result = engine.load_all();

		match result {
			Err(LoadError::CircularDependency { key, chain }) => {
				assert_eq!(key, "a");
				assert_eq!(chain, vec!["a", "b", "a"]);
			}
			other => panic!("Expected CircularDependency, got {:?}", other),
		}
		assert_ne!(engine.state("a"), Some(LoadState::Loaded));
		assert_ne!(engine.state("b"), Some(LoadState::Loaded));
		assert!(imports(&journal).is_empty());
	}

	#[rstest]
	fn test_unknown_key() {
		let journal = Journal::default();
		let mut engine = engine(vec!["one.yml"], ModelGraph::new(), &journal);

		let result = engine.request_load("missing");

		assert!(matches!(result, Err(LoadError::UnknownDependency(ref key)) if key == "missing"));
	}

	#[rstest]
	fn test_related_model_without_unit_is_unknown_dependency() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("User", "users")
			.model("Post", "posts")
			.with_belongs_to("Post", "author", "User");
		let mut engine = engine(vec!["posts.yml"], graph, &journal);

		let result = engine.load_all();

		assert!(matches!(result, Err(LoadError::UnknownDependency(ref key)) if key == "users"));
		assert_eq!(engine.state("posts"), Some(LoadState::Requested));
	}

	#[rstest]
	fn test_mixed_case_tables_resolve_dependencies() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("User", "Users")
			.model("Post", "Posts")
			.with_belongs_to("Post", "author", "User");
		let mut engine = engine(vec!["Users.yml", "Posts.yml"], graph, &journal);

		engine.load_all().unwrap();

		assert_eq!(engine.report().order(), vec!["users", "posts"]);
	}

	#[rstest]
	fn test_related_model_without_table_is_ignored() {
		let journal = Journal::default();
		let graph = ModelGraph::new()
			.model("Post", "posts")
			.with_belongs_to("Post", "author", "User");
		let mut engine = engine(vec!["posts.yml"], graph, &journal);

		engine.load_all().unwrap();

		assert_eq!(engine.state("posts"), Some(LoadState::Loaded));
	}

	#[rstest]
	fn test_script_dependency_loads_before_script_continues() {
		let journal = Journal::default();
		let script_journal = journal.clone();
		let scripts = ScriptRegistry::new().with_script("c", move |_ctx, scope| {
			script_journal.push("script:c:start");
			scope.depends("d")?;
			script_journal.push("script:c:end");
			Ok(())
		});
		let mut engine = LoadEngine::builder(JournalImporter::new(&journal))
			.lister(FixedLister(vec!["c.seed", "d.yml"]))
			.scripts(scripts)
			.build();
		engine.discover(Path::new("base")).unwrap();

		// Scripts sort after fixtures, so request `c` directly.
		engine.request_load("c").unwrap();

		assert_eq!(
			imports(&journal),
			vec!["script:c:start", "import:d", "script:c:end"]
		);
		assert_eq!(engine.report().order(), vec!["d", "c"]);
		assert_eq!(engine.report().iter().last().unwrap().rows, None);
	}

	#[rstest]
	fn test_script_unsatisfied_dependency_leaves_requester_requested() {
		let journal = Journal::default();
		let scripts =
			ScriptRegistry::new().with_script("c", |_ctx, scope| scope.depends("missing"));
		let mut engine = LoadEngine::builder(JournalImporter::new(&journal))
			.lister(FixedLister(vec!["c.seed"]))
			.scripts(scripts)
			.build();
		engine.discover(Path::new("base")).unwrap();

		let result = engine.load_all();

		match result {
			Err(LoadError::UnsatisfiedDependency { key, requested_by }) => {
				assert_eq!(key, "missing");
				assert_eq!(requested_by, "c");
			}
			other => panic!("Expected UnsatisfiedDependency, got {:?}", other),
		}
		assert_eq!(engine.state("c"), Some(LoadState::Requested));
	}

	#[rstest]
	fn test_failed_unit_is_not_reported_as_cycle() {
		let journal = Journal::default();
		let mut importer = JournalImporter::new(&journal);
		importer.failing = Some("bad");
		let scripts = ScriptRegistry::new().with_script("c", |_ctx, scope| {
			let _ = scope.depends("bad");
			Ok(())
		});
		let mut engine = LoadEngine::builder(importer)
			.lister(FixedLister(vec!["bad.yml", "c.seed"]))
			.scripts(scripts)
			.build();
		engine.discover(Path::new("base")).unwrap();

		engine.request_load("c").unwrap();
		let result = engine.request_load("bad");

		assert!(matches!(result, Err(LoadError::IncompleteUnit(ref key)) if key == "bad"));
		assert_eq!(engine.state("c"), Some(LoadState::Loaded));
	}

	#[rstest]
	fn test_script_depending_on_itself_is_circular() {
		let journal = Journal::default();
		let scripts = ScriptRegistry::new().with_script("c", |_ctx, scope| scope.depends("c"));
		let mut engine = LoadEngine::builder(JournalImporter::new(&journal))
			.lister(FixedLister(vec!["c.seed"]))
			.scripts(scripts)
			.build();
		engine.discover(Path::new("base")).unwrap();

		let result = engine.load_all();

		assert!(matches!(result, Err(LoadError::CircularDependency { ref key, .. }) if key == "c"));
	}

	#[rstest]
	fn test_script_without_runner_is_unsupported() {
		let journal = Journal::default();
		let mut engine = engine(vec!["c.seed"], ModelGraph::new(), &journal);

		let result = engine.load_all();

		match result {
			Err(LoadError::UnsupportedKind { kind, location }) => {
				assert_eq!(kind, UnitKind::Script);
				assert_eq!(location, PathBuf::from("base/c.seed"));
			}
			other => panic!("Expected UnsupportedKind, got {:?}", other),
		}
	}

	#[rstest]
	fn test_kind_rejected_by_importer_is_unsupported() {
		let journal = Journal::default();
		let mut importer = JournalImporter::new(&journal);
		importer.unsupported = Some(UnitKind::Csv);
		let mut engine = LoadEngine::builder(importer)
			.lister(FixedLister(vec!["zips.csv"]))
			.build();
		engine.discover(Path::new("base")).unwrap();

		let result = engine.load_all();

		assert!(matches!(
			result,
			Err(LoadError::UnsupportedKind { kind: UnitKind::Csv, .. })
		));
		assert!(journal.entries().is_empty());
	}

	#[rstest]
	fn test_importer_errors_become_import_failures() {
		let journal = Journal::default();
		let mut importer = JournalImporter::new(&journal);
		importer.failing = Some("beta");
		let mut engine = LoadEngine::builder(importer)
			.lister(FixedLister(vec!["alpha.yml", "beta.yml", "gamma.yml"]))
			.build();
		engine.discover(Path::new("base")).unwrap();

		let result = engine.load_all();

		match result {
			Err(LoadError::ImportFailure { key, message }) => {
				assert_eq!(key, "beta");
				assert!(message.contains("duplicate label"));
			}
			other => panic!("Expected ImportFailure, got {:?}", other),
		}
		assert_eq!(engine.state("alpha"), Some(LoadState::Loaded));
		assert_eq!(engine.state("beta"), Some(LoadState::Requested));
		assert_eq!(engine.state("gamma"), Some(LoadState::Untouched));
	}

	#[rstest]
	fn test_run_discovers_target_last() {
		let journal = Journal::default();
		let mut engine = LoadEngine::builder(JournalImporter::new(&journal))
			.lister(FixedLister(vec!["one.yml"]))
			.build();

		let report = engine.run(&Manifest::new(["core"], "target")).unwrap();

		assert_eq!(report.order(), vec!["one"]);
		assert_eq!(
			engine.registry().get("one").unwrap().location,
			PathBuf::from("target/one.yml")
		);
	}

	#[rstest]
	fn test_run_missing_location() {
		let journal = Journal::default();
		let mut engine = LoadEngine::builder(JournalImporter::new(&journal))
			.lister(FixedLister(vec!["one.yml"]))
			.build();

		let result = engine.run(&Manifest::new(["missing"], "target"));

		assert!(matches!(result, Err(LoadError::LocationNotFound { .. })));
		assert!(journal.entries().is_empty());
	}
}
