//! Dependency-aware load plan engine.
//!
//! Loads the units discovered by `seedplan-registry` into a backing store,
//! always loading the units a unit depends on first:
//!
//! - **Implicit dependencies**: a unit whose model belongs to another model
//!   waits for the unit backing that model
//! - **Explicit dependencies**: a script unit declares what it needs while it
//!   runs, through a [`DependencyScope`](script::DependencyScope)
//! - **Cycle detection**: a unit requested while it is still being resolved
//!   aborts the run with the chain that led back to it
//!
//! # Quick Start
//!
//! ```ignore
//! use seedplan_engine::prelude::*;
//!
//! let store = Arc::new(MemoryStore::new());
//! let graph = ModelGraph::new()
//!     .model("User", "users")
//!     .model("Post", "posts")
//!     .with_belongs_to("Post", "author", "User");
//!
//! let mut engine = LoadEngine::builder(StoreImporter::new(Arc::clone(&store)))
//!     .relations(graph)
//!     .build();
//! let report = engine.run(&Manifest::load(Path::new("db"), "blog/test")?)?;
//! println!("Loaded {} rows", report.rows_imported());
//! ```
//!
//! # Architecture
//!
//! The engine talks to the outside world only through narrow traits:
//!
//! - [`RelationshipLookup`](relations::RelationshipLookup) - model metadata
//! - [`FixtureImporter`](importer::FixtureImporter) - purge and import of fixture units
//! - [`ScriptRunner`](script::ScriptRunner) - execution of script units
//! - [`LoadObserver`](observer::LoadObserver) - progress reporting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod engine;
pub mod fixtures;
pub mod importer;
pub mod observer;
pub mod prelude;
pub mod relations;
pub mod script;

// Re-export commonly used types at crate root
pub use engine::{LoadEngine, LoadEngineBuilder, LoadReport, LoadedUnit};
pub use importer::{FixtureImporter, MemoryStore, StoreImporter};
pub use relations::{ModelGraph, RelationshipLookup};
pub use script::{DependencyScope, ScriptRegistry, ScriptRunner};
