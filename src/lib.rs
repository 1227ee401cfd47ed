//! # Seedplan
//!
//! Dependency-aware loading of layered seed datasets.
//!
//! A dataset is a directory of data units (YAML, JSON and CSV fixtures, plus
//! scripts) that may build on other directories listed in its `datasets.yml`
//! manifest. Seedplan discovers every unit, lets later directories shadow
//! earlier ones, and loads each unit only after the units it depends on.
//!
//! ## Crates
//!
//! - [`registry`] - unit discovery, manifests and load-state bookkeeping
//! - [`engine`] - the load engine, its collaborators and the `loadplan` command
//!
//! ## Quick Start
//!
//! ```ignore
//! use seedplan::prelude::*;
//!
//! let store = Arc::new(MemoryStore::new());
//! let graph = ModelGraph::new()
//!     .model("State", "states")
//!     .model("Zip", "zips")
//!     .with_belongs_to("Zip", "state", "State");
//!
//! let builder = LoadEngine::builder(StoreImporter::new(Arc::clone(&store))).relations(graph);
//! let args = LoadPlanArgs {
//!     data_root: PathBuf::from("db"),
//!     dataset: "centerstone/test".to_string(),
//! };
//! let report = LoadPlanCommand::new(builder).execute(args, LoadPlanOptions::new())?;
//! assert_eq!(report.order(), vec!["states", "zips"]);
//! ```

#![warn(missing_docs)]

/// Unit discovery, manifests and load-state bookkeeping.
pub use seedplan_registry as registry;

/// The load engine and its collaborators.
pub use seedplan_engine as engine;

pub use seedplan_engine::{LoadEngine, LoadReport};
pub use seedplan_registry::{LoadError, LoadResult, Manifest};

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use seedplan_engine::prelude::*;
}
