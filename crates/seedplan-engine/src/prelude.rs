//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```ignore
//! use seedplan_engine::prelude::*;
//!
//! // Now you have access to:
//! // - The engine and its builder
//! // - Collaborator traits and their stock implementations
//! // - Registry, manifest and error types
//! ```

// Registry types
pub use seedplan_registry::{
	DirectoryLister, FsLister, LoadError, LoadResult, LoadState, Manifest, ShadowPolicy, Unit,
	UnitKey, UnitKind, UnitRegistry,
};

// Engine types
pub use crate::engine::{LoadEngine, LoadEngineBuilder, LoadReport, LoadedUnit};

// Collaborators
pub use crate::importer::{FixtureImporter, MemoryStore, RecordStore, StoreImporter};
pub use crate::observer::{DependencyKind, LoadObserver, SilentObserver, TracingObserver};
pub use crate::relations::{ModelGraph, NoRelations, Relation, RelationshipLookup};
pub use crate::script::{DependencyScope, ScriptContext, ScriptRegistry, ScriptRunner};

// Fixture types
pub use crate::fixtures::{FixtureData, FixtureParser, FixtureRow};

// Command types
pub use crate::commands::{LoadPlanArgs, LoadPlanCommand, LoadPlanOptions};
