//! Model relationship lookup.
//!
//! The engine infers load-order dependencies from the belongs-to
//! relationships of the model a unit populates. The lookup is injected; a
//! unit whose key maps to no model simply has no implicit dependencies.

use std::collections::HashMap;

use indexmap::IndexMap;
use seedplan_registry::UnitKey;

/// A belongs-to relationship of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
	/// Name of the relationship on the owning model (e.g. `author`).
	pub name: String,
	/// Related model identifier (e.g. `User`).
	pub target: String,
}

impl Relation {
	/// Creates a belongs-to relation.
	pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			target: target.into(),
		}
	}
}

/// Answers which model a unit populates and what that model belongs to.
pub trait RelationshipLookup {
	/// Returns the model backed by the given storage key.
	fn model_for(&self, key: &str) -> Option<String>;

	/// Returns the direct belongs-to relationships of a model.
	fn belongs_to(&self, model: &str) -> Vec<Relation>;

	/// Returns the storage key backing a model.
	fn storage_key_for(&self, model: &str) -> Option<String>;
}

/// Lookup with no models; every unit loads in discovery order.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRelations;

impl RelationshipLookup for NoRelations {
	fn model_for(&self, _key: &str) -> Option<String> {
		None
	}

	fn belongs_to(&self, _model: &str) -> Vec<Relation> {
		Vec::new()
	}

	fn storage_key_for(&self, _model: &str) -> Option<String> {
		None
	}
}

#[derive(Debug, Default, Clone)]
struct ModelEntry {
	table: Option<String>,
	belongs_to: Vec<Relation>,
}

/// In-memory model graph.
///
/// # Example
///
/// ```
/// # use seedplan_engine::relations::{ModelGraph, RelationshipLookup};
/// let graph = ModelGraph::new()
///     .model("User", "users")
///     .model("Post", "posts")
///     .with_belongs_to("Post", "author", "User");
///
/// assert_eq!(graph.model_for("posts").as_deref(), Some("Post"));
/// assert_eq!(graph.storage_key_for("User").as_deref(), Some("users"));
/// assert_eq!(graph.belongs_to("Post")[0].target, "User");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModelGraph {
	models: IndexMap<String, ModelEntry>,
	tables: HashMap<String, String>,
}

impl ModelGraph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a model backed by `table`.
	pub fn model(mut self, name: impl Into<String>, table: impl Into<String>) -> Self {
		self.add_model(name, table);
		self
	}

	/// Adds a belongs-to relationship from `model` to `target`.
	pub fn with_belongs_to(
		mut self,
		model: impl Into<String>,
		name: impl Into<String>,
		target: impl Into<String>,
	) -> Self {
		self.add_belongs_to(model, name, target);
		self
	}

	/// Registers a model backed by `table`, replacing a previous table mapping.
	///
	/// The table name is normalized the same way unit keys are, so `Users`
	/// and `users` name the same storage key.
	pub fn add_model(&mut self, name: impl Into<String>, table: impl Into<String>) {
		let name = name.into();
		let table = UnitKey::new(table.into()).to_string();
		let entry = self.models.entry(name.clone()).or_default();
		if let Some(previous) = entry.table.replace(table.clone()) {
			self.tables.remove(&previous);
		}
		self.tables.insert(table, name);
	}

	/// Adds a belongs-to relationship. The owning model does not need a table
	/// yet.
	pub fn add_belongs_to(
		&mut self,
		model: impl Into<String>,
		name: impl Into<String>,
		target: impl Into<String>,
	) {
		self.models
			.entry(model.into())
			.or_default()
			.belongs_to
			.push(Relation::new(name, target));
	}

	/// Returns the number of known models.
	pub fn len(&self) -> usize {
		self.models.len()
	}

	/// Returns true if no models are known.
	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}

impl RelationshipLookup for ModelGraph {
	fn model_for(&self, key: &str) -> Option<String> {
		self.tables.get(UnitKey::new(key).as_str()).cloned()
	}

	fn belongs_to(&self, model: &str) -> Vec<Relation> {
		self.models
			.get(model)
			.map(|entry| entry.belongs_to.clone())
			.unwrap_or_default()
	}

	fn storage_key_for(&self, model: &str) -> Option<String> {
		self.models.get(model).and_then(|entry| entry.table.clone())
	}
}
