//! Fixture importers and record stores.
//!
//! The engine hands every structured fixture unit to a [`FixtureImporter`],
//! which purges the unit's storage key and imports the new rows. Purge then
//! import is not atomic; atomicity is the backend's concern.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use seedplan_registry::{LoadResult, UnitKind};

use crate::fixtures::{FixtureParser, FixtureRow};

/// Applies structured fixture units to a backing store.
pub trait FixtureImporter {
	/// Returns true if this importer can apply units of `kind`.
	///
	/// The default accepts every fixture kind.
	fn supports(&self, kind: UnitKind) -> bool {
		kind.is_fixture()
	}

	/// Removes every existing row stored under `key`.
	fn purge(&self, key: &str) -> LoadResult<()>;

	/// Imports the rows found at `location` under `key`.
	///
	/// Returns the number of rows imported.
	fn import(&self, key: &str, location: &Path, kind: UnitKind) -> LoadResult<usize>;
}

/// Row storage keyed by table.
pub trait RecordStore {
	/// Deletes every row of `table`.
	fn purge(&self, table: &str) -> LoadResult<()>;

	/// Appends rows to `table` and returns how many were written.
	fn insert_rows(&self, table: &str, rows: Vec<FixtureRow>) -> LoadResult<usize>;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
	fn purge(&self, table: &str) -> LoadResult<()> {
		(**self).purge(table)
	}

	fn insert_rows(&self, table: &str, rows: Vec<FixtureRow>) -> LoadResult<usize> {
		(**self).insert_rows(table, rows)
	}
}

/// Operation recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
	/// A table was purged.
	Purge(String),
	/// Rows were inserted into a table.
	Insert(String, usize),
}

#[derive(Debug, Default)]
struct MemoryTables {
	tables: IndexMap<String, Vec<FixtureRow>>,
	log: Vec<StoreOp>,
}

/// In-memory [`RecordStore`] that also records every operation.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: Mutex<MemoryTables>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the rows of `table`.
	pub fn rows(&self, table: &str) -> Vec<FixtureRow> {
		self.inner
			.lock()
			.tables
			.get(table)
			.cloned()
			.unwrap_or_default()
	}

	/// Returns the number of rows in `table`.
	pub fn count(&self, table: &str) -> usize {
		self.inner.lock().tables.get(table).map_or(0, Vec::len)
	}

	/// Returns every operation applied so far, oldest first.
	pub fn operations(&self) -> Vec<StoreOp> {
		self.inner.lock().log.clone()
	}

	/// Returns the tables in the order they were first written.
	pub fn tables(&self) -> Vec<String> {
		self.inner.lock().tables.keys().cloned().collect()
	}
}

impl RecordStore for MemoryStore {
	fn purge(&self, table: &str) -> LoadResult<()> {
		let mut inner = self.inner.lock();
		if let Some(rows) = inner.tables.get_mut(table) {
			rows.clear();
		}
		inner.log.push(StoreOp::Purge(table.to_string()));
		Ok(())
	}

	fn insert_rows(&self, table: &str, rows: Vec<FixtureRow>) -> LoadResult<usize> {
		let count = rows.len();
		let mut inner = self.inner.lock();
		inner
			.tables
			.entry(table.to_string())
			.or_default()
			.extend(rows);
		inner.log.push(StoreOp::Insert(table.to_string(), count));
		Ok(count)
	}
}

/// [`FixtureImporter`] that parses fixture files and writes them to a
/// [`RecordStore`].
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MemoryStore::new());
/// let importer = StoreImporter::new(Arc::clone(&store));
/// importer.purge("users")?;
/// importer.import("users", Path::new("db/base/users.yml"), UnitKind::Yaml)?;
/// assert_eq!(store.count("users"), 2);
/// ```
#[derive(Debug)]
pub struct StoreImporter<S> {
	store: S,
	parser: FixtureParser,
}

impl<S: RecordStore> StoreImporter<S> {
	/// Creates an importer writing to `store`.
	pub fn new(store: S) -> Self {
		Self {
			store,
			parser: FixtureParser::new(),
		}
	}

	/// Returns the underlying store.
	pub fn store(&self) -> &S {
		&self.store
	}
}

impl<S: RecordStore> FixtureImporter for StoreImporter<S> {
	fn purge(&self, key: &str) -> LoadResult<()> {
		self.store.purge(key)
	}

	fn import(&self, key: &str, location: &Path, kind: UnitKind) -> LoadResult<usize> {
		let data = self.parser.parse_file(location, kind)?;
		self.store.insert_rows(key, data.rows)
	}
}
