//! Fixture data structures.

use serde_json::{Map, Value};
use seedplan_registry::UnitKind;

/// A single fixture row destined for one storage key.
///
/// Rows read from a labelled document keep their label:
///
/// ```yaml
/// admin:
///   name: Admin
///   email: admin@example.com
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixtureRow {
	/// Row label, when the document names its rows.
	pub label: Option<String>,

	/// Column values.
	pub fields: Map<String, Value>,
}

impl FixtureRow {
	/// Creates an unlabelled row.
	pub fn new(fields: Map<String, Value>) -> Self {
		Self {
			label: None,
			fields,
		}
	}

	/// Creates a labelled row.
	pub fn labelled(label: impl Into<String>, fields: Map<String, Value>) -> Self {
		Self {
			label: Some(label.into()),
			fields,
		}
	}

	/// Returns a column value.
	pub fn get(&self, column: &str) -> Option<&Value> {
		self.fields.get(column)
	}
}

/// Parsed content of one fixture file.
#[derive(Debug, Clone)]
pub struct FixtureData {
	/// Rows in document order.
	pub rows: Vec<FixtureRow>,

	/// Kind the data was parsed from.
	pub kind: UnitKind,

	/// Optional source file path.
	pub source: Option<String>,
}

impl FixtureData {
	/// Creates fixture data from rows.
	pub fn from_rows(rows: Vec<FixtureRow>, kind: UnitKind) -> Self {
		Self {
			rows,
			kind,
			source: None,
		}
	}

	/// Sets the source file path.
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// Returns the number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if there are no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns an iterator over the rows.
	pub fn iter(&self) -> impl Iterator<Item = &FixtureRow> {
		self.rows.iter()
	}

	/// Labels of labelled rows, in document order.
	pub fn labels(&self) -> Vec<&str> {
		self.rows
			.iter()
			.filter_map(|row| row.label.as_deref())
			.collect()
	}
}

impl IntoIterator for FixtureData {
	type Item = FixtureRow;
	type IntoIter = std::vec::IntoIter<FixtureRow>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn fields(value: Value) -> Map<String, Value> {
		value.as_object().cloned().unwrap()
	}

	#[rstest]
	fn test_labels_skip_unlabelled_rows() {
		let data = FixtureData::from_rows(
			vec![
				FixtureRow::labelled("admin", fields(json!({"name": "Admin"}))),
				FixtureRow::new(fields(json!({"name": "Anonymous"}))),
				FixtureRow::labelled("guest", fields(json!({"name": "Guest"}))),
			],
			UnitKind::Yaml,
		);

		assert_eq!(data.len(), 3);
		assert_eq!(data.labels(), vec!["admin", "guest"]);
	}

	#[rstest]
	fn test_row_get() {
		let row = FixtureRow::new(fields(json!({"name": "Admin", "active": true})));
		assert_eq!(row.get("active"), Some(&json!(true)));
		assert_eq!(row.get("email"), None);
	}
}
