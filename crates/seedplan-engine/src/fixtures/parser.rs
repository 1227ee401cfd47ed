//! Fixture parsing.
//!
//! YAML and JSON fixtures are either a mapping of row labels to columns or a
//! sequence of column mappings. CSV fixtures use their first record as the
//! header.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use seedplan_registry::{LoadError, LoadResult, UnitKind};

use super::{FixtureData, FixtureRow};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFixture {
	Labelled(IndexMap<String, Value>),
	Rows(Vec<Value>),
}

/// Parser for fixture files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses the fixture file at `path` as `kind`.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `kind` is not a fixture kind
	/// - The file cannot be read
	/// - The content is not valid for the kind
	pub fn parse_file(&self, path: &Path, kind: UnitKind) -> LoadResult<FixtureData> {
		let content = std::fs::read_to_string(path)?;
		let source = path.display().to_string();
		let data = self.parse_str(&content, kind, &source)?;
		Ok(data.with_source(source))
	}

	/// Parses fixture content. `origin` names the content in error messages.
	pub fn parse_str(&self, content: &str, kind: UnitKind, origin: &str) -> LoadResult<FixtureData> {
		let rows = match kind {
			UnitKind::Yaml => self.parse_document(content, origin, |c| {
				serde_yaml::from_str::<Option<RawFixture>>(c).map_err(LoadError::from)
			})?,
			UnitKind::Json => self.parse_document(content, origin, |c| {
				serde_json::from_str::<Option<RawFixture>>(c).map_err(LoadError::from)
			})?,
			UnitKind::Csv => self.parse_csv(content)?,
			UnitKind::Script => {
				return Err(LoadError::InvalidFixture {
					origin: origin.to_string(),
					message: "scripts are not fixture data".to_string(),
				});
			}
		};

		tracing::trace!(origin, rows = rows.len(), "Parsed fixture");
		Ok(FixtureData::from_rows(rows, kind))
	}

	fn parse_document<F>(&self, content: &str, origin: &str, decode: F) -> LoadResult<Vec<FixtureRow>>
	where
		F: FnOnce(&str) -> LoadResult<Option<RawFixture>>,
	{
		if content.trim().is_empty() {
			return Ok(Vec::new());
		}

		match decode(content)? {
			None => Ok(Vec::new()),
			Some(RawFixture::Labelled(rows)) => rows
				.into_iter()
				.map(|(label, value)| -> LoadResult<FixtureRow> {
					let fields = self.row_fields(value, origin, &label)?;
					Ok(FixtureRow::labelled(label, fields))
				})
				.collect(),
			Some(RawFixture::Rows(rows)) => rows
				.into_iter()
				.enumerate()
				.map(|(idx, value)| -> LoadResult<FixtureRow> {
					let fields = self.row_fields(value, origin, &format!("index {}", idx))?;
					Ok(FixtureRow::new(fields))
				})
				.collect(),
		}
	}

	/// Validates the shape of one row.
	fn row_fields(&self, value: Value, origin: &str, row: &str) -> LoadResult<Map<String, Value>> {
		match value {
			Value::Object(fields) => Ok(fields),
			Value::Null => Ok(Map::new()),
			other => Err(LoadError::InvalidFixture {
				origin: origin.to_string(),
				message: format!("row {} must be a mapping of columns, got {}", row, other),
			}),
		}
	}

	fn parse_csv(&self, content: &str) -> LoadResult<Vec<FixtureRow>> {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(true)
			.trim(csv::Trim::All)
			.from_reader(content.as_bytes());
		let headers = reader.headers()?.clone();

		let mut rows = Vec::new();
		for record in reader.records() {
			let record = record?;
			let fields = headers
				.iter()
				.zip(record.iter())
				.map(|(column, value)| (column.to_string(), Value::String(value.to_string())))
				.collect();
			rows.push(FixtureRow::new(fields));
		}
		Ok(rows)
	}
}
