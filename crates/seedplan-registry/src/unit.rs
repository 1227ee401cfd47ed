//! Loadable unit definitions.
//!
//! A unit is one discoverable file in a dataset directory: a structured
//! fixture or a script. Units are keyed by their normalized base name, which
//! doubles as the storage key the unit populates.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Normalized unit identifier.
///
/// # Example
///
/// ```
/// # use seedplan_registry::UnitKey;
/// let key = UnitKey::new(" Data-Manager Ones ");
/// assert_eq!(key.as_str(), "data_manager_ones");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitKey(String);

impl UnitKey {
	/// Creates a key from a raw base name.
	pub fn new(raw: impl AsRef<str>) -> Self {
		let normalized = raw
			.as_ref()
			.trim()
			.chars()
			.map(|c| match c {
				'-' | '.' | ' ' => '_',
				c => c.to_ascii_lowercase(),
			})
			.collect();
		Self(normalized)
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for UnitKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for UnitKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for UnitKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for UnitKey {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

/// Payload kinds a unit can carry.
///
/// Variants are listed in precedence order: declarative data is available
/// before scripts that may assume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
	/// YAML fixture (`.yml`, `.yaml`).
	Yaml,
	/// JSON fixture (`.json`).
	Json,
	/// CSV fixture (`.csv`).
	Csv,
	/// Script payload (`.seed`).
	Script,
}

impl UnitKind {
	/// All kinds, in precedence order.
	pub const ALL: [UnitKind; 4] = [Self::Yaml, Self::Json, Self::Csv, Self::Script];

	/// Determines the kind from a file extension, case-insensitively.
	///
	/// ```
	/// # use seedplan_registry::UnitKind;
	/// assert_eq!(UnitKind::from_extension("YML"), Some(UnitKind::Yaml));
	/// assert_eq!(UnitKind::from_extension("seed"), Some(UnitKind::Script));
	/// assert_eq!(UnitKind::from_extension("txt"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_ascii_lowercase().as_str() {
			"yml" | "yaml" => Some(Self::Yaml),
			"json" => Some(Self::Json),
			"csv" => Some(Self::Csv),
			"seed" => Some(Self::Script),
			_ => None,
		}
	}

	/// Determines the kind from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Sort rank used when several files of one directory are discovered.
	pub fn precedence(self) -> usize {
		self as usize
	}

	/// Returns true for declarative fixture kinds.
	pub fn is_fixture(self) -> bool {
		!matches!(self, Self::Script)
	}
}

impl fmt::Display for UnitKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Yaml => write!(f, "YAML"),
			Self::Json => write!(f, "JSON"),
			Self::Csv => write!(f, "CSV"),
			Self::Script => write!(f, "script"),
		}
	}
}

/// Per-run load state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
	/// Discovered, no load requested yet.
	#[default]
	Untouched,
	/// Currently being resolved somewhere up the call chain.
	Requested,
	/// Dependencies satisfied and payload applied. Terminal.
	Loaded,
}

impl fmt::Display for LoadState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Untouched => write!(f, "untouched"),
			Self::Requested => write!(f, "requested"),
			Self::Loaded => write!(f, "loaded"),
		}
	}
}

/// A discovered, loadable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
	/// Normalized key.
	pub key: UnitKey,
	/// Location of the payload.
	pub location: PathBuf,
	/// Payload kind.
	pub kind: UnitKind,
	/// Current load state.
	pub state: LoadState,
}

impl Unit {
	/// Creates an untouched unit.
	pub fn new(key: impl Into<UnitKey>, location: impl Into<PathBuf>, kind: UnitKind) -> Self {
		Self {
			key: key.into(),
			location: location.into(),
			kind,
			state: LoadState::Untouched,
		}
	}

	/// Builds a unit from a file path, or `None` when the extension is not a
	/// recognized kind.
	pub fn from_path(path: &Path) -> Option<Self> {
		let kind = UnitKind::from_path(path)?;
		let stem = path.file_stem()?.to_str()?;
		Some(Self::new(UnitKey::new(stem), path, kind))
	}

	/// Returns true once the unit has been applied.
	pub fn is_loaded(&self) -> bool {
		self.state == LoadState::Loaded
	}
}
