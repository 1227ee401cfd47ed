//! Error types for load plan resolution.
//!
//! Every variant is fatal to a run: the engine never catches an error and
//! continues with the next unit.

use std::path::PathBuf;

use thiserror::Error;

use crate::unit::UnitKind;

/// Errors that can occur while discovering or loading units.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
	/// A manifest location does not exist or cannot be read.
	#[error("location not found: {}", .location.display())]
	LocationNotFound {
		/// Location that could not be listed.
		location: PathBuf,
		/// Underlying listing failure.
		source: std::io::Error,
	},

	/// A load was requested for a key that was never discovered.
	#[error("unknown dependency: {0}")]
	UnknownDependency(String),

	/// A script declared a dependency on a key absent from the registry.
	#[error("unsatisfied dependency '{key}' declared by '{requested_by}'")]
	UnsatisfiedDependency {
		/// Key that was declared.
		key: String,
		/// Unit whose script declared the dependency.
		requested_by: String,
	},

	/// A key was requested while it is still being resolved.
	#[error("circular data dependency in '{key}' ({})", .chain.join(" -> "))]
	CircularDependency {
		/// Key that was requested twice on the same resolution chain.
		key: String,
		/// Resolution chain from the outermost request to the offending key.
		chain: Vec<String>,
	},

	/// A key was requested after an earlier load of it failed in this run.
	#[error("'{0}' did not finish loading after an earlier failure")]
	IncompleteUnit(String),

	/// No apply behavior is available for a unit's kind.
	#[error("unsupported {kind} payload: {}", .location.display())]
	UnsupportedKind {
		/// Kind of the unit.
		kind: UnitKind,
		/// Location of the payload.
		location: PathBuf,
	},

	/// The importer or script runner rejected a payload.
	#[error("import of '{key}' failed: {message}")]
	ImportFailure {
		/// Key of the unit being applied.
		key: String,
		/// Backend detail.
		message: String,
	},

	/// The manifest control file is missing.
	#[error("manifest not found: {}", .0.display())]
	ManifestNotFound(PathBuf),

	/// The manifest control file could not be interpreted.
	#[error("invalid manifest {}: {message}", .path.display())]
	InvalidManifest {
		/// Path of the control file.
		path: PathBuf,
		/// Parse failure detail.
		message: String,
	},

	/// Fixture content does not have the expected shape.
	#[error("invalid fixture {origin}: {message}")]
	InvalidFixture {
		/// Fixture file or label the problem was found in.
		origin: String,
		/// What was wrong.
		message: String,
	},

	/// Validation failed for a specific field.
	#[error("Validation error: {field}: {message}")]
	Validation {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// YAML deserialization error.
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// JSON deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// CSV decoding error.
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

impl LoadError {
	/// Builds an [`LoadError::ImportFailure`] from any displayable backend error.
	pub fn import_failure(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
		Self::ImportFailure {
			key: key.into(),
			message: err.to_string(),
		}
	}
}

/// Result type alias for load plan operations.
pub type LoadResult<T> = Result<T, LoadError>;
