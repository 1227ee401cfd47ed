//! Load plan manifests.
//!
//! A manifest names the locations a run discovers units from. The terminal
//! target location is always discovered last.
//!
//! On disk, a dataset directory carries a `datasets.yml` control file listing
//! the directories (relative to the data root) that contribute to it:
//!
//! ```yaml
//! - core/base
//! - centerstone/test
//! ```

use std::path::{Path, PathBuf};

use crate::error::{LoadError, LoadResult};

/// File name of the manifest control file inside a dataset directory.
pub const MANIFEST_FILE: &str = "datasets.yml";

/// Ordered list of locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
	locations: Vec<PathBuf>,
	target: PathBuf,
}

impl Manifest {
	/// Creates a manifest from explicit locations and a target.
	pub fn new<I, P>(locations: I, target: impl Into<PathBuf>) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		Self {
			locations: locations.into_iter().map(Into::into).collect(),
			target: target.into(),
		}
	}

	/// Reads the manifest of `dataset` under `data_root`.
	///
	/// Listed locations are resolved against `data_root`; the dataset directory
	/// itself becomes the target.
	///
	/// # Errors
	///
	/// Returns [`LoadError::ManifestNotFound`] if the control file is missing
	/// and [`LoadError::InvalidManifest`] if it is not a list of strings.
	pub fn load(data_root: &Path, dataset: &str) -> LoadResult<Self> {
		let target = data_root.join(dataset);
		let path = target.join(MANIFEST_FILE);

		let content = std::fs::read_to_string(&path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				LoadError::ManifestNotFound(path.clone())
			} else {
				LoadError::Io(e)
			}
		})?;

		let names = Self::parse(&content).map_err(|message| LoadError::InvalidManifest {
			path: path.clone(),
			message,
		})?;
		tracing::debug!(
			manifest = %path.display(),
			locations = names.len(),
			"Read manifest"
		);

		Ok(Self::new(
			names.iter().map(|name| data_root.join(name)),
			target,
		))
	}

	/// Parses control file content into location names.
	fn parse(content: &str) -> Result<Vec<String>, String> {
		if content.trim().is_empty() {
			return Ok(Vec::new());
		}
		let value: Option<Vec<String>> =
			serde_yaml::from_str(content).map_err(|e| e.to_string())?;
		let names = value.unwrap_or_default();

		if let Some(name) = names.iter().find(|name| name.trim().is_empty()) {
			return Err(format!("empty location entry {:?}", name));
		}
		Ok(names)
	}

	/// Non-terminal locations, in order.
	pub fn locations(&self) -> &[PathBuf] {
		&self.locations
	}

	/// Terminal location discovered last.
	pub fn target(&self) -> &Path {
		&self.target
	}

	/// Every location in discovery order, target last.
	pub fn discovery_order(&self) -> impl Iterator<Item = &Path> {
		self.locations
			.iter()
			.map(PathBuf::as_path)
			.chain(std::iter::once(self.target.as_path()))
	}
}
