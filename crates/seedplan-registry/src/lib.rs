//! Unit registry for seedplan load plans.
//!
//! This crate holds the bookkeeping side of a load run:
//!
//! - [`Unit`], [`UnitKey`], [`UnitKind`] and [`LoadState`] describe one loadable file
//! - [`UnitRegistry`] discovers units in dataset directories and keeps them in
//!   discovery order
//! - [`Manifest`] lists the directories a run consults
//! - [`LoadError`] is the error type shared by every seedplan crate
//!
//! # Example
//!
//! ```ignore
//! use seedplan_registry::{Manifest, UnitRegistry};
//!
//! let manifest = Manifest::load(Path::new("db"), "centerstone/test")?;
//! let mut registry = UnitRegistry::new();
//! for location in manifest.discovery_order() {
//!     registry.discover(location)?;
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod manifest;
pub mod registry;
pub mod unit;

pub use error::{LoadError, LoadResult};
pub use manifest::{MANIFEST_FILE, Manifest};
pub use registry::{DirectoryLister, FsLister, MANIFEST_STEM, ShadowPolicy, UnitRegistry};
pub use unit::{LoadState, Unit, UnitKey, UnitKind};
