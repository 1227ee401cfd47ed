//! Fixture parsing.
//!
//! Turns YAML, JSON and CSV fixture files into rows for a record store.

mod format;
mod parser;

pub use format::{FixtureData, FixtureRow};
pub use parser::FixtureParser;
