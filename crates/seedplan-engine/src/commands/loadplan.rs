//! loadplan command implementation.
//!
//! This command resolves the manifest of a dataset and loads every unit it
//! contributes.

use std::path::PathBuf;

use seedplan_registry::{LoadError, LoadResult, Manifest, ShadowPolicy};

use crate::engine::{LoadEngineBuilder, LoadReport};

/// Arguments for the loadplan command.
#[derive(Debug, Clone, Default)]
pub struct LoadPlanArgs {
	/// Directory the dataset and its manifest locations are relative to.
	pub data_root: PathBuf,

	/// Dataset directory under the data root (e.g. `centerstone/test`).
	pub dataset: String,
}

/// Options for the loadplan command.
#[derive(Debug, Clone, Default)]
pub struct LoadPlanOptions {
	/// Policy for keys contributed by more than one location.
	pub shadow_policy: ShadowPolicy,

	/// Verbosity level.
	pub verbosity: u8,
}

impl LoadPlanOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the shadowing policy.
	pub fn with_shadow_policy(mut self, policy: ShadowPolicy) -> Self {
		self.shadow_policy = policy;
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}
}

/// The loadplan command.
///
/// # Example
///
/// ```ignore
/// let builder = LoadEngine::builder(StoreImporter::new(MemoryStore::new()))
///     .relations(graph);
/// let args = LoadPlanArgs {
///     data_root: PathBuf::from("db"),
///     dataset: "centerstone/test".to_string(),
/// };
/// let report = LoadPlanCommand::new(builder).execute(args, LoadPlanOptions::new())?;
/// println!("Loaded {} units", report.len());
/// ```
#[derive(Debug)]
pub struct LoadPlanCommand {
	engine: LoadEngineBuilder,
}

impl LoadPlanCommand {
	/// Creates a loadplan command running engines configured by `engine`.
	pub fn new(engine: LoadEngineBuilder) -> Self {
		Self { engine }
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"loadplan"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Loads every unit of a dataset in dependency order"
	}

	/// Returns the command help text.
	pub fn help(&self) -> &str {
		r#"
Usage: loadplan [options] dataset

Loads every unit contributed to a dataset, in dependency order.

Arguments:
  dataset              Dataset directory relative to the data root

Options:
  --root DIR           Data root the dataset and its manifest are relative to
  --first-wins         Keep the first unit found for a key instead of overlaying it
  --verbosity LEVEL    Verbosity level (0=minimal, 1=normal, 2=verbose)
"#
	}

	/// Executes the loadplan command.
	///
	/// # Errors
	///
	/// Returns a validation error for an empty dataset name, and any error
	/// raised while reading the manifest or running the plan.
	pub fn execute(self, args: LoadPlanArgs, options: LoadPlanOptions) -> LoadResult<LoadReport> {
		if args.dataset.trim().is_empty() {
			return Err(LoadError::Validation {
				field: "dataset".to_string(),
				message: "A dataset must be specified".to_string(),
			});
		}

		let manifest = Manifest::load(&args.data_root, &args.dataset)?;
		let mut engine = self.engine.policy(options.shadow_policy).build();
		let report = engine.run(&manifest)?;

		if options.verbosity > 0 {
			Self::print_result(&report, options.verbosity);
		}

		Ok(report)
	}

	/// Prints the load report summary.
	fn print_result(report: &LoadReport, verbosity: u8) {
		println!(
			"Loaded {} unit(s), {} row(s)",
			report.len(),
			report.rows_imported()
		);

		if verbosity > 1 {
			for unit in report.iter() {
				match unit.rows {
					Some(rows) => println!("  {} ({}, {} row(s))", unit.key, unit.kind, rows),
					None => println!("  {} ({})", unit.key, unit.kind),
				}
			}
		}
	}
}
