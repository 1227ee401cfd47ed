//! Management commands.
//!
//! - [`LoadPlanCommand`] - Load every unit of a dataset

mod loadplan;

pub use loadplan::{LoadPlanArgs, LoadPlanCommand, LoadPlanOptions};
