pub mod attributes;
pub mod error;
pub mod pagination;
pub mod problem_index;
pub mod rate_limit;
pub mod reconcile;
pub mod rows;
pub mod timeline;
pub mod workflows;

#[cfg(test)]
mod testing;

pub use error::{MigrateError, Result};
pub use reconcile::OverwritePolicy;
pub use workflows::{RunSummary, Workflow};
