//! Service layer
//!
//! Services contain the business logic of the workbench. They orchestrate
//! repositories and transforms:
//! - Catalog: browse, search, register and toggle applets
//! - History: read the execution log newest first
//! - Execution: run pipelines and record their outcome

mod catalog;
mod execution;
mod history;

// Re-export traits
pub use execution::ExecutionService;

// Re-export implementations
pub use catalog::{CatalogError, CatalogService};
pub use execution::{
    ExecutionError, ExecutionOutcome, ExecutionState, StandardExecutionService, result_hash,
};
pub use history::HistoryService;
