//! Appletflow Engine
//!
//! Runs the applet marketplace and pipeline workbench on top of the core types.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Store: Write-through JSON document holding the catalog and the execution log
//! - Repositories: Local store or registry/logger contracts
//! - Services: Business logic (catalog, history, execution)
//! - Workbench: Wires everything from a [`Config`]
//!
//! # Example
//!
//! ```no_run
//! use appletflow_engine::{Config, ExecutionService, Workbench, telemetry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     telemetry::init();
//!
//!     let workbench = Workbench::from_config(&Config::from_env()?)?;
//!     let pipeline = workbench.catalog.pipeline_from_ids(&[1, 5]).await?;
//!     let outcome = workbench
//!         .executor
//!         .run_pipeline(&pipeline, "I love this. It is great. Really.")
//!         .await?;
//!
//!     println!("logged execution {}", outcome.entry.id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod workbench;

pub use config::{Config, DataSource};
pub use service::{
    CatalogError, CatalogService, ExecutionError, ExecutionOutcome, ExecutionService,
    ExecutionState, HistoryService, StandardExecutionService,
};
pub use store::{PersistedState, StateStore, StoreError};
pub use workbench::Workbench;
