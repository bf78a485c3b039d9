//! Repository layer
//!
//! Repositories own persistence of applets and execution records. Each
//! trait has two implementations:
//! - Local: backed by the shared [`StateStore`](crate::store::StateStore)
//! - Contract: backed by the registry and logger contracts through the gateway
//!
//! Repositories contain no business rules; validation lives in the services.

mod applets;
mod executions;

use appletflow_client::ClientError;
use appletflow_core::domain::price::PriceError;
use thiserror::Error;

use crate::store::StoreError;

// Re-export traits
pub use applets::AppletRepository;
pub use executions::ExecutionRepository;

// Re-export implementations
pub use applets::{ContractAppletRepository, LocalAppletRepository};
pub use executions::{ContractExecutionRepository, LocalExecutionRepository};

/// Errors raised by any repository implementation
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    #[error("Contract call failed: {0}")]
    Client(#[from] ClientError),

    #[error("Price cannot be represented on the contract: {0}")]
    Price(#[from] PriceError),

    #[error("Malformed contract data: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
