//! Execution logger contract methods

use crate::ContractClient;
use crate::error::{ClientError, Result};
use appletflow_core::dto::contract::{ContractExecution, LogExecutionArgs};
use serde_json::json;

impl ContractClient {
    // =============================================================================
    // Execution Logger
    // =============================================================================

    /// Record a pipeline execution
    ///
    /// # Returns
    /// The id the logger assigned
    pub async fn log_execution(&self, args: &LogExecutionArgs) -> Result<u32> {
        let args = serde_json::to_value(args).map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to encode arguments: {}", e))
        })?;
        self.execute(&self.logger_address, "log_execution", args)
            .await
    }

    /// All executions recorded for a user address
    pub async fn get_executions_by_user(&self, user: &str) -> Result<Vec<ContractExecution>> {
        self.query(
            &self.logger_address,
            "get_executions_by_user",
            json!({ "user": user }),
        )
        .await
    }

    /// Get an execution by ID
    pub async fn get_execution_by_id(&self, id: u32) -> Result<Option<ContractExecution>> {
        self.query(&self.logger_address, "get_execution_by_id", json!({ "id": id }))
            .await
    }

    /// Total number of recorded executions
    pub async fn get_execution_count(&self) -> Result<u32> {
        self.query(&self.logger_address, "get_execution_count", json!({}))
            .await
    }
}
