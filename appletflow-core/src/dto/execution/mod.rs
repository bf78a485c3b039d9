//! Execution DTOs

use serde::{Deserialize, Serialize};

use crate::domain::applet::AppletId;
use crate::domain::execution::{ExecutionResult, ExecutionStatus};
use crate::domain::price::Price;

/// Request to run a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Applet ids in pipeline order
    pub applet_ids: Vec<AppletId>,
    pub total_price: Price,
    /// Text payload handed to every transformation
    pub input: String,
}

/// Execution record before the log assigns it an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExecution {
    pub pipeline_id: String,
    pub applet_ids: Vec<AppletId>,
    pub total_price: Price,
    pub timestamp: i64,
    pub status: ExecutionStatus,
    pub result: Option<ExecutionResult>,
    pub result_hash: Option<String>,
    pub user: Option<String>,
}
