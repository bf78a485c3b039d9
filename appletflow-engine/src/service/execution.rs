//! Execution service
//!
//! Runs a pipeline against the built-in transforms:
//! - Waits out the settlement delay
//! - Applies every transform whose applet id occurs in the pipeline
//! - Aggregates the fragments and appends one log entry
//!
//! Progress is published on a watch channel so callers can render
//! Idle / Processing / Succeeded / Failed without polling.

use appletflow_core::domain::execution::{ExecutionLogEntry, ExecutionResult, ExecutionStatus};
use appletflow_core::domain::pipeline::{Pipeline, SchemaWarning};
use appletflow_core::domain::price::PriceError;
use appletflow_core::dto::execution::{ExecutionRequest, NewExecution};
use appletflow_transforms::TransformRegistry;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::repository::RepositoryError;
use crate::service::history::HistoryService;

/// Errors that stop a pipeline run
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Pipeline has no stages")]
    EmptyPipeline,

    #[error("Pipeline has incompatible stages: {}", describe(.0))]
    SchemaMismatch(Vec<SchemaWarning>),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error("Execution timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Failed to record execution: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to hash execution result: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn describe(warnings: &[SchemaWarning]) -> String {
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

/// Observable progress of the most recent run
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExecutionState {
    #[default]
    Idle,
    Processing,
    Succeeded(ExecutionResult),
    Failed(String),
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// The appended log entry
    pub entry: ExecutionLogEntry,
    pub result: ExecutionResult,
}

/// Service trait for running pipelines
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Executes a pipeline given as applet ids
    ///
    /// # Errors
    /// `EmptyPipeline` for an empty id list, `TimedOut` when the configured
    /// timeout elapses, `Repository` when the log entry cannot be stored.
    /// Transform failures never fail the run.
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome>;

    /// Validates and executes a composed pipeline
    ///
    /// Schema warnings are logged, or rejected with `SchemaMismatch` in strict mode.
    async fn run_pipeline(&self, pipeline: &Pipeline, input: &str) -> Result<ExecutionOutcome>;

    /// Receiver for execution progress
    fn subscribe(&self) -> watch::Receiver<ExecutionState>;
}

/// Standard implementation of ExecutionService
pub struct StandardExecutionService {
    transforms: Arc<TransformRegistry>,
    history: HistoryService,
    settlement_delay: Duration,
    timeout: Option<Duration>,
    strict_schema: bool,
    /// Recorded as the submitting user of each entry
    user: Option<String>,
    state: watch::Sender<ExecutionState>,
}

impl StandardExecutionService {
    /// Creates a service with a 1.5 s settlement delay, no timeout and advisory validation
    pub fn new(transforms: Arc<TransformRegistry>, history: HistoryService) -> Self {
        let (state, _) = watch::channel(ExecutionState::Idle);
        Self {
            transforms,
            history,
            settlement_delay: Duration::from_millis(1500),
            timeout: None,
            strict_schema: false,
            user: None,
            state,
        }
    }

    pub fn with_settlement_delay(mut self, delay: Duration) -> Self {
        self.settlement_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Current progress
    pub fn state(&self) -> ExecutionState {
        self.state.borrow().clone()
    }

    /// Settlement delay followed by every applicable transform
    async fn run_transforms(&self, request: &ExecutionRequest) -> ExecutionResult {
        tokio::time::sleep(self.settlement_delay).await;

        let mut result = ExecutionResult::default();
        for transform in self.transforms.applicable(&request.applet_ids) {
            debug!("Applying transform '{}'", transform.name());
            result.merge(transform.apply(&request.input).await);
        }
        result
    }

    fn record(
        &self,
        pipeline_id: String,
        request: &ExecutionRequest,
        status: ExecutionStatus,
        result: Option<ExecutionResult>,
        result_hash: Option<String>,
    ) -> NewExecution {
        NewExecution {
            pipeline_id,
            applet_ids: request.applet_ids.clone(),
            total_price: request.total_price,
            timestamp: chrono::Utc::now().timestamp(),
            status,
            result,
            result_hash,
            user: self.user.clone(),
        }
    }

    fn fail(&self, err: ExecutionError) -> ExecutionError {
        self.state.send_replace(ExecutionState::Failed(err.to_string()));
        err
    }
}

/// Hex SHA-256 of the JSON-encoded result
pub fn result_hash(result: &ExecutionResult) -> Result<String> {
    let bytes = serde_json::to_vec(result)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn new_pipeline_id() -> String {
    format!("0x{}", Uuid::new_v4().simple())
}

#[async_trait]
impl ExecutionService for StandardExecutionService {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome> {
        if request.applet_ids.is_empty() {
            return Err(ExecutionError::EmptyPipeline);
        }

        let pipeline_id = new_pipeline_id();
        info!(
            "Executing pipeline {} with applets {:?} for {}",
            pipeline_id, request.applet_ids, request.total_price
        );
        self.state.send_replace(ExecutionState::Processing);

        let run = self.run_transforms(&request);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Pipeline {} timed out after {:?}", pipeline_id, limit);
                    let failed =
                        self.record(pipeline_id, &request, ExecutionStatus::Failed, None, None);
                    if let Err(e) = self.history.append(failed).await {
                        error!("Failed to record timed out execution: {}", e);
                    }
                    return Err(self.fail(ExecutionError::TimedOut(limit)));
                }
            },
            None => run.await,
        };

        let hash = result_hash(&result).map_err(|e| self.fail(e))?;
        let execution = self.record(
            pipeline_id,
            &request,
            ExecutionStatus::Success,
            Some(result.clone()),
            Some(hash),
        );

        let entry = match self.history.append(execution).await {
            Ok(entry) => entry,
            Err(e) => {
                error!("Failed to record execution: {}", e);
                return Err(self.fail(e.into()));
            }
        };

        info!("Execution {} completed ({})", entry.id, entry.pipeline_id);
        self.state
            .send_replace(ExecutionState::Succeeded(result.clone()));

        Ok(ExecutionOutcome { entry, result })
    }

    async fn run_pipeline(&self, pipeline: &Pipeline, input: &str) -> Result<ExecutionOutcome> {
        let warnings = pipeline.validate();
        for warning in &warnings {
            warn!("{}", warning);
        }
        if self.strict_schema && !warnings.is_empty() {
            warn!("Refusing pipeline with {} schema warning(s)", warnings.len());
            return Err(ExecutionError::SchemaMismatch(warnings));
        }

        let request = ExecutionRequest {
            applet_ids: pipeline.applet_ids(),
            total_price: pipeline.total_price()?,
            input: input.to_string(),
        };
        self.execute(request).await
    }

    fn subscribe(&self) -> watch::Receiver<ExecutionState> {
        self.state.subscribe()
    }
}
