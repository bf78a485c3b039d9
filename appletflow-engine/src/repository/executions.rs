//! Execution repository
//!
//! Append-only storage for execution records. Local ids follow
//! `max(len + 100, highest id) + 1`; the logger contract assigns its own.

use appletflow_client::ContractClient;
use appletflow_core::domain::applet::AppletId;
use appletflow_core::domain::execution::{ExecutionLogEntry, ExecutionStatus};
use appletflow_core::domain::price::Price;
use appletflow_core::dto::contract::{ContractExecution, LogExecutionArgs, price_to_wire};
use appletflow_core::dto::execution::NewExecution;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::debug;

use super::{RepositoryError, Result};
use crate::store::SharedStore;

/// Repository trait for execution records
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// Records a finished execution and returns it with its assigned id
    async fn append(&self, execution: NewExecution) -> Result<ExecutionLogEntry>;

    /// All records in storage order (newest insert first for the local store)
    async fn list(&self) -> Result<Vec<ExecutionLogEntry>>;

    async fn find(&self, id: u64) -> Result<Option<ExecutionLogEntry>>;

    /// Records submitted by `user`
    async fn list_for_user(&self, user: &str) -> Result<Vec<ExecutionLogEntry>>;

    async fn count(&self) -> Result<usize>;
}

/// Next local id: past the seed range and past anything already used
fn next_id(existing: &[ExecutionLogEntry]) -> u64 {
    let floor = existing.len() as u64 + 100;
    let highest = existing.iter().map(|e| e.id).max().unwrap_or(0);
    floor.max(highest) + 1
}

/// Execution repository backed by the local state store
#[derive(Clone)]
pub struct LocalExecutionRepository {
    store: SharedStore,
}

impl LocalExecutionRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExecutionRepository for LocalExecutionRepository {
    async fn append(&self, execution: NewExecution) -> Result<ExecutionLogEntry> {
        let mut store = self.store.lock().await;
        let entry = store
            .update(move |state| {
                let entry = ExecutionLogEntry {
                    id: next_id(&state.executions),
                    pipeline_id: execution.pipeline_id,
                    applet_ids: execution.applet_ids,
                    total_price: execution.total_price,
                    timestamp: execution.timestamp,
                    status: execution.status,
                    result: execution.result,
                    result_hash: execution.result_hash,
                    user: execution.user,
                };
                state.executions.insert(0, entry.clone());
                entry
            })
            .await?;

        debug!("Logged execution {} locally", entry.id);
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<ExecutionLogEntry>> {
        Ok(self.store.lock().await.executions().to_vec())
    }

    async fn find(&self, id: u64) -> Result<Option<ExecutionLogEntry>> {
        let store = self.store.lock().await;
        Ok(store.executions().iter().find(|e| e.id == id).cloned())
    }

    async fn list_for_user(&self, user: &str) -> Result<Vec<ExecutionLogEntry>> {
        let store = self.store.lock().await;
        Ok(store
            .executions()
            .iter()
            .filter(|e| e.user.as_deref() == Some(user))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.lock().await.executions().len())
    }
}

/// Execution repository backed by the logger contract
///
/// The contract does not keep pipeline ids or results. Pipeline ids read back
/// from the contract are derived from the applet id sequence.
#[derive(Clone)]
pub struct ContractExecutionRepository {
    client: Arc<ContractClient>,
    /// Address whose history `list` returns
    user: String,
}

impl ContractExecutionRepository {
    pub fn new(client: Arc<ContractClient>, user: impl Into<String>) -> Self {
        Self {
            client,
            user: user.into(),
        }
    }
}

/// Stable pipeline id for a sequence of applet ids
fn derived_pipeline_id(applet_ids: &[AppletId]) -> String {
    let joined = applet_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("-");
    let digest = Sha256::digest(joined.as_bytes());
    format!("0x{}", &hex::encode(digest)[..16])
}

fn from_contract(raw: ContractExecution) -> Result<ExecutionLogEntry> {
    let timestamp = i64::try_from(raw.timestamp).map_err(|_| {
        RepositoryError::Malformed(format!(
            "Execution {} has an out of range timestamp {}",
            raw.id, raw.timestamp
        ))
    })?;

    // Failed runs are logged without a result hash
    let (status, result_hash) = if raw.result_hash.is_empty() {
        (ExecutionStatus::Failed, None)
    } else {
        (ExecutionStatus::Success, Some(raw.result_hash))
    };

    Ok(ExecutionLogEntry {
        id: u64::from(raw.id),
        pipeline_id: derived_pipeline_id(&raw.applet_ids),
        applet_ids: raw.applet_ids,
        total_price: Price::from_smallest_units(u128::from(raw.total_price)),
        timestamp,
        status,
        result: None,
        result_hash,
        user: Some(raw.user),
    })
}

#[async_trait]
impl ExecutionRepository for ContractExecutionRepository {
    async fn append(&self, execution: NewExecution) -> Result<ExecutionLogEntry> {
        let args = LogExecutionArgs {
            applet_ids: execution.applet_ids.clone(),
            total_price: price_to_wire(execution.total_price)?,
            result_hash: execution.result_hash.clone().unwrap_or_default(),
        };
        let id = self.client.log_execution(&args).await?;
        debug!("Logger assigned id {} to pipeline {}", id, execution.pipeline_id);

        Ok(ExecutionLogEntry {
            id: u64::from(id),
            pipeline_id: execution.pipeline_id,
            applet_ids: execution.applet_ids,
            total_price: execution.total_price,
            timestamp: execution.timestamp,
            status: execution.status,
            result: execution.result,
            result_hash: execution.result_hash,
            user: execution.user.or_else(|| Some(self.user.clone())),
        })
    }

    async fn list(&self) -> Result<Vec<ExecutionLogEntry>> {
        self.list_for_user(&self.user).await
    }

    async fn find(&self, id: u64) -> Result<Option<ExecutionLogEntry>> {
        let Ok(id) = u32::try_from(id) else {
            return Ok(None);
        };
        self.client
            .get_execution_by_id(id)
            .await?
            .map(from_contract)
            .transpose()
    }

    async fn list_for_user(&self, user: &str) -> Result<Vec<ExecutionLogEntry>> {
        self.client
            .get_executions_by_user(user)
            .await?
            .into_iter()
            .map(from_contract)
            .collect()
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.client.get_execution_count().await? as usize)
    }
}
