//! History service
//!
//! Read side of the execution log, plus the append used by the executor.

use appletflow_core::domain::execution::ExecutionLogEntry;
use appletflow_core::dto::execution::NewExecution;
use std::sync::Arc;

use crate::repository::{ExecutionRepository, Result};

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn ExecutionRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn ExecutionRepository>) -> Self {
        Self { repository }
    }

    /// Records an execution; the repository assigns the id
    pub async fn append(&self, execution: NewExecution) -> Result<ExecutionLogEntry> {
        self.repository.append(execution).await
    }

    /// All entries, newest first
    ///
    /// Entries with equal timestamps keep their storage order.
    pub async fn list(&self) -> Result<Vec<ExecutionLogEntry>> {
        let mut entries = self.repository.list().await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub async fn find(&self, id: u64) -> Result<Option<ExecutionLogEntry>> {
        self.repository.find(id).await
    }

    /// Entries submitted by `user`, newest first
    pub async fn list_for_user(&self, user: &str) -> Result<Vec<ExecutionLogEntry>> {
        let mut entries = self.repository.list_for_user(user).await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub async fn count(&self) -> Result<usize> {
        self.repository.count().await
    }
}

fn sort_newest_first(entries: &mut [ExecutionLogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
