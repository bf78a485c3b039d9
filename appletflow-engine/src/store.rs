//! Persisted state store
//!
//! The whole catalog and execution history live in one JSON document:
//!
//! ```text
//! { "applets": [...], "executions": [...] }
//! ```
//!
//! The document is loaded in full at startup and rewritten in full after every
//! mutation. Writes go to a sibling temp file which is then renamed over the
//! target, so a crash never leaves a half-written document behind.

use appletflow_core::domain::applet::Applet;
use appletflow_core::domain::execution::ExecutionLogEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::seed;

/// Store handle shared by the local repositories
pub type SharedStore = Arc<Mutex<StateStore>>;

/// Errors raised while reading or writing the state document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// On-disk shape of the state document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub applets: Vec<Applet>,
    /// Newest first
    #[serde(default)]
    pub executions: Vec<ExecutionLogEntry>,
}

impl PersistedState {
    /// Demo catalog and history
    pub fn seeded() -> Self {
        Self {
            applets: seed::applets(),
            executions: seed::executions(chrono::Utc::now().timestamp()),
        }
    }

    fn initial(seed_demo_data: bool) -> Self {
        if seed_demo_data {
            Self::seeded()
        } else {
            Self::default()
        }
    }
}

/// Write-through store for the catalog and the execution log
pub struct StateStore {
    /// Document location; `None` keeps everything in memory
    path: Option<PathBuf>,
    state: PersistedState,
}

impl StateStore {
    /// Store that never touches the filesystem
    pub fn in_memory(seed_demo_data: bool) -> Self {
        Self {
            path: None,
            state: PersistedState::initial(seed_demo_data),
        }
    }

    /// Store backed by an explicit state, kept in memory
    pub fn from_state(state: PersistedState) -> Self {
        Self { path: None, state }
    }

    /// Loads the document at `path`
    ///
    /// A missing file yields the initial state. A malformed file is moved aside
    /// to `<file>.corrupt` and the initial state is used instead.
    pub fn load(path: impl Into<PathBuf>, seed_demo_data: bool) -> Result<Self, StoreError> {
        let path = path.into();

        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(state) => {
                    info!(
                        "Loaded {} applets and {} executions from {}",
                        state.applets.len(),
                        state.executions.len(),
                        path.display()
                    );
                    state
                }
                Err(e) => {
                    let quarantine = corrupt_path(&path);
                    warn!(
                        "State file {} is malformed ({}), moving it to {}",
                        path.display(),
                        e,
                        quarantine.display()
                    );
                    std::fs::rename(&path, &quarantine).map_err(|e| StoreError::io(&path, e))?;
                    PersistedState::initial(seed_demo_data)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting fresh", path.display());
                PersistedState::initial(seed_demo_data)
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        Ok(Self {
            path: Some(path),
            state,
        })
    }

    /// Wraps the store for sharing between repositories
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn applets(&self) -> &[Applet] {
        &self.state.applets
    }

    pub fn executions(&self) -> &[ExecutionLogEntry] {
        &self.state.executions
    }

    /// Applies `mutation` and persists the result
    ///
    /// The mutation runs on a copy; the in-memory state only changes once the
    /// copy has been written, so a failed write leaves the store as it was.
    pub async fn update<F, R>(&mut self, mutation: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut PersistedState) -> R,
    {
        let mut next = self.state.clone();
        let output = mutation(&mut next);
        self.persist(&next).await?;
        self.state = next;
        Ok(output)
    }

    /// Writes the current state to disk
    pub async fn save(&self) -> Result<(), StoreError> {
        self.persist(&self.state).await
    }

    async fn persist(&self, state: &PersistedState) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(state)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let staging = sibling(path, "tmp");
        if let Err(e) = tokio::fs::write(&staging, json).await {
            error!("Failed to write {}: {}", staging.display(), e);
            return Err(StoreError::io(&staging, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, path).await {
            error!("Failed to replace {}: {}", path.display(), e);
            return Err(StoreError::io(path, e));
        }

        debug!("Persisted state to {}", path.display());
        Ok(())
    }
}

/// `<file>.<suffix>` next to `path`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn corrupt_path(path: &Path) -> PathBuf {
    sibling(path, "corrupt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use appletflow_core::domain::price::Price;
    use tempfile::TempDir;

    fn extra_applet() -> Applet {
        Applet {
            id: 7,
            name: "Uploader".to_string(),
            description: String::new(),
            price: Price::parse("0.5").unwrap(),
            input_schema: Default::default(),
            output_schema: Default::default(),
            owner: "0xUser...".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_missing_file_uses_seed() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::load(tmp.path().join("state.json"), true).unwrap();
        assert_eq!(store.applets().len(), 6);
        assert_eq!(store.executions().len(), 2);
    }

    #[test]
    fn test_missing_file_without_seed_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::load(tmp.path().join("state.json"), false).unwrap();
        assert!(store.applets().is_empty());
        assert!(store.executions().is_empty());
    }

    #[tokio::test]
    async fn test_roundtrip_persistence() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("state.json");

        let mut store = StateStore::load(&path, true).unwrap();
        store
            .update(|state| state.applets.push(extra_applet()))
            .await
            .unwrap();

        let reloaded = StateStore::load(&path, false).unwrap();
        assert_eq!(reloaded.applets().len(), 7);
        assert_eq!(reloaded.applets()[6].name, "Uploader");
        assert_eq!(reloaded.state(), store.state());
    }

    #[tokio::test]
    async fn test_update_leaves_no_staging_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");

        let mut store = StateStore::load(&path, false).unwrap();
        store.update(|_| ()).await.unwrap();

        assert!(path.exists());
        assert!(!tmp.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_quarantined() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = StateStore::load(&path, true).unwrap();

        assert_eq!(store.applets().len(), 6);
        assert!(!path.exists());
        let quarantined = tmp.path().join("state.json.corrupt");
        assert_eq!(std::fs::read_to_string(quarantined).unwrap(), "{ not json");
    }

    #[test]
    fn test_partial_document_gets_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, r#"{"applets": []}"#).unwrap();

        let store = StateStore::load(&path, true).unwrap();
        assert!(store.applets().is_empty());
        assert!(store.executions().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_update() {
        let mut store = StateStore::in_memory(false);
        let count = store
            .update(|state| {
                state.applets.push(extra_applet());
                state.applets.len()
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(store.path().is_none());
    }
}
