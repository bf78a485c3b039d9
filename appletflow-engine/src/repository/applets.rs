//! Applet repository
//!
//! Stores and retrieves applets. Ids are assigned by the backing store:
//! the local store uses catalog size + 1 (past any id already in use), the
//! registry contract assigns its own.

use appletflow_client::ContractClient;
use appletflow_core::domain::applet::{Applet, AppletId};
use appletflow_core::dto::applet::NewApplet;
use appletflow_core::dto::contract::RegisterAppletArgs;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::Result;
use crate::store::SharedStore;

/// Repository trait for applet persistence
#[async_trait]
pub trait AppletRepository: Send + Sync {
    /// All applets in catalog order
    async fn list(&self) -> Result<Vec<Applet>>;

    /// Finds an applet by ID
    async fn find(&self, id: AppletId) -> Result<Option<Applet>>;

    /// Number of registered applets
    async fn count(&self) -> Result<usize>;

    /// Stores a validated applet and returns it with its assigned id
    async fn register(&self, applet: NewApplet) -> Result<Applet>;

    /// Flips the active flag
    ///
    /// # Returns
    /// The updated applet, or `None` if no applet has this id
    async fn toggle(&self, id: AppletId) -> Result<Option<Applet>>;
}

/// Size + 1 for a dense catalog, past the highest id when a loaded catalog has gaps
fn next_id(existing: &[Applet]) -> AppletId {
    let size = existing.len() as AppletId;
    let highest = existing.iter().map(|a| a.id).max().unwrap_or(0);
    size.max(highest) + 1
}

/// Applet repository backed by the local state store
#[derive(Clone)]
pub struct LocalAppletRepository {
    store: SharedStore,
}

impl LocalAppletRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AppletRepository for LocalAppletRepository {
    async fn list(&self) -> Result<Vec<Applet>> {
        Ok(self.store.lock().await.applets().to_vec())
    }

    async fn find(&self, id: AppletId) -> Result<Option<Applet>> {
        let store = self.store.lock().await;
        Ok(store.applets().iter().find(|a| a.id == id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.lock().await.applets().len())
    }

    async fn register(&self, applet: NewApplet) -> Result<Applet> {
        let mut store = self.store.lock().await;
        let applet = store
            .update(move |state| {
                let applet = Applet {
                    id: next_id(&state.applets),
                    name: applet.name,
                    description: applet.description,
                    price: applet.price,
                    input_schema: applet.input_schema,
                    output_schema: applet.output_schema,
                    owner: applet.owner,
                    is_active: true,
                };
                state.applets.push(applet.clone());
                applet
            })
            .await?;

        debug!("Stored applet {} locally", applet.id);
        Ok(applet)
    }

    async fn toggle(&self, id: AppletId) -> Result<Option<Applet>> {
        let mut store = self.store.lock().await;
        if !store.applets().iter().any(|a| a.id == id) {
            return Ok(None);
        }

        let applet = store
            .update(|state| {
                state.applets.iter_mut().find(|a| a.id == id).map(|applet| {
                    applet.is_active = !applet.is_active;
                    applet.clone()
                })
            })
            .await?;
        Ok(applet)
    }
}

/// Applet repository backed by the registry contract
///
/// The registry's `get_applets` only returns active applets, so `list` does too.
#[derive(Clone)]
pub struct ContractAppletRepository {
    client: Arc<ContractClient>,
}

impl ContractAppletRepository {
    pub fn new(client: Arc<ContractClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AppletRepository for ContractAppletRepository {
    async fn list(&self) -> Result<Vec<Applet>> {
        let applets = self.client.get_applets().await?;
        Ok(applets.into_iter().map(Applet::from).collect())
    }

    async fn find(&self, id: AppletId) -> Result<Option<Applet>> {
        let applet = self.client.get_applet_by_id(id).await?;
        Ok(applet.map(Applet::from))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.client.get_applet_count().await? as usize)
    }

    async fn register(&self, applet: NewApplet) -> Result<Applet> {
        let args = RegisterAppletArgs::try_from(&applet)?;
        let id = self.client.register_applet(&args).await?;
        debug!("Registry assigned id {} to '{}'", id, applet.name);

        Ok(Applet {
            id,
            name: applet.name,
            description: applet.description,
            price: applet.price,
            input_schema: applet.input_schema,
            output_schema: applet.output_schema,
            owner: applet.owner,
            is_active: true,
        })
    }

    async fn toggle(&self, id: AppletId) -> Result<Option<Applet>> {
        if self.client.get_applet_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.client.toggle_applet_status(id).await?;
        self.find(id).await
    }
}
