//! Applet registry contract methods

use crate::ContractClient;
use crate::error::{ClientError, Result};
use appletflow_core::domain::applet::AppletId;
use appletflow_core::dto::contract::{ContractApplet, RegisterAppletArgs};
use serde_json::json;

impl ContractClient {
    // =============================================================================
    // Applet Registry
    // =============================================================================

    /// List all active applets
    ///
    /// The registry filters inactive applets out itself.
    pub async fn get_applets(&self) -> Result<Vec<ContractApplet>> {
        self.query(&self.registry_address, "get_applets", json!({}))
            .await
    }

    /// Get an applet by ID
    ///
    /// # Returns
    /// `None` when the registry has no applet with this id
    pub async fn get_applet_by_id(&self, id: AppletId) -> Result<Option<ContractApplet>> {
        self.query(&self.registry_address, "get_applet_by_id", json!({ "id": id }))
            .await
    }

    /// Total number of registered applets, active or not
    pub async fn get_applet_count(&self) -> Result<u32> {
        self.query(&self.registry_address, "get_applet_count", json!({}))
            .await
    }

    /// Register a new applet
    ///
    /// # Returns
    /// The id the registry assigned
    pub async fn register_applet(&self, args: &RegisterAppletArgs) -> Result<AppletId> {
        let args = serde_json::to_value(args).map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to encode arguments: {}", e))
        })?;
        self.execute(&self.registry_address, "register_applet", args)
            .await
    }

    /// Flip the active flag of an applet
    pub async fn toggle_applet_status(&self, id: AppletId) -> Result<()> {
        let _: serde_json::Value = self
            .execute(
                &self.registry_address,
                "toggle_applet_status",
                json!({ "id": id }),
            )
            .await?;
        Ok(())
    }
}
