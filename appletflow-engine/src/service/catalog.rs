//! Catalog service
//!
//! Business logic for browsing and registering applets.

use appletflow_core::domain::applet::{Applet, AppletId};
use appletflow_core::domain::pipeline::Pipeline;
use appletflow_core::domain::price::Price;
use appletflow_core::dto::applet::{NewApplet, RegisterApplet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::repository::{AppletRepository, RepositoryError};

/// Service error type
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Applet {0} not found")]
    NotFound(AppletId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Applet catalog operations
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn AppletRepository>,
    /// Recorded as owner of newly registered applets
    owner: String,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn AppletRepository>, owner: impl Into<String>) -> Self {
        Self {
            repository,
            owner: owner.into(),
        }
    }

    /// All applets in catalog order, inactive ones included
    pub async fn list_applets(&self) -> Result<Vec<Applet>> {
        Ok(self.repository.list().await?)
    }

    /// Applets that can currently be added to a pipeline
    pub async fn active_applets(&self) -> Result<Vec<Applet>> {
        let applets = self.repository.list().await?;
        Ok(applets.into_iter().filter(|a| a.is_active).collect())
    }

    pub async fn find_applet(&self, id: AppletId) -> Result<Option<Applet>> {
        Ok(self.repository.find(id).await?)
    }

    /// Case-insensitive match on name or description
    pub async fn search(&self, query: &str) -> Result<Vec<Applet>> {
        let applets = self.repository.list().await?;
        Ok(applets.into_iter().filter(|a| a.matches(query)).collect())
    }

    pub async fn applet_count(&self) -> Result<usize> {
        Ok(self.repository.count().await?)
    }

    /// Registers a new applet
    ///
    /// # Errors
    /// `Validation` when the name or price is blank or the price does not parse;
    /// the catalog is left unchanged.
    pub async fn register_applet(&self, req: RegisterApplet) -> Result<Applet> {
        let applet = validate_registration(req, &self.owner)?;
        let applet = self.repository.register(applet).await?;

        info!(
            "Applet registered: {} ({}) at {}",
            applet.name, applet.id, applet.price
        );

        Ok(applet)
    }

    /// Flips an applet between active and inactive
    pub async fn toggle_applet_status(&self, id: AppletId) -> Result<Applet> {
        let applet = self
            .repository
            .toggle(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        info!(
            "Applet {} is now {}",
            applet.id,
            if applet.is_active { "active" } else { "inactive" }
        );

        Ok(applet)
    }

    /// Resolves applet ids, in order, into a pipeline
    ///
    /// Duplicates are kept. Any unknown id fails the whole lookup.
    pub async fn pipeline_from_ids(&self, ids: &[AppletId]) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new();
        for &id in ids {
            let applet = self
                .repository
                .find(id)
                .await?
                .ok_or(CatalogError::NotFound(id))?;
            pipeline.append(applet);
        }
        Ok(pipeline)
    }
}

// =============================================================================
// Validation
// =============================================================================

fn validate_registration(req: RegisterApplet, owner: &str) -> Result<NewApplet> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation(
            "Applet name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(CatalogError::Validation(
            "Applet name is too long (max 255 characters)".to_string(),
        ));
    }

    let raw_price = req.price.trim();
    if raw_price.is_empty() {
        return Err(CatalogError::Validation(
            "Applet price cannot be empty".to_string(),
        ));
    }

    let price = Price::parse(raw_price).map_err(|e| {
        warn!("Rejected registration of '{}': {}", name, e);
        CatalogError::Validation(format!("Invalid price '{}': {}", raw_price, e))
    })?;

    Ok(NewApplet {
        name: name.to_string(),
        description: req.description.trim().to_string(),
        price,
        input_schema: req.input_schema,
        output_schema: req.output_schema,
        owner: owner.to_string(),
    })
}
