//! Workbench wiring
//!
//! Builds the store, repositories, collaborators, transform registry and
//! services described by a [`Config`].

use anyhow::{Context, Result};
use appletflow_client::{
    ContractClient, HttpPriceOracle, HttpSummarizer, PriceFeed, Summarizer,
};
use appletflow_transforms::default_registry;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, DataSource};
use crate::repository::{
    AppletRepository, ContractAppletRepository, ContractExecutionRepository, ExecutionRepository,
    LocalAppletRepository, LocalExecutionRepository,
};
use crate::service::{CatalogService, HistoryService, StandardExecutionService};
use crate::store::StateStore;

/// Fully wired engine
pub struct Workbench {
    pub catalog: CatalogService,
    pub history: HistoryService,
    pub executor: Arc<StandardExecutionService>,
}

impl Workbench {
    /// Wires the engine with the HTTP collaborators named in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let http = http_client(config)?;
        let summarizer = Arc::new(HttpSummarizer::with_client(
            config.summarizer_url.clone(),
            config.summarizer_api_key.clone(),
            http.clone(),
        ));
        let price_feed = Arc::new(HttpPriceOracle::with_client(
            config.price_oracle_url.clone(),
            http,
        ));

        Self::with_collaborators(config, summarizer, price_feed)
    }

    /// Wires the engine around the given summarizer and price feed
    pub fn with_collaborators(
        config: &Config,
        summarizer: Arc<dyn Summarizer>,
        price_feed: Arc<dyn PriceFeed>,
    ) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let (applets, executions) = repositories(config)?;

        let transforms = default_registry(summarizer, price_feed, config.default_coin_id.clone())
            .context("Failed to build transform registry")?;
        info!(
            "Registered transforms for applets {:?}",
            transforms.applet_ids()
        );

        let catalog = CatalogService::new(applets, config.owner());
        let history = HistoryService::new(executions);

        let mut executor = StandardExecutionService::new(Arc::new(transforms), history.clone())
            .with_settlement_delay(config.settlement_delay)
            .with_timeout(config.execution_timeout)
            .with_strict_schema(config.strict_schema);
        if let Some(owner) = &config.owner_address {
            executor = executor.with_user(owner.clone());
        }

        Ok(Self {
            catalog,
            history,
            executor: Arc::new(executor),
        })
    }
}

fn http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.collaborator_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

fn repositories(
    config: &Config,
) -> Result<(Arc<dyn AppletRepository>, Arc<dyn ExecutionRepository>)> {
    match config.data_source {
        DataSource::Local => {
            let store = match &config.state_path {
                Some(path) => StateStore::load(path, config.seed_demo_data)
                    .with_context(|| format!("Failed to load state from {}", path.display()))?,
                None => StateStore::in_memory(config.seed_demo_data),
            };
            info!(
                "Using local state ({} applets, {} executions)",
                store.applets().len(),
                store.executions().len()
            );

            let store = store.shared();
            Ok((
                Arc::new(LocalAppletRepository::new(store.clone())),
                Arc::new(LocalExecutionRepository::new(store)),
            ))
        }
        DataSource::Contract => {
            let client = Arc::new(ContractClient::with_client(
                config.contract_endpoint.clone(),
                config.registry_address.clone(),
                config.logger_address.clone(),
                http_client(config)?,
            ));
            info!("Using contracts at {}", client.endpoint());

            Ok((
                Arc::new(ContractAppletRepository::new(client.clone())),
                Arc::new(ContractExecutionRepository::new(client, config.owner())),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_defaults() {
        assert!(Workbench::from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = Config {
            data_source: DataSource::Contract,
            ..Config::default()
        };
        assert!(Workbench::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_seeded_catalog_is_available() {
        let workbench = Workbench::from_config(&Config::default()).unwrap();
        assert_eq!(workbench.catalog.applet_count().await.unwrap(), 6);
        assert_eq!(workbench.history.count().await.unwrap(), 2);
    }
}
