//! Price oracle client
//!
//! Keyed USD lookups against a CoinGecko-compatible `simple/price` endpoint.
//! A response without the requested key means the coin id is unknown.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::handle_response;

/// Source of USD prices for coin identifiers
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Looks up the USD price of a coin
    ///
    /// # Returns
    /// `Ok(None)` when the feed does not know `coin_id`
    async fn usd_price(&self, coin_id: &str) -> Result<Option<f64>>;
}

/// HTTP implementation of PriceFeed
#[derive(Debug, Clone)]
pub struct HttpPriceOracle {
    client: Client,
    base_url: String,
}

impl HttpPriceOracle {
    /// Creates a new price oracle client
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://api.coingecko.com/api/v3"
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a price oracle client sharing a configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceOracle {
    async fn usd_price(&self, coin_id: &str) -> Result<Option<f64>> {
        let url = format!("{}/simple/price", self.base_url);
        debug!("Querying price oracle for '{}'", coin_id);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await?;

        let prices: HashMap<String, HashMap<String, f64>> = handle_response(response).await?;

        Ok(prices
            .get(coin_id)
            .and_then(|quotes| quotes.get("usd"))
            .copied())
    }
}
