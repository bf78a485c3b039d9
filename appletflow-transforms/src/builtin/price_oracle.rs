//! Price oracle transform
//!
//! Treats the pipeline input as a coin identifier and quotes its USD price.
//! Unknown identifiers and failed lookups are reported inside the fragment;
//! the lookup is attempted once.

use appletflow_client::PriceFeed;
use appletflow_core::domain::applet::{AppletId, well_known};
use appletflow_core::domain::execution::{CryptoPrice, ResultFragment};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::transform::Transform;

/// Transform bound to the price-oracle applet
pub struct PriceOracleTransform {
    feed: Arc<dyn PriceFeed>,
    default_coin_id: String,
}

impl PriceOracleTransform {
    /// Creates the transform
    ///
    /// # Arguments
    /// * `feed` - Price source
    /// * `default_coin_id` - Coin looked up when the input is blank
    pub fn new(feed: Arc<dyn PriceFeed>, default_coin_id: impl Into<String>) -> Self {
        Self {
            feed,
            default_coin_id: default_coin_id.into(),
        }
    }

    /// Normalizes pipeline input into a coin identifier
    pub fn coin_id(&self, input: &str) -> String {
        let coin_id = input.trim().to_lowercase();
        if coin_id.is_empty() {
            self.default_coin_id.clone()
        } else {
            coin_id
        }
    }

    pub async fn quote(&self, input: &str) -> CryptoPrice {
        let coin_id = self.coin_id(input);
        match self.feed.usd_price(&coin_id).await {
            Ok(Some(usd)) => {
                debug!("Quoted {} at {} USD", coin_id, usd);
                CryptoPrice::quoted(coin_id, usd)
            }
            Ok(None) => {
                let message = format!("Unknown coin identifier: {}", coin_id);
                CryptoPrice::error(coin_id, message)
            }
            Err(e) => {
                warn!("Price lookup for '{}' failed: {}", coin_id, e);
                let message = format!("Price lookup failed: {}", e);
                CryptoPrice::error(coin_id, message)
            }
        }
    }
}

#[async_trait]
impl Transform for PriceOracleTransform {
    fn applet_id(&self) -> AppletId {
        well_known::PRICE_ORACLE
    }

    fn name(&self) -> &'static str {
        "price-oracle"
    }

    async fn apply(&self, input: &str) -> ResultFragment {
        ResultFragment::CryptoPrice(self.quote(input).await)
    }
}
