//! Built-in applet transforms
//!
//! Each transform is bound to one of the well-known applet ids:
//! - Sentiment analysis (lexicon scoring, fully local)
//! - Summarizer (remote model with a local two-sentence fallback)
//! - Price oracle (remote USD lookup, errors reported inline)

mod lexicon;
pub mod price_oracle;
pub mod sentiment;
pub mod summarize;

pub use price_oracle::PriceOracleTransform;
pub use sentiment::{SentimentAnalyzer, SentimentTransform};
pub use summarize::{SummarizeTransform, heuristic_summary};

use appletflow_client::{PriceFeed, Summarizer};
use std::sync::Arc;

use crate::transform::{TransformError, TransformRegistry};

/// Creates a registry holding every built-in transform
pub fn default_registry(
    summarizer: Arc<dyn Summarizer>,
    price_feed: Arc<dyn PriceFeed>,
    default_coin_id: impl Into<String>,
) -> Result<TransformRegistry, TransformError> {
    let mut registry = TransformRegistry::new();
    registry.register(SentimentTransform::new())?;
    registry.register(SummarizeTransform::new(summarizer))?;
    registry.register(PriceOracleTransform::new(price_feed, default_coin_id))?;
    Ok(registry)
}
