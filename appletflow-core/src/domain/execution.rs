//! Execution domain types

use serde::{Deserialize, Serialize};

use crate::domain::applet::AppletId;
use crate::domain::price::Price;

/// Immutable record of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntry {
    pub id: u64,
    pub pipeline_id: String,
    pub applet_ids: Vec<AppletId>,
    pub total_price: Price,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExecutionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Final status of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// Aggregated output of a pipeline run
///
/// Each field is present only when the applet producing it was part of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_price: Option<CryptoPrice>,
}

impl ExecutionResult {
    /// Folds one transform output into the result
    pub fn merge(&mut self, fragment: ResultFragment) {
        match fragment {
            ResultFragment::Sentiment(report) => self.sentiment = Some(report),
            ResultFragment::Summary(summary) => self.summary = Some(summary),
            ResultFragment::CryptoPrice(price) => self.crypto_price = Some(price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentiment.is_none() && self.summary.is_none() && self.crypto_price.is_none()
    }
}

impl FromIterator<ResultFragment> for ExecutionResult {
    fn from_iter<T: IntoIterator<Item = ResultFragment>>(iter: T) -> Self {
        let mut result = ExecutionResult::default();
        for fragment in iter {
            result.merge(fragment);
        }
        result
    }
}

/// Output of a single applet transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultFragment {
    Sentiment(SentimentReport),
    Summary(String),
    CryptoPrice(CryptoPrice),
}

/// Lexicon-based sentiment score of a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub score: i32,
    /// Score divided by the number of tokens
    pub comparative: f64,
    pub tokens: Vec<String>,
    /// Tokens found in the lexicon, in input order
    pub words: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Outcome of a price-oracle lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CryptoPrice {
    Quoted {
        coin_id: String,
        usd: f64,
        formatted: String,
    },
    Error {
        coin_id: String,
        message: String,
    },
}

impl CryptoPrice {
    pub fn quoted(coin_id: impl Into<String>, usd: f64) -> Self {
        CryptoPrice::Quoted {
            coin_id: coin_id.into(),
            usd,
            formatted: format!("${usd}"),
        }
    }

    pub fn error(coin_id: impl Into<String>, message: impl Into<String>) -> Self {
        CryptoPrice::Error {
            coin_id: coin_id.into(),
            message: message.into(),
        }
    }

    pub fn coin_id(&self) -> &str {
        match self {
            CryptoPrice::Quoted { coin_id, .. } | CryptoPrice::Error { coin_id, .. } => coin_id,
        }
    }

    /// Text shown to the user: the formatted quote or the error message
    pub fn display(&self) -> &str {
        match self {
            CryptoPrice::Quoted { formatted, .. } => formatted,
            CryptoPrice::Error { message, .. } => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CryptoPrice::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_formatting() {
        assert_eq!(CryptoPrice::quoted("bitcoin", 50000.0).display(), "$50000");
        assert_eq!(CryptoPrice::quoted("dogecoin", 0.15).display(), "$0.15");
    }

    #[test]
    fn test_merge_fragments() {
        let result: ExecutionResult = [
            ResultFragment::Summary("First. Second.".to_string()),
            ResultFragment::CryptoPrice(CryptoPrice::error(
                "notacoin",
                "Unknown coin identifier: notacoin",
            )),
        ]
        .into_iter()
        .collect();

        assert!(result.sentiment.is_none());
        assert_eq!(result.summary.as_deref(), Some("First. Second."));
        assert!(result.crypto_price.unwrap().is_error());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let result = ExecutionResult {
            summary: Some("Short.".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "summary": "Short." }));
        assert!(ExecutionResult::default().is_empty());
    }

    #[test]
    fn test_log_entry_wire_format() {
        let entry = ExecutionLogEntry {
            id: 101,
            pipeline_id: "0x8f...2a".to_string(),
            applet_ids: vec![1, 3],
            total_price: Price::parse("0.07").unwrap(),
            timestamp: 1_700_000_000,
            status: ExecutionStatus::Success,
            result: None,
            result_hash: None,
            user: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pipelineId"], "0x8f...2a");
        assert_eq!(json["appletIds"], serde_json::json!([1, 3]));
        assert_eq!(json["totalPrice"], "0.07");
        assert_eq!(json["status"], "Success");
        assert!(json.get("result").is_none());
    }
}
