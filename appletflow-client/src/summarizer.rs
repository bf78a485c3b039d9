//! Summarization client
//!
//! Talks to a hosted summarization model (Hugging Face inference style). The
//! service is credential-gated: without an API key every call fails fast with
//! [`ClientError::MissingCredential`] and no request is sent.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::handle_response;

/// Remote text summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes `text`
    async fn summarize(&self, text: &str) -> Result<String>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Batch(Vec<SummaryItem>),
    Single(SummaryItem),
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

/// HTTP implementation of Summarizer
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    /// Creates a new summarizer client
    ///
    /// # Arguments
    /// * `url` - Full model endpoint URL
    /// * `api_key` - Bearer token; `None` disables remote calls
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(url, api_key, Client::new())
    }

    /// Creates a summarizer client sharing a configured reqwest Client
    pub fn with_client(url: impl Into<String>, api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ClientError::MissingCredential("summarizer API key"))?;

        debug!("Requesting remote summary of {} bytes", text.len());

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&json!({ "inputs": text }))
            .send()
            .await?;

        let summary = match handle_response::<SummaryResponse>(response).await? {
            SummaryResponse::Single(item) => item.summary_text,
            SummaryResponse::Batch(items) => items
                .into_iter()
                .next()
                .map(|item| item.summary_text)
                .ok_or_else(|| ClientError::Decode("Empty summary list".to_string()))?,
        };

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_counts_as_missing() {
        let summarizer = HttpSummarizer::new("http://localhost/model", Some("  ".to_string()));
        assert!(!summarizer.has_credential());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_fast() {
        let summarizer = HttpSummarizer::new("http://localhost/model", None);
        let err = summarizer.summarize("Some text.").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential(_)));
    }
}
