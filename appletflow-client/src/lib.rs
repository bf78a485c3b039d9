//! Appletflow Collaborator Clients
//!
//! Typed async HTTP clients for the external systems the engine calls but does
//! not implement:
//! - the contract gateway in front of the applet registry and execution logger
//! - a price oracle answering `coin id -> USD` lookups
//! - an optional, credential-gated summarization service
//!
//! The oracle and summarizer are exposed behind the [`PriceFeed`] and
//! [`Summarizer`] traits so callers can substitute stubs.
//!
//! # Example
//!
//! ```no_run
//! use appletflow_client::ContractClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ContractClient::new("https://sentinel.unweil.me", "registry-addr", "logger-addr");
//!
//!     for applet in client.get_applets().await? {
//!         println!("{} ({})", applet.name, applet.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod logger;
mod oracle;
mod registry;
mod summarizer;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use oracle::{HttpPriceOracle, PriceFeed};
pub use summarizer::{HttpSummarizer, Summarizer};

use appletflow_core::dto::contract::ContractCall;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the contract gateway
///
/// Queries are read-only calls; executes mutate contract state. Both are
/// `POST {endpoint}/contracts/{address}/{query|execute}` with a JSON
/// `{ method, args }` body, and the response body is the method's return value.
/// Methods are grouped by contract:
/// - Registry (list, lookup, register, toggle applets)
/// - Logger (record and read executions)
#[derive(Debug, Clone)]
pub struct ContractClient {
    /// Base URL of the gateway (e.g., "https://sentinel.unweil.me")
    endpoint: String,
    /// Address of the applet registry contract
    registry_address: String,
    /// Address of the execution logger contract
    logger_address: String,
    /// HTTP client instance
    client: Client,
}

impl ContractClient {
    /// Create a new contract client
    ///
    /// # Arguments
    /// * `endpoint` - The base URL of the contract gateway
    /// * `registry_address` - Address of the registry contract
    /// * `logger_address` - Address of the logger contract
    ///
    /// # Example
    /// ```
    /// use appletflow_client::ContractClient;
    ///
    /// let client = ContractClient::new("http://localhost:8545/", "reg", "log");
    /// assert_eq!(client.endpoint(), "http://localhost:8545");
    /// ```
    pub fn new(
        endpoint: impl Into<String>,
        registry_address: impl Into<String>,
        logger_address: impl Into<String>,
    ) -> Self {
        Self::with_client(endpoint, registry_address, logger_address, Client::new())
    }

    /// Create a new contract client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        registry_address: impl Into<String>,
        logger_address: impl Into<String>,
        client: Client,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            registry_address: registry_address.into(),
            logger_address: logger_address.into(),
            client,
        }
    }

    /// Get the base URL of the gateway
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn registry_address(&self) -> &str {
        &self.registry_address
    }

    pub fn logger_address(&self) -> &str {
        &self.logger_address
    }

    /// Run a read-only contract method
    pub async fn query<T: DeserializeOwned>(
        &self,
        address: &str,
        method: &str,
        args: serde_json::Value,
    ) -> Result<T> {
        self.call("query", address, method, args).await
    }

    /// Run a state-changing contract method
    pub async fn execute<T: DeserializeOwned>(
        &self,
        address: &str,
        method: &str,
        args: serde_json::Value,
    ) -> Result<T> {
        self.call("execute", address, method, args).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        kind: &str,
        address: &str,
        method: &str,
        args: serde_json::Value,
    ) -> Result<T> {
        if address.trim().is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "Contract address not configured for '{}'",
                method
            )));
        }

        let url = format!("{}/contracts/{}/{}", self.endpoint, address, kind);
        debug!("Contract {} '{}' at {}", kind, method, address);

        let body = ContractCall {
            method: method.to_string(),
            args,
        };
        let response = self.client.post(&url).json(&body).send().await?;

        handle_response(response).await
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Turns a collaborator response into `T`
///
/// Non-success statuses become [`ClientError::Status`] carrying the body text;
/// bodies that do not decode as `T` become [`ClientError::Decode`].
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).into_owned();
        return Err(ClientError::status(status.as_u16(), text));
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
