//! Engine configuration
//!
//! Defines where state lives, which data source backs the catalog and the
//! execution log, executor timing, and collaborator endpoints.

use anyhow::Context;
use appletflow_core::domain::applet::PLACEHOLDER_OWNER;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Backing store for applets and execution records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// JSON state document (or memory)
    #[default]
    Local,
    /// Registry and logger contracts through the gateway
    Contract,
}

impl FromStr for DataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DataSource::Local),
            "contract" => Ok(DataSource::Contract),
            other => anyhow::bail!("Unknown data source '{}' (expected local or contract)", other),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON state document; `None` keeps state in memory
    pub state_path: Option<PathBuf>,

    pub data_source: DataSource,

    /// Load the demo catalog and history when no state exists yet
    pub seed_demo_data: bool,

    /// Wallet address recorded as applet owner and execution user
    pub owner_address: Option<String>,

    /// Simulated settlement latency before transforms run
    pub settlement_delay: Duration,

    /// Upper bound for a whole execution; `None` waits indefinitely
    pub execution_timeout: Option<Duration>,

    /// Refuse to execute pipelines with schema warnings
    pub strict_schema: bool,

    /// Contract gateway base URL (e.g., "https://sentinel.unweil.me")
    pub contract_endpoint: String,
    pub registry_address: String,
    pub logger_address: String,

    pub price_oracle_url: String,

    /// Coin looked up when the pipeline input is blank
    pub default_coin_id: String,

    pub summarizer_url: String,

    /// Without a key the summarizer always uses the local fallback
    pub summarizer_api_key: Option<String>,

    /// Per-request timeout for every collaborator call
    pub collaborator_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            state_path: None,
            data_source: DataSource::Local,
            seed_demo_data: true,
            owner_address: None,
            settlement_delay: Duration::from_millis(1500),
            execution_timeout: None,
            strict_schema: false,
            contract_endpoint: "https://sentinel.unweil.me".to_string(),
            registry_address: String::new(),
            logger_address: String::new(),
            price_oracle_url: "https://api.coingecko.com/api/v3".to_string(),
            default_coin_id: "bitcoin".to_string(),
            summarizer_url:
                "https://api-inference.huggingface.co/models/facebook/bart-large-cnn".to_string(),
            summarizer_api_key: None,
            collaborator_timeout: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Every variable is optional:
    /// - APPLETFLOW_STATE_PATH (default: in memory)
    /// - APPLETFLOW_DATA_SOURCE (local | contract, default: local)
    /// - APPLETFLOW_SEED_DEMO_DATA (default: true)
    /// - APPLETFLOW_OWNER_ADDRESS
    /// - APPLETFLOW_SETTLEMENT_DELAY_MS (default: 1500)
    /// - APPLETFLOW_EXECUTION_TIMEOUT (seconds, default: none)
    /// - APPLETFLOW_STRICT_SCHEMA (default: false)
    /// - APPLETFLOW_CONTRACT_ENDPOINT, APPLETFLOW_REGISTRY_ADDRESS, APPLETFLOW_LOGGER_ADDRESS
    /// - APPLETFLOW_PRICE_ORACLE_URL, APPLETFLOW_DEFAULT_COIN_ID
    /// - APPLETFLOW_SUMMARIZER_URL, APPLETFLOW_SUMMARIZER_API_KEY
    /// - APPLETFLOW_COLLABORATOR_TIMEOUT (seconds, default: none)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let text = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let seconds = |key: &str| {
            text(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        let data_source = match text("APPLETFLOW_DATA_SOURCE") {
            Some(raw) => raw
                .parse::<DataSource>()
                .context("Invalid APPLETFLOW_DATA_SOURCE")?,
            None => defaults.data_source,
        };

        let settlement_delay = text("APPLETFLOW_SETTLEMENT_DELAY_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.settlement_delay);

        Ok(Self {
            state_path: text("APPLETFLOW_STATE_PATH").map(PathBuf::from),
            data_source,
            seed_demo_data: text("APPLETFLOW_SEED_DEMO_DATA")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.seed_demo_data),
            owner_address: text("APPLETFLOW_OWNER_ADDRESS"),
            settlement_delay,
            execution_timeout: seconds("APPLETFLOW_EXECUTION_TIMEOUT"),
            strict_schema: text("APPLETFLOW_STRICT_SCHEMA")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.strict_schema),
            contract_endpoint: text("APPLETFLOW_CONTRACT_ENDPOINT")
                .unwrap_or(defaults.contract_endpoint),
            registry_address: text("APPLETFLOW_REGISTRY_ADDRESS").unwrap_or_default(),
            logger_address: text("APPLETFLOW_LOGGER_ADDRESS").unwrap_or_default(),
            price_oracle_url: text("APPLETFLOW_PRICE_ORACLE_URL")
                .unwrap_or(defaults.price_oracle_url),
            default_coin_id: text("APPLETFLOW_DEFAULT_COIN_ID")
                .map(|s| s.to_lowercase())
                .unwrap_or(defaults.default_coin_id),
            summarizer_url: text("APPLETFLOW_SUMMARIZER_URL").unwrap_or(defaults.summarizer_url),
            summarizer_api_key: text("APPLETFLOW_SUMMARIZER_API_KEY"),
            collaborator_timeout: seconds("APPLETFLOW_COLLABORATOR_TIMEOUT"),
        })
    }

    /// Owner address, or the placeholder when none is configured
    pub fn owner(&self) -> &str {
        self.owner_address.as_deref().unwrap_or(PLACEHOLDER_OWNER)
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    pub fn with_seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub fn with_owner_address(mut self, owner: impl Into<String>) -> Self {
        self.owner_address = Some(owner.into());
        self
    }

    pub fn with_settlement_delay(mut self, delay: Duration) -> Self {
        self.settlement_delay = delay;
        self
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = Some(timeout);
        self
    }

    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Switches to the contract data source
    pub fn with_contracts(
        mut self,
        endpoint: impl Into<String>,
        registry_address: impl Into<String>,
        logger_address: impl Into<String>,
    ) -> Self {
        self.data_source = DataSource::Contract;
        self.contract_endpoint = endpoint.into();
        self.registry_address = registry_address.into();
        self.logger_address = logger_address.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("contract_endpoint", &self.contract_endpoint),
            ("price_oracle_url", &self.price_oracle_url),
            ("summarizer_url", &self.summarizer_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.data_source == DataSource::Contract {
            if self.registry_address.trim().is_empty() {
                anyhow::bail!("registry_address is required for the contract data source");
            }
            if self.logger_address.trim().is_empty() {
                anyhow::bail!("logger_address is required for the contract data source");
            }
        }

        if self.default_coin_id.trim().is_empty() {
            anyhow::bail!("default_coin_id cannot be empty");
        }

        if self.execution_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("execution_timeout must be greater than 0");
        }

        if self.collaborator_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("collaborator_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
