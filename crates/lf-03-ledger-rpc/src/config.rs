//! Ledger RPC configuration with validation.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Remote ledger connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerRpcConfig {
    /// JSON-RPC endpoint, e.g. `http://127.0.0.1:8545`
    pub endpoint: String,
    /// Per-request timeout (connect + response)
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for LedgerRpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8545".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LedgerRpcConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{} is not http(s)",
                endpoint
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{} has no host",
                endpoint
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "ledger timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Endpoint is not an absolute http(s) URL
    #[error("invalid ledger endpoint: {0}")]
    InvalidEndpoint(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
