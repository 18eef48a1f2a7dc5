//! # Runtime Configuration
//!
//! Unified configuration for every subsystem, built from defaults plus
//! `LF_*` environment overrides.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `LF_LEDGER_URL` | `ledger.endpoint` | required |
//! | `LF_LEDGER_TIMEOUT_MS` | `ledger.timeout` | 10s |
//! | `LF_MAX_CONCURRENT_FETCHES` | `reconciler.max_concurrent_fetches` | 8 |
//! | `LF_STRICT_DECODE` | `reconciler.decode_policy` | lenient |
//! | `LF_HTTP_HOST` | `gateway.http.host` | 127.0.0.1 |
//! | `LF_HTTP_PORT` | `gateway.http.port` | 8080 |
//! | `LF_REQUEST_TIMEOUT_MS` | `gateway.timeouts.request` | 30s |
//! | `LF_LOG_LEVEL` | `telemetry.log_level` | info |
//! | `LF_JSON_LOGS` | `telemetry.json_logs` | false |

use lf_01_hash_list_decoder::DecodePolicy;
use lf_02_tx_reconciler::ReconcilerConfig;
use lf_03_ledger_rpc::LedgerRpcConfig;
use lf_04_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Remote ledger connection.
    pub ledger: LedgerRpcConfig,
    /// Reconciler tuning.
    pub reconciler: ReconcilerConfig,
    /// HTTP gateway.
    pub gateway: GatewayConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to log lines
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `lf_02_tx_reconciler=debug`)
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ledger-fetcher".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Concurrency limit is zero.
    #[error("max_concurrent_fetches must be at least 1")]
    ZeroConcurrency,

    #[error(transparent)]
    Ledger(#[from] lf_03_ledger_rpc::ConfigError),

    #[error(transparent)]
    Gateway(#[from] lf_04_api_gateway::ConfigError),
}

impl RuntimeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variables, then validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.ledger.endpoint = lookup("LF_LEDGER_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("LF_LEDGER_URL"))?;

        if let Some(ms) = parse_var::<u64, _>(&lookup, "LF_LEDGER_TIMEOUT_MS")? {
            config.ledger.timeout = Duration::from_millis(ms);
        }
        if let Some(limit) = parse_var(&lookup, "LF_MAX_CONCURRENT_FETCHES")? {
            config.reconciler.max_concurrent_fetches = limit;
        }
        if let Some(strict) = parse_flag(&lookup, "LF_STRICT_DECODE")? {
            config.reconciler.decode_policy = if strict {
                DecodePolicy::Strict
            } else {
                DecodePolicy::Lenient
            };
        }
        if let Some(host) = parse_var(&lookup, "LF_HTTP_HOST")? {
            config.gateway.http.host = host;
        }
        if let Some(port) = parse_var(&lookup, "LF_HTTP_PORT")? {
            config.gateway.http.port = port;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "LF_REQUEST_TIMEOUT_MS")? {
            config.gateway.timeouts.request = Duration::from_millis(ms);
        }
        if let Some(level) = lookup("LF_LOG_LEVEL") {
            config.telemetry.log_level = level;
        }
        if let Some(json) = parse_flag(&lookup, "LF_JSON_LOGS")? {
            config.telemetry.json_logs = json;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.validate()?;
        if self.reconciler.max_concurrent_fetches == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.gateway.validate()?;
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            reason: e.to_string(),
            value,
        })
}

fn parse_flag<F>(lookup: &F, name: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidVar {
            name,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
