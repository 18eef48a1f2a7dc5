//! JSON-RPC client for the remote ledger node.

use crate::config::{ConfigError, LedgerRpcConfig};
use async_trait::async_trait;
use lf_02_tx_reconciler::{LedgerClient, LedgerError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::{RawReceipt, RawTransaction};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
///
/// `result: null` and an absent `result` both deserialize to `None`.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Ledger client speaking Ethereum JSON-RPC over HTTP.
pub struct LedgerRpcClient {
    http_client: reqwest::Client,
    endpoint: String,
    request_id: AtomicU64,
}

impl LedgerRpcClient {
    /// Create a client from validated configuration.
    pub fn new(config: &LedgerRpcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim().to_string(),
            request_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Make a JSON-RPC call. A null result is `Ok(None)`.
    async fn call<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Option<R>, LedgerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, id, %status, "Ledger node returned non-success status");
            return Err(LedgerError::Transport {
                message: format!("HTTP status {}", status),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let result = parse_response(&body);
        debug!(method, id, ok = result.is_ok(), "Ledger RPC call finished");
        result
    }
}

/// Decode a JSON-RPC response body.
pub(crate) fn parse_response<R: DeserializeOwned>(body: &[u8]) -> Result<Option<R>, LedgerError> {
    let response: JsonRpcResponse<R> =
        serde_json::from_slice(body).map_err(|e| LedgerError::MalformedResponse {
            message: e.to_string(),
        })?;

    if let Some(error) = response.error {
        return Err(LedgerError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    Ok(response.result)
}

fn transport_error(err: reqwest::Error) -> LedgerError {
    if err.is_timeout() {
        LedgerError::Timeout
    } else if err.is_decode() {
        LedgerError::MalformedResponse {
            message: err.to_string(),
        }
    } else {
        LedgerError::Transport {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl LedgerClient for LedgerRpcClient {
    async fn get_transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<RawTransaction>, LedgerError> {
        self.call("eth_getTransactionByHash", [hash]).await
    }

    async fn get_transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<RawReceipt>, LedgerError> {
        self.call("eth_getTransactionReceipt", [hash]).await
    }
}
