//! # JSON-RPC Node Flows
//!
//! The production wiring (`FetcherContainer`) talks HTTP to a local mock
//! ledger node serving `eth_getTransactionByHash` and
//! `eth_getTransactionReceipt`. Requests are driven through the gateway router.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Canned JSON-RPC answers keyed by transaction hash.
#[derive(Default)]
pub struct MockLedgerNode {
    transactions: RwLock<HashMap<String, Value>>,
    receipts: RwLock<HashMap<String, Value>>,
    errors: RwLock<HashMap<String, (i64, String)>>,
    calls: AtomicUsize,
}

impl MockLedgerNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(self, hash: &str, tx: Value) -> Self {
        self.transactions.write().insert(hash.to_string(), tx);
        self
    }

    pub fn with_receipt(self, hash: &str, receipt: Value) -> Self {
        self.receipts.write().insert(hash.to_string(), receipt);
        self
    }

    /// Answer every call for `hash` with a JSON-RPC error object.
    pub fn with_error(self, hash: &str, code: i64, message: &str) -> Self {
        self.errors
            .write()
            .insert(hash.to_string(), (code, message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &Value) -> Value {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = request["id"].clone();
        let hash = request["params"][0].as_str().unwrap_or_default();

        if let Some((code, message)) = self.errors.read().get(hash) {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": code, "message": message },
            });
        }

        let result = match request["method"].as_str() {
            Some("eth_getTransactionByHash") => self.transactions.read().get(hash).cloned(),
            Some("eth_getTransactionReceipt") => self.receipts.read().get(hash).cloned(),
            _ => {
                return json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": { "code": -32601, "message": "method not found" },
                })
            }
        };
        json!({ "jsonrpc": "2.0", "id": id, "result": result.unwrap_or(Value::Null) })
    }
}

async fn handle_rpc(
    State(node): State<Arc<MockLedgerNode>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    Json(node.answer(&request))
}

/// Serve `node` on an ephemeral loopback port.
pub async fn spawn_node(node: Arc<MockLedgerNode>) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route("/", post(handle_rpc)).with_state(node);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "mock ledger node stopped");
        }
    });
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::support::{get, hashes_of};
    use axum::http::StatusCode;
    use fetcher_runtime::{FetcherContainer, RuntimeConfig};
    use lf_02_tx_reconciler::test_utils::{raw_transaction, success_receipt, tx_hash};
    use lf_02_tx_reconciler::LedgerClient;
    use lf_03_ledger_rpc::{LedgerRpcClient, LedgerRpcConfig};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn tx_json(hash: &str) -> Value {
        serde_json::to_value(raw_transaction(hash)).unwrap()
    }

    fn receipt_json(logs: usize) -> Value {
        serde_json::to_value(success_receipt(logs)).unwrap()
    }

    async fn container_for(node: MockLedgerNode) -> (FetcherContainer, Arc<MockLedgerNode>) {
        let node = Arc::new(node);
        let addr = spawn_node(Arc::clone(&node)).await.unwrap();
        let url = format!("http://{}", addr);
        let config = RuntimeConfig::from_lookup(|name| match name {
            "LF_LEDGER_URL" => Some(url.clone()),
            "LF_LEDGER_TIMEOUT_MS" => Some("2000".to_string()),
            "LF_MAX_CONCURRENT_FETCHES" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();
        (FetcherContainer::build(config).unwrap(), node)
    }

    // =========================================================================
    // CLIENT AGAINST NODE
    // =========================================================================

    #[tokio::test]
    async fn test_client_reads_transaction_and_receipt() {
        let h1 = tx_hash(0x01);
        let node = Arc::new(
            MockLedgerNode::new()
                .with_transaction(&h1, tx_json(&h1))
                .with_receipt(&h1, receipt_json(2)),
        );
        let addr = spawn_node(Arc::clone(&node)).await.unwrap();
        let config = LedgerRpcConfig::new(format!("http://{}", addr));
        let client = LedgerRpcClient::new(&config).unwrap();

        let tx = client.get_transaction_by_hash(&h1).await.unwrap().unwrap();
        assert_eq!(tx, raw_transaction(&h1));
        let receipt = client.get_transaction_receipt(&h1).await.unwrap().unwrap();
        assert_eq!(receipt.logs.len(), 2);

        assert!(client
            .get_transaction_by_hash(&tx_hash(0x02))
            .await
            .unwrap()
            .is_none());
        assert_eq!(node.calls(), 3);
    }

    // =========================================================================
    // FULL STACK
    // =========================================================================

    #[tokio::test]
    async fn test_lookup_through_container_fetches_once() {
        let (h1, h2) = (tx_hash(0x10), tx_hash(0x20));
        let node = MockLedgerNode::new()
            .with_transaction(&h1, tx_json(&h1))
            .with_receipt(&h1, receipt_json(1))
            .with_transaction(&h2, tx_json(&h2))
            .with_receipt(&h2, receipt_json(4));
        let (container, node) = container_for(node).await;
        let router = container.gateway().unwrap().router();

        let uri = format!("/lime/eth?transactionHashes={}&transactionHashes={}", h2, h1);
        let (status, body) = get(&router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h2.clone(), h1.clone()]);
        assert_eq!(body[0]["logsCount"], 4);
        assert_eq!(body[0]["blockNumber"], "0x400");
        assert_eq!(node.calls(), 4);

        let (_, body) = get(&router, &uri, None).await;
        assert_eq!(hashes_of(&body), vec![h2, h1]);
        assert_eq!(node.calls(), 4);
        assert_eq!(container.store.len(), 2);
        assert_eq!(container.reconciler_stats().cache_hits, 2);
    }

    #[tokio::test]
    async fn test_unknown_transaction_and_missing_receipt() {
        let (h1, unknown) = (tx_hash(0x30), tx_hash(0x31));
        let node = MockLedgerNode::new().with_transaction(&h1, tx_json(&h1));
        let (container, _node) = container_for(node).await;
        let router = container.gateway().unwrap().router();

        let uri = format!("/lime/eth?transactionHashes={},{}", unknown, h1);
        let (status, body) = get(&router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h1]);
        assert_eq!(body[0]["status"], "unknown");
        assert_eq!(container.reconciler_stats().remote_misses, 1);
    }

    #[tokio::test]
    async fn test_node_error_is_service_unavailable() {
        let (h1, h2) = (tx_hash(0x40), tx_hash(0x41));
        let node = MockLedgerNode::new()
            .with_transaction(&h1, tx_json(&h1))
            .with_receipt(&h1, receipt_json(0))
            .with_error(&h2, -32000, "header not found");
        let (container, _node) = container_for(node).await;
        let router = container.gateway().unwrap().router();

        let uri = format!("/lime/eth?transactionHashes={},{}", h1, h2);
        let (status, body) = get(&router, &uri, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "remote_unavailable");
        assert_eq!(body["retryable"], true);
        assert!(body["message"].as_str().unwrap().contains(&h2));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_service_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}", addr);
        let config = RuntimeConfig::from_lookup(|name| match name {
            "LF_LEDGER_URL" => Some(url.clone()),
            "LF_LEDGER_TIMEOUT_MS" => Some("500".to_string()),
            _ => None,
        })
        .unwrap();
        let container = FetcherContainer::build(config).unwrap();
        let router = container.gateway().unwrap().router();

        let uri = format!("/lime/eth?transactionHashes={}", tx_hash(0x50));
        let (status, body) = get(&router, &uri, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["retryable"], true);
        assert!(container.store.is_empty());
    }
}
