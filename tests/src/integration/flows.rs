//! # Lookup Flows
//!
//! Requests enter through the gateway router, are decoded by
//! `lf-01-hash-list-decoder`, reconciled by `lf-02-tx-reconciler` against a
//! scripted ledger and land in the in-memory record store.
//!
//! ## Flows Tested
//!
//! 1. **RLP path → records**: `/lime/eth/{rlphex}` built with `rlp::RlpStream`
//! 2. **Cache-aside**: a second lookup is served without touching the ledger
//! 3. **Ownership**: lookups with a principal populate `/lime/my`
//! 4. **Concurrent lookups**: many parallel requests for one hash store it once

#[cfg(test)]
mod tests {
    use crate::integration::support::{get, hashes_of};
    use axum::http::StatusCode;
    use axum::Router;
    use futures::future::join_all;
    use lf_01_hash_list_decoder::DecodePolicy;
    use lf_02_tx_reconciler::test_utils::{tx_hash, MockLedgerClient};
    use lf_02_tx_reconciler::{
        InMemoryRecordStore, ReconcilerConfig, ReconcilerDependencies, TransactionReconciler,
    };
    use lf_04_api_gateway::{build_router, GatewayConfig};
    use rlp::RlpStream;
    use shared_types::PrincipalId;
    use std::sync::Arc;
    use std::time::Duration;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct Harness {
        router: Router,
        ledger: Arc<MockLedgerClient>,
        store: Arc<InMemoryRecordStore>,
    }

    fn harness(ledger: MockLedgerClient, policy: DecodePolicy) -> Harness {
        let ledger = Arc::new(ledger);
        let store = Arc::new(InMemoryRecordStore::new());
        let reconciler = TransactionReconciler::new(
            ReconcilerDependencies {
                ledger: Arc::clone(&ledger),
                store: Arc::clone(&store),
            },
            ReconcilerConfig {
                decode_policy: policy,
                ..Default::default()
            },
        );
        Harness {
            router: build_router(Arc::new(reconciler), &GatewayConfig::default()),
            ledger,
            store,
        }
    }

    fn hash_bytes(hash: &str) -> Vec<u8> {
        hex::decode(hash.trim_start_matches("0x")).unwrap()
    }

    /// Hex of an RLP list whose items are the raw bytes of `hashes`.
    fn encode_hashes(hashes: &[&String]) -> String {
        let mut stream = RlpStream::new_list(hashes.len());
        for hash in hashes {
            stream.append(&hash_bytes(hash));
        }
        hex::encode(stream.out())
    }

    // =========================================================================
    // RLP PATH
    // =========================================================================

    #[tokio::test]
    async fn test_rlp_encoded_lookup_returns_records_in_request_order() {
        let (h1, h2, h3) = (tx_hash(0x11), tx_hash(0x22), tx_hash(0x33));
        let ledger = MockLedgerClient::new()
            .with_success(&h1, 1)
            .with_success(&h2, 2)
            .with_success(&h3, 0);
        let h = harness(ledger, DecodePolicy::Lenient);

        let uri = format!("/lime/eth/0x{}", encode_hashes(&[&h3, &h1, &h2, &h1]));
        let (status, body) = get(&h.router, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h3.clone(), h1.clone(), h2.clone()]);
        assert_eq!(body[1]["logsCount"], 1);
        assert_eq!(body[1]["status"], "success");
        assert_eq!(h.store.len(), 3);
    }

    #[tokio::test]
    async fn test_rlp_item_holding_ascii_hash_is_used_verbatim() {
        let h1 = tx_hash(0x44);
        let h = harness(
            MockLedgerClient::new().with_success(&h1, 0),
            DecodePolicy::Lenient,
        );

        let mut stream = RlpStream::new_list(1);
        stream.append(&h1.as_bytes().to_vec());
        let uri = format!("/lime/eth/{}", hex::encode(stream.out()));

        let (status, body) = get(&h.router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h1]);
    }

    #[tokio::test]
    async fn test_nested_list_depends_on_decode_policy() {
        let (h1, h2) = (tx_hash(0x55), tx_hash(0x66));
        let ledger = || {
            MockLedgerClient::new()
                .with_success(&h1, 0)
                .with_success(&h2, 0)
        };

        let mut stream = RlpStream::new_list(3);
        stream.append(&hash_bytes(&h1));
        stream.begin_list(1);
        stream.append(&hash_bytes(&tx_hash(0x77)));
        stream.append(&hash_bytes(&h2));
        let uri = format!("/lime/eth/{}", hex::encode(stream.out()));

        let lenient = harness(ledger(), DecodePolicy::Lenient);
        let (status, body) = get(&lenient.router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h1.clone(), h2.clone()]);

        let strict = harness(ledger(), DecodePolicy::Strict);
        let (status, body) = get(&strict.router, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unexpected_shape");
        assert_eq!(strict.ledger.transaction_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_rlp_list_is_empty_array() {
        let h = harness(MockLedgerClient::new(), DecodePolicy::Lenient);
        let (status, body) = get(&h.router, "/lime/eth/c0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    // =========================================================================
    // CACHE-ASIDE
    // =========================================================================

    #[tokio::test]
    async fn test_query_then_rlp_lookup_hits_cache() {
        let (h1, h2) = (tx_hash(0x81), tx_hash(0x82));
        let ledger = MockLedgerClient::new()
            .with_success(&h1, 0)
            .with_success(&h2, 0);
        let h = harness(ledger, DecodePolicy::Lenient);

        let uri = format!("/lime/eth?transactionHashes={},{}", h1, h2);
        let (status, _) = get(&h.router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.ledger.transaction_calls(), 2);

        let uri = format!("/lime/eth/{}", encode_hashes(&[&h2, &h1]));
        let (status, body) = get(&h.router, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&body), vec![h2, h1]);
        assert_eq!(h.ledger.transaction_calls(), 2);

        let (_, stats) = get(&h.router, "/stats", None).await;
        assert_eq!(stats["requests"], 2);
        assert_eq!(stats["cacheHits"], 2);
        assert_eq!(stats["inserted"], 2);
    }

    #[tokio::test]
    async fn test_all_lists_every_stored_record() {
        let (h1, h2, unknown) = (tx_hash(0x91), tx_hash(0x92), tx_hash(0x93));
        let ledger = MockLedgerClient::new()
            .with_success(&h1, 0)
            .with_success(&h2, 0);
        let h = harness(ledger, DecodePolicy::Lenient);

        let uri = format!("/lime/eth/{}", encode_hashes(&[&h1, &unknown, &h2]));
        let (_, body) = get(&h.router, &uri, None).await;
        assert_eq!(hashes_of(&body), vec![h1.clone(), h2.clone()]);

        let (status, all) = get(&h.router, "/lime/all", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hashes_of(&all), vec![h1, h2]);
    }

    // =========================================================================
    // OWNERSHIP
    // =========================================================================

    #[tokio::test]
    async fn test_principals_see_only_their_lookups() {
        let (h1, h2, h3) = (tx_hash(0xa1), tx_hash(0xa2), tx_hash(0xa3));
        let ledger = MockLedgerClient::new()
            .with_success(&h1, 0)
            .with_success(&h2, 0)
            .with_success(&h3, 0);
        let h = harness(ledger, DecodePolicy::Lenient);
        let alice = PrincipalId::new_v4().to_string();
        let bob = PrincipalId::new_v4().to_string();

        let uri = format!("/lime/eth/{}", encode_hashes(&[&h1, &h2]));
        get(&h.router, &uri, Some(&alice)).await;
        let uri = format!("/lime/eth?transactionHashes={},{}", h2, h3);
        get(&h.router, &uri, Some(&bob)).await;

        let (_, mine) = get(&h.router, "/lime/my", Some(&alice)).await;
        assert_eq!(hashes_of(&mine), vec![h1, h2.clone()]);
        let (_, mine) = get(&h.router, "/lime/my", Some(&bob)).await;
        assert_eq!(hashes_of(&mine), vec![h2, h3]);
        assert_eq!(h.store.edge_count(), 4);
    }

    // =========================================================================
    // CONCURRENT LOOKUPS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_store_a_single_record() {
        let h1 = tx_hash(0xc1);
        let ledger = MockLedgerClient::new()
            .with_success(&h1, 3)
            .with_delay(Duration::from_millis(5));
        let h = harness(ledger, DecodePolicy::Lenient);
        let uri = format!("/lime/eth/{}", encode_hashes(&[&h1]));

        let responses = join_all((0..16).map(|_| {
            let router = h.router.clone();
            let uri = uri.clone();
            tokio::spawn(async move { get(&router, &uri, None).await })
        }))
        .await;

        for response in responses {
            let (status, body) = response.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(hashes_of(&body), vec![h1.clone()]);
            assert_eq!(body[0]["logsCount"], 3);
        }
        assert_eq!(h.store.len(), 1);

        let (_, stats) = get(&h.router, "/stats", None).await;
        assert_eq!(stats["inserted"], 1);
        assert_eq!(
            stats["duplicateConflicts"].as_u64().unwrap() + 1,
            stats["remoteFetches"].as_u64().unwrap()
        );
    }
}
