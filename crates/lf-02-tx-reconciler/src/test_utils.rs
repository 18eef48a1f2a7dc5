//! Test doubles and fixtures for the reconciler and downstream test suites.

use crate::adapters::InMemoryRecordStore;
use crate::ports::outbound::{LedgerClient, LedgerError, RecordStore, StoreError};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{
    PrincipalId, RawReceipt, RawTransaction, ReceiptStatus, TransactionRecord, TxStatus, U256,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

/// Deterministic 32-byte hash string: `0x` + 64 hex digits of `n`.
pub fn tx_hash(n: u8) -> String {
    format!("0x{}", hex_byte(n).repeat(32))
}

fn hex_byte(n: u8) -> String {
    format!("{:02x}", n)
}

pub fn raw_transaction(hash: &str) -> RawTransaction {
    RawTransaction {
        hash: hash.to_string(),
        block_hash: Some(tx_hash(0xbb)),
        block_number: Some(U256::from(1_024u64)),
        from: "0xa1e4380a3b1f749673e270229993ee55f35663b4".into(),
        to: Some("0x5df9b87991262f6ba471f09758cde1c0fc1de734".into()),
        creates: None,
        input: "0x".into(),
        value: U256::from(31_337u64),
    }
}

pub fn success_receipt(logs: usize) -> RawReceipt {
    RawReceipt {
        status: Some(ReceiptStatus::Success),
        logs: vec![serde_json::Value::Null; logs],
        contract_address: None,
    }
}

pub fn failed_receipt() -> RawReceipt {
    RawReceipt {
        status: Some(ReceiptStatus::Failure),
        logs: Vec::new(),
        contract_address: None,
    }
}

pub fn make_record(hash: &str) -> TransactionRecord {
    TransactionRecord {
        hash: hash.to_string(),
        status: TxStatus::Success,
        block_hash: None,
        block_number: U256::from(7u64),
        from: "0xfrom".into(),
        to: None,
        contract_address: None,
        logs_count: 0,
        input: "0x".into(),
        value: U256::zero(),
    }
}

// =============================================================================
// MOCK LEDGER CLIENT
// =============================================================================

/// Scriptable `LedgerClient` with call accounting.
#[derive(Default)]
pub struct MockLedgerClient {
    transactions: RwLock<HashMap<String, RawTransaction>>,
    receipts: RwLock<HashMap<String, RawReceipt>>,
    failures: RwLock<HashMap<String, LedgerError>>,
    slow: RwLock<HashMap<String, Duration>>,
    gate: Option<Arc<Barrier>>,
    delay: Option<Duration>,
    transaction_calls: AtomicUsize,
    receipt_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known transaction with a successful receipt carrying `logs` entries.
    pub fn with_success(self, hash: &str, logs: usize) -> Self {
        self.with_transaction(raw_transaction(hash))
            .with_receipt(hash, success_receipt(logs))
    }

    pub fn with_transaction(self, tx: RawTransaction) -> Self {
        self.transactions.write().insert(tx.hash.clone(), tx);
        self
    }

    pub fn with_receipt(self, hash: &str, receipt: RawReceipt) -> Self {
        self.receipts.write().insert(hash.to_string(), receipt);
        self
    }

    /// Fail every call for `hash` with `err`.
    pub fn failing_on(self, hash: &str, err: LedgerError) -> Self {
        self.failures.write().insert(hash.to_string(), err);
        self
    }

    /// Every transaction fetch waits on `barrier` before answering.
    pub fn with_gate(mut self, barrier: Arc<Barrier>) -> Self {
        self.gate = Some(barrier);
        self
    }

    /// Transaction fetches for `hash` sleep for `delay` before answering.
    pub fn slow_on(self, hash: &str, delay: Duration) -> Self {
        self.slow.write().insert(hash.to_string(), delay);
        self
    }

    /// Every transaction fetch sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }

    pub fn receipt_calls(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    /// Highest number of transaction fetches observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn failure_for(&self, hash: &str) -> Option<LedgerError> {
        self.failures.read().get(hash).cloned()
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn get_transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<RawTransaction>, LedgerError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.wait().await;
        }
        let delay = self.slow.read().get(hash).copied().or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(err) = self.failure_for(hash) {
            return Err(err);
        }
        Ok(self.transactions.read().get(hash).cloned())
    }

    async fn get_transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<RawReceipt>, LedgerError> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure_for(hash) {
            return Err(err);
        }
        Ok(self.receipts.read().get(hash).cloned())
    }
}

// =============================================================================
// FLAKY RECORD STORE
// =============================================================================

/// `InMemoryRecordStore` wrapper with injectable failures.
#[derive(Default)]
pub struct FlakyRecordStore {
    inner: InMemoryRecordStore,
    failing_inserts: RwLock<HashSet<String>>,
    failing_associations: RwLock<HashSet<String>>,
    fail_lookups: RwLock<bool>,
    hidden_once: Mutex<HashSet<String>>,
}

impl FlakyRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &InMemoryRecordStore {
        &self.inner
    }

    /// Inserts of `hash` fail with `StoreError::Other`.
    pub fn fail_insert_of(self, hash: &str) -> Self {
        self.failing_inserts.write().insert(hash.to_string());
        self
    }

    /// Associations for `hash` fail with `StoreError::Other`.
    pub fn fail_association_of(self, hash: &str) -> Self {
        self.failing_associations.write().insert(hash.to_string());
        self
    }

    /// Every batched lookup fails.
    pub fn fail_lookups(self) -> Self {
        *self.fail_lookups.write() = true;
        self
    }

    /// Store `record` now but hide it from the next batched lookup, so the
    /// following insert observes a duplicate as if a concurrent request won.
    pub async fn preload_hidden(&self, record: TransactionRecord) {
        self.hidden_once.lock().insert(record.hash.clone());
        let _ = self.inner.insert_if_absent(record).await;
    }
}

#[async_trait]
impl RecordStore for FlakyRecordStore {
    async fn find_by_hashes(
        &self,
        hashes: &HashSet<String>,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        if *self.fail_lookups.read() {
            return Err(StoreError::other("lookup unavailable"));
        }
        let mut found = self.inner.find_by_hashes(hashes).await?;
        let mut hidden = self.hidden_once.lock();
        found.retain(|record| !hidden.remove(&record.hash));
        Ok(found)
    }

    async fn insert_if_absent(
        &self,
        record: TransactionRecord,
    ) -> Result<TransactionRecord, StoreError> {
        if self.failing_inserts.read().contains(&record.hash) {
            return Err(StoreError::other("disk quota exceeded"));
        }
        self.inner.insert_if_absent(record).await
    }

    async fn associate_owner(
        &self,
        hash: &str,
        principal: &PrincipalId,
    ) -> Result<(), StoreError> {
        if self.failing_associations.read().contains(hash) {
            return Err(StoreError::other("ownership table unavailable"));
        }
        self.inner.associate_owner(hash, principal).await
    }

    async fn find_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        self.inner.find_all().await
    }

    async fn find_by_owner(
        &self,
        principal: &PrincipalId,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        self.inner.find_by_owner(principal).await
    }
}
