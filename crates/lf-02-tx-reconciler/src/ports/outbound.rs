//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the Transaction Reconciler.
//!
//! - `LedgerClient`: the authoritative remote source (JSON-RPC node)
//! - `RecordStore`: the local store with a uniqueness constraint on `hash`

use async_trait::async_trait;
use shared_types::{PrincipalId, RawReceipt, RawTransaction, TransactionRecord};
use std::collections::HashSet;
use thiserror::Error;

/// Abstract interface for the remote ledger.
///
/// Production: `LedgerRpcClient` (lf-03-ledger-rpc)
/// Testing: `MockLedgerClient` (test_utils.rs)
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch a transaction. `Ok(None)` means the ledger does not know the hash.
    async fn get_transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<RawTransaction>, LedgerError>;

    /// Fetch the receipt of a transaction. `Ok(None)` means no receipt is available.
    async fn get_transaction_receipt(&self, hash: &str)
        -> Result<Option<RawReceipt>, LedgerError>;
}

/// Abstract interface for record persistence.
///
/// ## Atomicity
///
/// `insert_if_absent` MUST be atomic with respect to other inserts of the
/// same hash and MUST report an existing hash as `StoreError::Duplicate`.
/// This is the only concurrency control between concurrent lookups.
///
/// Production/Testing: `InMemoryRecordStore` (adapters/memory_store.rs)
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Batched lookup of every stored record whose hash is in `hashes`.
    async fn find_by_hashes(
        &self,
        hashes: &HashSet<String>,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Store a new record, rejecting it if the hash already exists.
    async fn insert_if_absent(
        &self,
        record: TransactionRecord,
    ) -> Result<TransactionRecord, StoreError>;

    /// Add the (principal, hash) edge. Re-adding an existing edge is a no-op.
    async fn associate_owner(&self, hash: &str, principal: &PrincipalId)
        -> Result<(), StoreError>;

    /// Every stored record.
    async fn find_all(&self) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Every record associated with `principal`.
    async fn find_by_owner(
        &self,
        principal: &PrincipalId,
    ) -> Result<Vec<TransactionRecord>, StoreError>;
}

/// Remote ledger communication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transport failure (connect, DNS, reset, non-2xx status).
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The node answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The node answered with something that is not the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
    /// Request timed out.
    #[error("request timed out")]
    Timeout,
}

/// Record store errors.
///
/// `Duplicate` is the benign race outcome and is tagged explicitly so callers
/// never need to inspect nested causes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this hash already exists.
    #[error("duplicate transaction hash: {hash}")]
    Duplicate { hash: String },
    /// Any other storage failure.
    #[error("storage error: {message}")]
    Other { message: String },
}

impl StoreError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
