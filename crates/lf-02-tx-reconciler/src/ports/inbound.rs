//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the Transaction Reconciler.

use crate::domain::{ReconcileError, ReconcilerStats, Resolution};
use async_trait::async_trait;
use shared_types::{PrincipalId, TransactionRecord};

/// Primary API for transaction lookups.
///
/// This trait is what the API gateway holds; it never sees the ledger client
/// or the store directly.
#[async_trait]
pub trait TransactionLookupApi: Send + Sync {
    /// Resolve a list of transaction hashes.
    ///
    /// ## Returns
    ///
    /// - `Ok(Resolution)`: at most one record per distinct known hash, plus
    ///   per-record failures if some records could not be stored
    /// - `Err(RemoteUnavailable)`: the remote ledger failed; nothing is returned
    /// - `Err(Persistence)`: the batched store lookup failed
    async fn resolve(
        &self,
        hashes: Vec<String>,
        principal: Option<PrincipalId>,
    ) -> Result<Resolution, ReconcileError>;

    /// Decode a hex RLP hash list, then resolve it.
    ///
    /// Fails with `MalformedEncoding` / `UnexpectedShape` before any store or
    /// remote call if the blob is invalid.
    async fn resolve_encoded(
        &self,
        encoded: &str,
        principal: Option<PrincipalId>,
    ) -> Result<Resolution, ReconcileError>;

    /// Every stored record.
    async fn list_all(&self) -> Result<Vec<TransactionRecord>, ReconcileError>;

    /// Every record associated with `principal`.
    async fn list_owned(
        &self,
        principal: PrincipalId,
    ) -> Result<Vec<TransactionRecord>, ReconcileError>;

    /// Counters since start-up.
    fn stats(&self) -> ReconcilerStats;
}
