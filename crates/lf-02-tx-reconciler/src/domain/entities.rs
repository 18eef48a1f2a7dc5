//! # Domain Entities
//!
//! Outcome and statistics types of the reconciliation process.

use serde::{Deserialize, Serialize};
use shared_types::TransactionRecord;
use std::sync::atomic::{AtomicU64, Ordering};

/// Why a record could not be fully persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The record could not be stored; it is omitted from the result.
    Persistence,
    /// The record is stored but the ownership edge could not be written.
    Association,
}

/// A single per-record failure inside an otherwise successful request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub hash: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Result of resolving a hash list.
///
/// `records` holds at most one entry per distinct hash, ordered by first
/// occurrence in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<RecordFailure>,
}

impl Resolution {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Live counters, updated with relaxed atomics.
#[derive(Debug, Default)]
pub struct ReconcilerMetrics {
    pub requests: AtomicU64,
    pub cache_hits: AtomicU64,
    pub remote_fetches: AtomicU64,
    pub remote_misses: AtomicU64,
    pub inserted: AtomicU64,
    pub duplicate_conflicts: AtomicU64,
    pub persistence_failures: AtomicU64,
    pub association_failures: AtomicU64,
}

impl ReconcilerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ReconcilerStats {
        ReconcilerStats {
            requests: self.requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            remote_misses: self.remote_misses.load(Ordering::Relaxed),
            inserted: self.inserted.load(Ordering::Relaxed),
            duplicate_conflicts: self.duplicate_conflicts.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
            association_failures: self.association_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `ReconcilerMetrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcilerStats {
    /// Resolve calls received.
    pub requests: u64,
    /// Hashes served from the local store.
    pub cache_hits: u64,
    /// Transactions fetched from the remote ledger.
    pub remote_fetches: u64,
    /// Hashes unknown to the remote ledger.
    pub remote_misses: u64,
    /// New records stored.
    pub inserted: u64,
    /// Inserts that lost a race to a concurrent request.
    pub duplicate_conflicts: u64,
    /// Inserts that failed for a reason other than a duplicate.
    pub persistence_failures: u64,
    /// Owner associations that failed.
    pub association_failures: u64,
}
