//! # Transaction Reconciler (lf-02)
//!
//! Resolves lists of transaction hashes against a local record store backed
//! by a remote ledger. Local hits are served as-is; misses are fetched,
//! normalized into `TransactionRecord`s, persisted and returned. When a
//! principal is supplied, every returned record is associated with it.
//!
//! ## Guarantees
//!
//! | Guarantee | Description |
//! |-----------|-------------|
//! | Dedupe | At most one record per distinct hash in a result; hex case is ignored |
//! | Cache first | A stored hash is never fetched remotely again |
//! | Single copy | Concurrent lookups of one hash store exactly one record |
//! | Additive ownership | Edges are only ever added; re-adding is a no-op |
//! | Remote abort | A remote failure fails the whole call |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Outcome types, errors, normalizer, configuration
//! - `ports/` - `TransactionLookupApi` (inbound), `LedgerClient` / `RecordStore` (outbound)
//! - `service/` - `TransactionReconciler` implementing the inbound port
//! - `adapters/` - In-memory record store

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::InMemoryRecordStore;
pub use domain::{
    canonical_hash, normalize, ErrorClass, FailureKind, ReconcileError, ReconcilerConfig, ReconcilerStats,
    RecordFailure, Resolution,
};
pub use ports::inbound::TransactionLookupApi;
pub use ports::outbound::{LedgerClient, LedgerError, RecordStore, StoreError};
pub use service::{ReconcilerDependencies, TransactionReconciler};
