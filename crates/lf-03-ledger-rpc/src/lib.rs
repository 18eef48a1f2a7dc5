//! # Ledger RPC (lf-03)
//!
//! `LedgerClient` adapter for an Ethereum-style JSON-RPC node.
//!
//! | Method | RPC call | Unknown hash |
//! |--------|----------|--------------|
//! | `get_transaction_by_hash` | `eth_getTransactionByHash` | `Ok(None)` |
//! | `get_transaction_receipt` | `eth_getTransactionReceipt` | `Ok(None)` |
//!
//! Transport failures, non-2xx statuses, JSON-RPC error objects and
//! undecodable bodies all surface as `LedgerError`; the reconciler treats
//! every one of them as the remote being unavailable.

pub mod client;
pub mod config;

pub use client::{JsonRpcError, LedgerRpcClient};
pub use config::{ConfigError, LedgerRpcConfig};
