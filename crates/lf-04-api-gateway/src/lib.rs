//! # API Gateway (lf-04)
//!
//! HTTP surface over `TransactionLookupApi`.
//!
//! ## Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /lime/eth?transactionHashes=` | Resolve a plain hash list (repeated or comma-separated) |
//! | `GET /lime/eth/{rlphex}` | Resolve a hex RLP hash list |
//! | `GET /lime/all` | Every stored record |
//! | `GET /lime/my` | Records associated with the caller |
//! | `GET /stats` | Reconciler counters |
//! | `GET /health` | Liveness |
//!
//! ## Status Codes
//!
//! - `200`: JSON array of records
//! - `207`: `{ "transactions": [...], "failures": [...] }` when some records could not be stored
//! - `400`: malformed encoding, unexpected shape, malformed `x-principal-id`
//! - `401`: `/lime/my` without a principal
//! - `503`: remote ledger unavailable (`"retryable": true`)
//! - `500`: store failure

pub mod domain;
pub mod middleware;
pub mod routes;
pub mod service;

pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError};
pub use routes::{AppState, PRINCIPAL_HEADER};
pub use service::{build_router, ApiGatewayService};
