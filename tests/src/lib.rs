//! # Ledger-Fetcher Test Suite
//!
//! Cross-crate tests that exercise the decoder, reconciler, ledger client and
//! gateway together, plus criterion benchmarks.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs      # Router → reconciler → store, RLP-encoded requests
//! │   └── rpc_node.rs   # Real JSON-RPC client against a local mock node
//! └── benches/
//!     └── lookup_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lf-tests
//! cargo test -p lf-tests integration::rpc_node::
//!
//! # Benchmarks
//! cargo bench -p lf-tests
//! ```

pub mod integration;
