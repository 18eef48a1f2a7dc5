//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the Transaction Reconciler.
//!
//! - **Driving Ports (Inbound)**: APIs consumed by adapters (HTTP gateway, CLI, etc.)
//! - **Driven Ports (Outbound)**: SPIs implemented by adapters (ledger RPC, record store)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
