//! # Shared Types Crate
//!
//! This crate contains the domain entities exchanged between the Ledger-Fetcher
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The stored record shape and the raw ledger
//!   wire shapes are defined once, here.
//! - **Hash Identity**: A `TransactionRecord` is identified only by its `hash`;
//!   nothing else about it is addressable from the outside.
//! - **Edges, not back-references**: Ownership is an explicit edge set
//!   (`OwnerEdge`), so records never hold principals and principals never hold
//!   records.

pub mod entities;
pub mod ledger;

pub use entities::*;
pub use ledger::*;
