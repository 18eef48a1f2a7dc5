//! # Adapters Module
//!
//! - `memory_store`: lock-guarded in-memory `RecordStore`

pub mod memory_store;

pub use memory_store::InMemoryRecordStore;
