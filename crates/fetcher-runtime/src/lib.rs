//! # Fetcher Runtime Library
//!
//! Exposes the runtime's configuration, telemetry and wiring for testing.
//! The main entry point is the `main.rs` binary.

pub mod config;
pub mod container;
pub mod telemetry;

pub use config::{ConfigError, RuntimeConfig, TelemetryConfig};
pub use container::{ContainerError, FetcherContainer, Reconciler};
pub use telemetry::{init_tracing, TelemetryError};
