//! Gateway domain: configuration and error mapping.

pub mod config;
pub mod error;

pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, TimeoutConfig};
pub use error::{ApiError, ErrorBody, GatewayError};
