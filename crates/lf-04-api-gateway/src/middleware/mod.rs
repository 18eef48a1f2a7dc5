//! HTTP middleware.
//!
//! Request tracing and timeouts come straight from `tower-http`; only CORS
//! needs configuration glue.

pub mod cors;

pub use cors::create_cors_layer;
