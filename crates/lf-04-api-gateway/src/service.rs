//! API Gateway service - router assembly and HTTP server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::create_cors_layer;
use crate::routes::{self, AppState};
use axum::routing::get;
use axum::Router;
use lf_02_tx_reconciler::TransactionLookupApi;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    api: Arc<dyn TransactionLookupApi>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        api: Arc<dyn TransactionLookupApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self { config, api })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the HTTP router with its middleware stack
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.api), &self.config)
    }

    /// Bind the configured HTTP address
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "Starting HTTP server");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("HTTP server stopped");
        Ok(())
    }
}

/// Assemble the lookup routes and middleware around `api`.
pub fn build_router(api: Arc<dyn TransactionLookupApi>, config: &GatewayConfig) -> Router {
    let state = AppState { api };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .layer(TimeoutLayer::new(config.timeouts.request));

    Router::new()
        .route("/lime/eth", get(routes::lookup_hashes))
        .route("/lime/eth/:encoded", get(routes::lookup_encoded))
        .route("/lime/all", get(routes::list_all))
        .route("/lime/my", get(routes::list_owned))
        .route("/stats", get(routes::stats))
        .route("/health", get(routes::health_check))
        .layer(middleware)
        .with_state(state)
}
