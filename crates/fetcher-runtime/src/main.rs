//! # Ledger Fetcher
//!
//! Cache-aside transaction lookup service.
//!
//! ## Startup Sequence
//!
//! 1. Load `RuntimeConfig` from `LF_*` environment variables
//! 2. Install the tracing subscriber
//! 3. Build the container (ledger client, record store, reconciler)
//! 4. Serve the HTTP gateway until Ctrl+C, then drain in-flight requests

use anyhow::{Context, Result};
use fetcher_runtime::{init_tracing, FetcherContainer, RuntimeConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.telemetry).context("Failed to initialize tracing")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        ledger = %config.ledger.endpoint,
        http = %config.gateway.http_addr(),
        "Starting ledger fetcher"
    );

    let container = FetcherContainer::build(config).context("Failed to build container")?;
    let gateway = container.gateway().context("Failed to create gateway")?;
    let listener = gateway
        .bind()
        .await
        .context("Failed to bind HTTP listener")?;

    if let Err(e) = gateway.serve(listener, shutdown_signal()).await {
        error!(error = %e, "HTTP server failed");
        return Err(e.into());
    }

    let stats = container.reconciler_stats();
    info!(
        requests = stats.requests,
        cache_hits = stats.cache_hits,
        remote_fetches = stats.remote_fetches,
        inserted = stats.inserted,
        "Shutdown complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
