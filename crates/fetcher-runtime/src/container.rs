//! # Fetcher Container
//!
//! Owns every long-lived component and wires them together:
//!
//! ```text
//! LedgerRpcClient ─────┐
//!                      ├──→ TransactionReconciler ──→ ApiGatewayService
//! InMemoryRecordStore ─┘
//! ```

use crate::config::RuntimeConfig;
use lf_02_tx_reconciler::{
    InMemoryRecordStore, ReconcilerDependencies, ReconcilerStats, TransactionLookupApi,
    TransactionReconciler,
};
use lf_03_ledger_rpc::LedgerRpcClient;
use lf_04_api_gateway::{ApiGatewayService, GatewayError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Production reconciler type.
pub type Reconciler = TransactionReconciler<LedgerRpcClient, InMemoryRecordStore>;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("ledger client: {0}")]
    Ledger(#[from] lf_03_ledger_rpc::ConfigError),
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),
}

pub struct FetcherContainer {
    pub config: RuntimeConfig,
    pub ledger: Arc<LedgerRpcClient>,
    pub store: Arc<InMemoryRecordStore>,
    pub reconciler: Arc<Reconciler>,
}

impl FetcherContainer {
    pub fn build(config: RuntimeConfig) -> Result<Self, ContainerError> {
        let ledger = Arc::new(LedgerRpcClient::new(&config.ledger)?);
        let store = Arc::new(InMemoryRecordStore::new());
        let reconciler = Arc::new(TransactionReconciler::new(
            ReconcilerDependencies {
                ledger: Arc::clone(&ledger),
                store: Arc::clone(&store),
            },
            config.reconciler.clone(),
        ));

        info!(
            ledger = %ledger.endpoint(),
            max_concurrent_fetches = config.reconciler.max_concurrent_fetches,
            decode_policy = ?config.reconciler.decode_policy,
            "Container built"
        );

        Ok(Self {
            config,
            ledger,
            store,
            reconciler,
        })
    }

    pub fn reconciler_stats(&self) -> ReconcilerStats {
        self.reconciler.stats()
    }

    /// HTTP gateway over the reconciler.
    pub fn gateway(&self) -> Result<ApiGatewayService, ContainerError> {
        let api: Arc<dyn TransactionLookupApi> = self.reconciler.clone();
        Ok(ApiGatewayService::new(self.config.gateway.clone(), api)?)
    }
}
