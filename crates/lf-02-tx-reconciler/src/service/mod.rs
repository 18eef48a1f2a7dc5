//! # Transaction Reconciler Service
//!
//! The application service implementing `TransactionLookupApi`.
//!
//! ## Flow
//!
//! 1. Canonicalize (trim, lowercase hex) and de-duplicate the requested hashes
//!    (first occurrence wins)
//! 2. One batched store lookup for all of them
//! 3. Bounded concurrent fetch → normalize → persist for every miss
//! 4. Optional ownership association for every returned record
//! 5. Assemble the result in request order

mod pipeline;

use crate::domain::{
    canonical_hash, FailureKind, ReconcileError, ReconcilerConfig, ReconcilerMetrics, ReconcilerStats,
    RecordFailure, Resolution,
};
use crate::ports::inbound::TransactionLookupApi;
use crate::ports::outbound::{LedgerClient, RecordStore, StoreError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use lf_01_hash_list_decoder::decode_hash_list;
use pipeline::FetchOutcome;
use shared_types::{PrincipalId, TransactionRecord};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The Transaction Reconciler.
///
/// Generic over its outbound ports so tests can inject mocks.
pub struct TransactionReconciler<L, S>
where
    L: LedgerClient,
    S: RecordStore,
{
    pub(crate) ledger: Arc<L>,
    pub(crate) store: Arc<S>,
    pub(crate) config: ReconcilerConfig,
    pub(crate) metrics: ReconcilerMetrics,
}

/// Dependencies for TransactionReconciler
pub struct ReconcilerDependencies<L, S> {
    pub ledger: Arc<L>,
    pub store: Arc<S>,
}

impl<L, S> TransactionReconciler<L, S>
where
    L: LedgerClient,
    S: RecordStore,
{
    pub fn new(deps: ReconcilerDependencies<L, S>, config: ReconcilerConfig) -> Self {
        Self {
            ledger: deps.ledger,
            store: deps.store,
            config,
            metrics: ReconcilerMetrics::new(),
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

/// Canonical, non-empty, distinct hashes in first-occurrence order.
pub(crate) fn distinct_hashes(hashes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(hashes.len());
    hashes
        .iter()
        .map(|h| canonical_hash(h))
        .filter(|h| !h.is_empty() && seen.insert(h.clone()))
        .collect()
}

fn persistence(err: StoreError) -> ReconcileError {
    ReconcileError::Persistence {
        message: err.to_string(),
    }
}

#[async_trait]
impl<L, S> TransactionLookupApi for TransactionReconciler<L, S>
where
    L: LedgerClient,
    S: RecordStore,
{
    #[instrument(skip(self, hashes), fields(requested = hashes.len()))]
    async fn resolve(
        &self,
        hashes: Vec<String>,
        principal: Option<PrincipalId>,
    ) -> Result<Resolution, ReconcileError> {
        ReconcilerMetrics::incr(&self.metrics.requests);

        let distinct = distinct_hashes(hashes);
        if distinct.is_empty() {
            return Ok(Resolution::default());
        }

        let wanted: HashSet<String> = distinct.iter().cloned().collect();
        let mut resolved: HashMap<String, TransactionRecord> = self
            .store
            .find_by_hashes(&wanted)
            .await
            .map_err(persistence)?
            .into_iter()
            .map(|record| (canonical_hash(&record.hash), record))
            .collect();
        ReconcilerMetrics::add(&self.metrics.cache_hits, resolved.len() as u64);

        let misses: Vec<String> = distinct
            .iter()
            .filter(|hash| !resolved.contains_key(*hash))
            .cloned()
            .collect();
        debug!(
            distinct = distinct.len(),
            cached = resolved.len(),
            misses = misses.len(),
            "Partitioned lookup"
        );

        // First remote error short-circuits; remaining in-flight fetches are dropped.
        let outcomes: Vec<(String, FetchOutcome)> = stream::iter(misses)
            .map(|hash| self.fetch_and_persist(hash))
            .buffer_unordered(self.config.fetch_limit())
            .try_collect()
            .await?;

        let mut failures = Vec::new();
        for (hash, outcome) in outcomes {
            match outcome {
                FetchOutcome::Stored(record) => {
                    resolved.insert(hash, record);
                }
                FetchOutcome::Failed(failure) => failures.push(failure),
                FetchOutcome::NotFound => {}
            }
        }

        if let Some(principal) = principal {
            for hash in &distinct {
                let Some(record) = resolved.get(hash) else {
                    continue;
                };
                if let Err(err) = self.store.associate_owner(&record.hash, &principal).await {
                    ReconcilerMetrics::incr(&self.metrics.association_failures);
                    warn!(hash = %record.hash, %principal, error = %err, "Ownership association failed");
                    failures.push(RecordFailure {
                        hash: hash.clone(),
                        kind: FailureKind::Association,
                        message: err.to_string(),
                    });
                }
            }
        }

        let records: Vec<TransactionRecord> = distinct
            .iter()
            .filter_map(|hash| resolved.remove(hash))
            .collect();

        info!(
            returned = records.len(),
            failures = failures.len(),
            "Resolved transaction hashes"
        );
        Ok(Resolution { records, failures })
    }

    async fn resolve_encoded(
        &self,
        encoded: &str,
        principal: Option<PrincipalId>,
    ) -> Result<Resolution, ReconcileError> {
        let hashes = decode_hash_list(encoded, self.config.decode_policy).map_err(|err| {
            debug!(error = %err, "Rejected encoded hash list");
            ReconcileError::from(err)
        })?;
        self.resolve(hashes, principal).await
    }

    async fn list_all(&self) -> Result<Vec<TransactionRecord>, ReconcileError> {
        self.store.find_all().await.map_err(persistence)
    }

    async fn list_owned(
        &self,
        principal: PrincipalId,
    ) -> Result<Vec<TransactionRecord>, ReconcileError> {
        self.store
            .find_by_owner(&principal)
            .await
            .map_err(persistence)
    }

    fn stats(&self) -> ReconcilerStats {
        self.metrics.snapshot()
    }
}
