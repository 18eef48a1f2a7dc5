//! # Per-hash Pipeline
//!
//! fetch → normalize → persist for a single local miss.

use super::*;
use crate::domain::normalize;

/// What happened to one missing hash.
pub(crate) enum FetchOutcome {
    /// The remote ledger does not know the hash.
    NotFound,
    /// Record to return: freshly stored, or the copy a concurrent request stored first.
    Stored(TransactionRecord),
    /// The record could not be stored and is omitted.
    Failed(RecordFailure),
}

impl<L, S> TransactionReconciler<L, S>
where
    L: LedgerClient,
    S: RecordStore,
{
    pub(crate) async fn fetch_and_persist(
        &self,
        hash: String,
    ) -> Result<(String, FetchOutcome), ReconcileError> {
        let remote = |source| ReconcileError::RemoteUnavailable {
            hash: hash.clone(),
            source,
        };

        let Some(tx) = self
            .ledger
            .get_transaction_by_hash(&hash)
            .await
            .map_err(remote)?
        else {
            ReconcilerMetrics::incr(&self.metrics.remote_misses);
            debug!(%hash, "Transaction unknown to remote ledger");
            return Ok((hash, FetchOutcome::NotFound));
        };
        ReconcilerMetrics::incr(&self.metrics.remote_fetches);

        let receipt = self
            .ledger
            .get_transaction_receipt(&tx.hash)
            .await
            .map_err(remote)?;
        let record = normalize(&tx, receipt.as_ref());

        let outcome = match self.store.insert_if_absent(record.clone()).await {
            Ok(stored) => {
                ReconcilerMetrics::incr(&self.metrics.inserted);
                FetchOutcome::Stored(stored)
            }
            Err(StoreError::Duplicate { hash: stored_hash }) => {
                ReconcilerMetrics::incr(&self.metrics.duplicate_conflicts);
                debug!(hash = %stored_hash, "Lost insert race; using stored record");
                FetchOutcome::Stored(self.stored_copy(record).await)
            }
            Err(err) => {
                ReconcilerMetrics::incr(&self.metrics.persistence_failures);
                warn!(%hash, error = %err, "Failed to store transaction record");
                FetchOutcome::Failed(RecordFailure {
                    hash: hash.clone(),
                    kind: FailureKind::Persistence,
                    message: err.to_string(),
                })
            }
        };
        Ok((hash, outcome))
    }

    /// The record another request stored for the same hash, falling back to ours.
    async fn stored_copy(&self, fetched: TransactionRecord) -> TransactionRecord {
        let key: HashSet<String> = std::iter::once(fetched.hash.clone()).collect();
        match self.store.find_by_hashes(&key).await {
            Ok(mut found) if !found.is_empty() => found.swap_remove(0),
            Ok(_) => fetched,
            Err(err) => {
                warn!(hash = %fetched.hash, error = %err, "Re-read after duplicate failed");
                fetched
            }
        }
    }
}
