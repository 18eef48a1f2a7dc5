//! # Value Objects

use lf_01_hash_list_decoder::DecodePolicy;
use serde::{Deserialize, Serialize};

/// Reconciler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Upper bound on in-flight remote fetches per request.
    pub max_concurrent_fetches: usize,
    /// Treatment of nested lists in encoded hash lists.
    pub decode_policy: DecodePolicy,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            decode_policy: DecodePolicy::Lenient,
        }
    }
}

impl ReconcilerConfig {
    /// Effective concurrency limit (never zero).
    pub fn fetch_limit(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }
}
