//! # Domain Errors
//!
//! Error types for the Transaction Reconciler.
//!
//! Per-record persistence problems are NOT errors at this level; they are
//! reported inside `Resolution::failures`. Only conditions that abort the
//! whole request appear here.

use crate::ports::outbound::LedgerError;
use lf_01_hash_list_decoder::DecodeError;
use thiserror::Error;

/// Errors that abort a reconciliation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The encoded hash list is not valid hex / RLP.
    #[error("Malformed encoding: {reason}")]
    MalformedEncoding { reason: String },

    /// The encoded hash list is valid RLP of the wrong shape.
    #[error("Unexpected shape: {reason}")]
    UnexpectedShape { reason: String },

    /// The remote ledger failed while fetching `hash`.
    #[error("Remote ledger unavailable while fetching {hash}: {source}")]
    RemoteUnavailable {
        hash: String,
        #[source]
        source: LedgerError,
    },

    /// The local store failed in a way that affects the whole request.
    #[error("Persistence failure: {message}")]
    Persistence { message: String },
}

/// Coarse error classification used by outer surfaces for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something unusable; do not retry unchanged.
    InvalidInput,
    /// A dependency is temporarily unavailable; retrying may succeed.
    Unavailable,
    /// Internal failure.
    Internal,
}

impl ReconcileError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedEncoding { .. } | Self::UnexpectedShape { .. } => {
                ErrorClass::InvalidInput
            }
            Self::RemoteUnavailable { .. } => ErrorClass::Unavailable,
            Self::Persistence { .. } => ErrorClass::Internal,
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEncoding { .. } => "malformed_encoding",
            Self::UnexpectedShape { .. } => "unexpected_shape",
            Self::RemoteUnavailable { .. } => "remote_unavailable",
            Self::Persistence { .. } => "persistence",
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Unavailable
    }
}

impl From<DecodeError> for ReconcileError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::MalformedEncoding { reason } => Self::MalformedEncoding { reason },
            DecodeError::UnexpectedShape { reason } => Self::UnexpectedShape { reason },
        }
    }
}
