//! Error types for the Hash-List Decoder.

use thiserror::Error;

/// Errors that can occur while decoding a hash-list blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Hex text or RLP framing is broken (odd length, bad digit, truncated item).
    #[error("Malformed encoding: {reason}")]
    MalformedEncoding { reason: String },

    /// Well-formed RLP that is not a list whose first element is a list of byte strings.
    #[error("Unexpected shape: {reason}")]
    UnexpectedShape { reason: String },
}

impl DecodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEncoding {
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            reason: reason.into(),
        }
    }
}

impl From<hex::FromHexError> for DecodeError {
    fn from(err: hex::FromHexError) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<rlp::DecoderError> for DecodeError {
    fn from(err: rlp::DecoderError) -> Self {
        Self::malformed(format!("rlp: {}", err))
    }
}
