//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Records**: `TransactionRecord`, `TxStatus`
//! - **Ownership**: `PrincipalId`, `OwnerEdge`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: RECORDS
// =============================================================================

/// Execution outcome of a transaction as reported by its receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Receipt present and reports success.
    Success,
    /// Receipt present and reports failure (reverted).
    Failure,
    /// No receipt was available, or the receipt carried no status.
    Unknown,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The canonical stored transaction record.
///
/// Created once when a remote lookup succeeds and no record with the same
/// hash exists. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Hex-encoded transaction hash. Globally unique.
    pub hash: String,
    /// Execution status derived from the receipt.
    pub status: TxStatus,
    /// Hash of the including block.
    pub block_hash: Option<String>,
    /// Number of the including block (zero when the ledger omitted it).
    pub block_number: U256,
    /// Sender address.
    pub from: String,
    /// Recipient address, `None` for contract creation.
    pub to: Option<String>,
    /// Address of the created contract, only set on contract creation.
    pub contract_address: Option<String>,
    /// Number of logs emitted (zero when no receipt was available).
    pub logs_count: u32,
    /// Hex-encoded call data, may be `"0x"`.
    pub input: String,
    /// Amount transferred in wei.
    pub value: U256,
}

// =============================================================================
// CLUSTER B: OWNERSHIP
// =============================================================================

/// Identity of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One edge of the principal ↔ record association.
///
/// Edges are additive: once recorded they are never removed by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerEdge {
    pub principal: PrincipalId,
    pub hash: String,
}

impl OwnerEdge {
    pub fn new(principal: PrincipalId, hash: impl Into<String>) -> Self {
        Self {
            principal,
            hash: hash.into(),
        }
    }
}
