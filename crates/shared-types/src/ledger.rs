//! # Raw Ledger Shapes
//!
//! Transaction and receipt data as returned by an Ethereum JSON-RPC node
//! (`eth_getTransactionByHash`, `eth_getTransactionReceipt`).
//!
//! Every field a node may omit is optional here; defaults are applied by the
//! normalizer, never by deserialization.

use crate::entities::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Transaction object returned by the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<U256>,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    /// Contract address for creation transactions (only some clients report it here).
    #[serde(default)]
    pub creates: Option<String>,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub value: U256,
}

/// Receipt object returned by the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    /// Absent on pre-Byzantium receipts.
    #[serde(default)]
    pub status: Option<ReceiptStatus>,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Post-Byzantium receipt status quantity (`0x1` success, `0x0` failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptStatus {
    Success,
    Failure,
}

impl ReceiptStatus {
    /// Parse a JSON-RPC quantity string.
    pub fn from_quantity(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
        match u64::from_str_radix(digits, 16).ok()? {
            0 => Some(Self::Failure),
            1 => Some(Self::Success),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> &'static str {
        match self {
            Self::Success => "0x1",
            Self::Failure => "0x0",
        }
    }
}

impl Serialize for ReceiptStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_quantity())
    }
}

impl<'de> Deserialize<'de> for ReceiptStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_quantity(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid receipt status: {}", s)))
    }
}
