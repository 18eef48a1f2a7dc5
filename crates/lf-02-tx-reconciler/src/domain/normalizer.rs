//! # Normalizer
//!
//! Pure mapping from remote ledger shapes to the stored `TransactionRecord`.

use shared_types::{RawReceipt, RawTransaction, ReceiptStatus, TransactionRecord, TxStatus, U256};

/// Canonical spelling of a transaction hash: `0x` hex is lowercased, anything
/// else is only trimmed. Records are stored and looked up under this form.
pub fn canonical_hash(hash: &str) -> String {
    let hash = hash.trim();
    match hash.strip_prefix("0x").or_else(|| hash.strip_prefix("0X")) {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
            format!("0x{}", digits.to_ascii_lowercase())
        }
        _ => hash.to_string(),
    }
}

/// Build a `TransactionRecord` from a remote transaction and optional receipt.
///
/// - status: receipt status, `Unknown` when there is no receipt or the
///   receipt carries no status field
/// - logs_count: receipt log count, 0 without a receipt
/// - contract_address: `creates` on the transaction, else the receipt's
/// - block_number: 0 for pending transactions
/// - hash: canonical form of the transaction hash
pub fn normalize(tx: &RawTransaction, receipt: Option<&RawReceipt>) -> TransactionRecord {
    let status = match receipt.and_then(|r| r.status) {
        Some(ReceiptStatus::Success) => TxStatus::Success,
        Some(ReceiptStatus::Failure) => TxStatus::Failure,
        None => TxStatus::Unknown,
    };

    let logs_count = receipt
        .map(|r| u32::try_from(r.logs.len()).unwrap_or(u32::MAX))
        .unwrap_or(0);

    let contract_address = tx
        .creates
        .clone()
        .or_else(|| receipt.and_then(|r| r.contract_address.clone()));

    TransactionRecord {
        hash: canonical_hash(&tx.hash),
        status,
        block_hash: tx.block_hash.clone(),
        block_number: tx.block_number.unwrap_or(U256::zero()),
        from: tx.from.clone(),
        to: tx.to.clone(),
        contract_address,
        logs_count,
        input: tx.input.clone(),
        value: tx.value,
    }
}
