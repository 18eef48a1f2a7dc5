//! RLP hash-list decoding.

use crate::errors::DecodeError;
use rlp::Rlp;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How to treat elements of the hash list that are not byte strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Skip nested lists silently; the rest of the batch still decodes.
    #[default]
    Lenient,
    /// Reject the whole blob on the first nested list.
    Strict,
}

/// Decode a hex-encoded RLP blob into the hash strings of its first list.
///
/// ## Errors
///
/// - `MalformedEncoding`: odd-length hex, non-hex digit, truncated RLP item
/// - `UnexpectedShape`: no items, first item not a list, or (strict) a
///   nested list among the hashes
pub fn decode_hash_list(encoded: &str, policy: DecodePolicy) -> Result<Vec<String>, DecodeError> {
    let trimmed = encoded.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits)?;

    let top_level = split_items(&bytes)?;
    let first = top_level
        .first()
        .ok_or_else(|| DecodeError::shape("expected a list, got no items"))?;

    let head = Rlp::new(first);
    if !head.is_list() {
        return Err(DecodeError::shape(
            "expected first element to be a list, got a byte string",
        ));
    }

    let info = head.payload_info()?;
    let elements = split_items(&first[info.header_len..info.total()])?;

    let mut hashes = Vec::with_capacity(elements.len());
    let mut skipped = 0usize;
    for (index, raw) in elements.into_iter().enumerate() {
        let item = Rlp::new(raw);
        if item.is_list() {
            match policy {
                DecodePolicy::Lenient => {
                    skipped += 1;
                    continue;
                }
                DecodePolicy::Strict => {
                    return Err(DecodeError::shape(format!(
                        "element {} is a list, expected a byte string",
                        index
                    )));
                }
            }
        }
        hashes.push(render_hash(item.data()?));
    }

    debug!(
        decoded = hashes.len(),
        skipped,
        extra_top_level = top_level.len() - 1,
        "Decoded hash list"
    );
    Ok(hashes)
}

/// Render a byte-string element as a hash string.
///
/// Elements that already carry hash text (`0x` followed by hex digits) are
/// taken verbatim; raw hash bytes are rendered as `0x` + lowercase hex.
pub fn render_hash(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        if let Some(digits) = text.strip_prefix("0x") {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return text.to_string();
            }
        }
    }
    format!("0x{}", hex::encode(bytes))
}

/// Split a byte run into consecutive, fully-contained RLP items.
fn split_items(mut bytes: &[u8]) -> Result<Vec<&[u8]>, DecodeError> {
    let mut items = Vec::new();
    while !bytes.is_empty() {
        let info = Rlp::new(bytes).payload_info()?;
        let total = info.total();
        if total > bytes.len() {
            return Err(DecodeError::malformed(format!(
                "item declares {} bytes but only {} remain",
                total,
                bytes.len()
            )));
        }
        let (item, rest) = bytes.split_at(total);
        items.push(item);
        bytes = rest;
    }
    Ok(items)
}
