//! # Hash-List Decoder (lf-01)
//!
//! Turns a hex-encoded RLP blob into the ordered list of transaction hash
//! strings it carries.
//!
//! ## Accepted Shape
//!
//! ```text
//! hex ──→ bytes ──→ [ item0, item1, ... ]      (top-level RLP items)
//!                      │
//!                      └─ item0 MUST be a list: [ "0xaa..", "0xbb..", ... ]
//!                                                  │
//!                                                  └─ byte strings → hash strings
//! ```
//!
//! The top-level item sequence is treated as the outermost (implicit) list,
//! so a blob encoding the single list `[h1, h2]` decodes to `[[h1, h2]]` and
//! yields `h1, h2`. Top-level items after the first are ignored.
//!
//! ## Sibling Policy
//!
//! | Policy | Non-byte-string element inside the hash list |
//! |--------|----------------------------------------------|
//! | `Lenient` (default) | skipped |
//! | `Strict` | `UnexpectedShape` |

pub mod decoder;
pub mod errors;

pub use decoder::{decode_hash_list, render_hash, DecodePolicy};
pub use errors::DecodeError;
