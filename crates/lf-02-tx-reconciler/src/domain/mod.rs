//! # Domain Layer
//!
//! Pure reconciliation logic: outcome types, errors, the normalizer and
//! configuration. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod normalizer;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use normalizer::{canonical_hash, normalize};
pub use value_objects::*;
