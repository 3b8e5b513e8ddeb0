//! crates/sv_io/src/hasher.rs
//!
//! SHA-256 digests, lowercase hex.
//! - `sha256_canonical(..)` for serializable values (goes through canonical_json),
//!   so two runs over the same input hash identically.
//! - `sha256_hex(..)` for raw bytes.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}
