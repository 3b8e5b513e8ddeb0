//! crates/sv_io/src/lib.rs
//! File and JSON I/O for the apportionment engine.
//!
//! - Shared error type (`IoError`) used by every module here.
//! - `loader`: base data + params from JSON files (camelCase wire format).
//! - `canonical_json`: sorted keys, compact, no trailing newline.
//! - `hasher`: SHA-256 over raw or canonical bytes, lowercase hex.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use sv_core::errors::{ConfigurationError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax or shape errors with a JSON Pointer to the offending value.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    #[error("invalid base data: {0}")]
    Config(#[from] ConfigurationError),

    #[error("invalid params: {0}")]
    Params(CoreError),
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use canonical_json::{to_canonical_bytes, write_canonical_file};
pub use hasher::{sha256_canonical, sha256_hex};
pub use loader::{load_base_data, load_params, parse_base_data, parse_params, BaseDataFile};
