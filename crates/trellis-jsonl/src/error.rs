//! Error types for JSONL operations.

use thiserror::Error;

/// The error type for JSONL read and write operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error from the underlying file or stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or strict-mode deserialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for JSONL operations.
pub type Result<T> = std::result::Result<T, Error>;
