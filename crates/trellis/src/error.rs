//! Error types for trellis operations.

use crate::domain::TaskId;
use std::io;
use thiserror::Error;

/// The error type for trellis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSONL read or write failed.
    #[error("Snapshot error: {0}")]
    Jsonl(#[from] trellis_jsonl::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Task not found in the snapshot.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
}

/// A specialized Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
