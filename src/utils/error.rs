//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding a log document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid timestamp {value:?} in log entry {index}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Invalid trace payload in log entry {index}: {reason}")]
    InvalidPayload { index: usize, reason: String },
}

/// Errors that can occur during event normalization
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("No trace events found in log")]
    EmptyRun,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
