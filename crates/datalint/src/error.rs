//! Error types for the datalint library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datalint operations.
#[derive(Debug, Error)]
pub enum DatalintError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset has no rows to summarize.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Too few rows to learn a reliable profile.
    #[error("Insufficient data: {rows} rows, at least {minimum} required to learn a profile")]
    InsufficientData { rows: usize, minimum: usize },

    /// Profile and dataset have no column in common.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A persisted profile could not be read or violates its invariants.
    #[error("Malformed profile: {0}")]
    MalformedProfile(String),

    /// A validator failed internally.
    #[error("Validator '{check}' failed: {message}")]
    ValidatorExecution { check: String, message: String },

    /// Dataset construction violated a structural rule.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for datalint operations.
pub type Result<T> = std::result::Result<T, DatalintError>;
