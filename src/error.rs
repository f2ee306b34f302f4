//! Unified error types for chatlens.
//!
//! A single [`ChatlensError`] enum covers all error cases in the library,
//! following the pattern used by crates like `serde_json` and `csv`.
//!
//! Parsing itself is deliberately forgiving: empty or non-matching input
//! yields an empty table, and an unparseable timestamp keeps its row with
//! the time fields absent. Errors here are for I/O, output encoding, and
//! invalid caller requests.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred reading the export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested sender does not appear in the parsed table.
    #[error("Unknown user '{name}'. Use 'Overall' or one of the senders in the export")]
    UnknownUser {
        /// The sender name that was requested.
        name: String,
    },
}

impl ChatlensError {
    /// Creates an [`UnknownUser`](ChatlensError::UnknownUser) error.
    pub fn unknown_user(name: impl Into<String>) -> Self {
        ChatlensError::UnknownUser { name: name.into() }
    }
}
