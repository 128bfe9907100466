//! Persistence error module.
//!
//! Failures of the collaborator that stores per-identity recent lists.

use thiserror::Error;

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors raised while loading or saving a recent-tag snapshot.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backing medium could not be read or written.
    #[error("Storage I/O failed for identity {identity}: {source}")]
    Io {
        /// Identity whose snapshot was being accessed
        identity: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A stored snapshot is not a JSON array of strings.
    #[error("Stored snapshot for identity {identity} is corrupt: {source}")]
    Corrupt {
        /// Identity whose snapshot failed to decode
        identity: String,
        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
