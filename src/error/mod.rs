//! Error module for the recent-topics service.
//!
//! Errors are explicit enums per concern, nested under [`RecentsError`] so
//! callers can match on the failure kind while `?` propagates them upward.
//! Absent keys, blank tags and exhausted displacement budgets are not errors
//! and never appear here.

use thiserror::Error;

pub mod config;
pub mod persistence;

pub use config::ConfigError;
pub use persistence::PersistenceError;

/// Result type alias used throughout the crate.
pub type RecentsResult<T> = Result<T, RecentsError>;

/// Core error enum for the recent-topics service.
#[derive(Error, Debug)]
pub enum RecentsError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persistence collaborator failed to load or save a snapshot.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The identity provider supplied no usable identity.
    #[error("Identity error: a non-empty identity is required")]
    MissingIdentity,

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl RecentsError {
    /// Returns whether the error came from the persistence collaborator.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
