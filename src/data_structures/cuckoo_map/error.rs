// Copyright (c) 2025 Recent Topics Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the cuckoo map.

/// Error types for cuckoo map construction.
///
/// Lookups, inserts and removals never fail; only an unusable
/// configuration is reported.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CuckooMapError {
    /// Configuration error
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for cuckoo map operations
pub type Result<T> = std::result::Result<T, CuckooMapError>;
