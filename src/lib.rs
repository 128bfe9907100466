//! Recent Topics Library
//!
//! Tracks the tags each identity touched most recently. The kernel is a
//! two-table cuckoo hash map; on top of it sits a bounded per-identity
//! tracker and a registry that hydrates trackers from, and persists them
//! to, a pluggable store.
//!
//! # Architecture
//!
//! - [`data_structures::cuckoo_map`]: the associative container
//! - [`recency`]: trackers, identity keys and the registry
//! - [`storage`]: the persistence collaborator trait and its backends
//! - [`context`]: the owned application state injected into handlers
//! - [`config`] / [`error`]: layered configuration and error taxonomy

// Re-export public modules
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod recency;
pub mod storage;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use context::AppContext;
pub use error::{RecentsError, RecentsResult};

/// Version information for the recent-topics service.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
