//! Data structures for the recent-topics service.
//!
//! Implementations here are plain single-owner containers; synchronization
//! is left to their owners.

pub mod cuckoo_map;

// Re-export common data structures
pub use cuckoo_map::{CuckooMap, CuckooMapConfig, CuckooMapError};
