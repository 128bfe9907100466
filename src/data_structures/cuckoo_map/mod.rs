// Copyright (c) 2025 Recent Topics Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Cuckoo hash map with two tables and deterministic hashing.
//!
//! A small associative container used to back per-identity recency state.
//! Keys map into two equally sized tables through two hash functions;
//! lookups probe exactly one slot per table.
//!
//! # Features
//!
//! - Upsert in place, no displacement for existing keys
//! - Displacement chains bounded by a configurable budget
//! - Load-factor and cycle triggered growth (capacity doubles, never shrinks)
//! - Reproducible slot placement (FNV-1a over the key's plain bytes)
//!
//! # Example
//!
//! ```
//! use recent_topics_lib::data_structures::cuckoo_map::{CuckooMap, CuckooMapConfig};
//!
//! let config = CuckooMapConfig::new().with_initial_capacity(4);
//! let mut map = CuckooMap::<String, u64>::with_config(config).unwrap();
//!
//! assert_eq!(map.insert("rust".to_string(), 1), None);
//! assert_eq!(map.insert("rust".to_string(), 2), Some(1));
//! assert_eq!(map.get("rust"), Some(&2));
//!
//! assert_eq!(map.remove("rust"), Some(2));
//! assert_eq!(map.get("rust"), None);
//! ```

mod config;
mod error;
mod hash;
mod table;

#[cfg(test)]
mod tests;

pub use config::CuckooMapConfig;
pub use error::{CuckooMapError, Result};
pub use hash::{fnv1a, mix, SlotKey};
pub use table::CuckooMap;
