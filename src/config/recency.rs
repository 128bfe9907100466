//! Recency tracking configuration.
//!
//! Bounds the number of tags kept per identity and tunes the cuckoo map
//! that backs each tracker.

use super::{ConfigResult, Validate};
use crate::data_structures::cuckoo_map::CuckooMapConfig;
use crate::error::config::ConfigError;
use crate::recency::tracker::DEFAULT_RECENT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Upper bound on tags per identity. Trackers scan linearly on eviction.
const MAX_RECENT_CAPACITY: usize = 64;

/// Recency tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecencyConfig {
    /// Maximum number of recent tags kept per identity
    pub capacity: usize,

    /// Initial slots per cuckoo table
    pub map_initial_capacity: usize,

    /// Load factor that triggers cuckoo map growth
    pub map_max_load_factor: f64,

    /// Displacement rounds per insertion before a forced grow
    pub map_max_displacements: usize,
}

impl RecencyConfig {
    /// Builds the cuckoo map configuration described by these settings.
    pub fn map_config(&self) -> CuckooMapConfig {
        CuckooMapConfig::new()
            .with_initial_capacity(self.map_initial_capacity)
            .with_max_load_factor(self.map_max_load_factor)
            .with_max_displacements(self.map_max_displacements)
    }
}

impl Default for RecencyConfig {
    fn default() -> Self {
        let map = CuckooMapConfig::default();
        Self {
            capacity: DEFAULT_RECENT_CAPACITY,
            map_initial_capacity: map.initial_capacity,
            map_max_load_factor: map.max_load_factor,
            map_max_displacements: map.max_displacements,
        }
    }
}

impl Validate for RecencyConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 || self.capacity > MAX_RECENT_CAPACITY {
            return Err(ConfigError::ValueOutOfRange {
                key: "recency.capacity".to_string(),
                message: format!("must be between 1 and {MAX_RECENT_CAPACITY}"),
            });
        }

        self.map_config()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
