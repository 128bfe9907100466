// Copyright (c) 2025 Recent Topics Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the cuckoo map.

use super::error::{CuckooMapError, Result};

/// Configuration for a [`CuckooMap`](super::CuckooMap).
#[derive(Debug, Clone, PartialEq)]
pub struct CuckooMapConfig {
    /// Initial number of slots per table.
    /// Rounded up to the next power of two when the map is built.
    pub initial_capacity: usize,

    /// Maximum ratio of occupied slots to total slots (across both tables)
    /// before a new key forces the tables to double.
    pub max_load_factor: f64,

    /// Number of displacement rounds an insertion may perform before the
    /// tables are grown and the insertion is retried.
    pub max_displacements: usize,
}

impl CuckooMapConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of slots per table.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - Slots per table; rounded up to a power of two.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the maximum load factor before the map grows.
    ///
    /// # Arguments
    ///
    /// * `max_load_factor` - Target upper bound for `len / (2 * capacity)`.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Sets the displacement budget per insertion.
    ///
    /// # Arguments
    ///
    /// * `max_displacements` - Rounds allowed before a forced grow.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_displacements(mut self, max_displacements: usize) -> Self {
        self.max_displacements = max_displacements;
        self
    }

    /// Checks that the configuration can drive a working map.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is usable
    /// * `Err(CuckooMapError::InvalidConfiguration)` otherwise
    pub fn validate(&self) -> Result<()> {
        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(CuckooMapError::InvalidConfiguration(format!(
                "max_load_factor must be in (0.0, 1.0], got {}",
                self.max_load_factor
            )));
        }
        if self.max_displacements == 0 {
            return Err(CuckooMapError::InvalidConfiguration(
                "max_displacements must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The per-table capacity the map starts with.
    pub(crate) fn table_capacity(&self) -> usize {
        self.initial_capacity.max(1).next_power_of_two()
    }
}

impl Default for CuckooMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_load_factor: 0.4, // keeps displacement chains short at tiny sizes
            max_displacements: 32,
        }
    }
}
