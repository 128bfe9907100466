//! Snapshot storage configuration.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where recent-tag snapshots are persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory only
    Memory,
    /// One JSON file per identity under `path`
    #[default]
    File,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used to persist snapshots
    pub backend: StorageBackend,

    /// Directory for the file backend
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: PathBuf::from("data/recent-topics"),
        }
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path must be set for the file backend".to_string(),
            ));
        }
        Ok(())
    }
}
