//! Application context.
//!
//! Owns the configuration and the recency registry for the lifetime of the
//! process. Request handlers receive a clone of the context rather than
//! reaching for global state.

use std::sync::Arc;

use crate::config::{RecentsConfig, StorageBackend, Validate};
use crate::error::RecentsResult;
use crate::recency::RecencyRegistry;
use crate::storage::{JsonFileStore, MemoryStore, RecencyStore};

/// Shared, cheaply cloneable handle to the service state.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<RecentsConfig>,
    registry: Arc<RecencyRegistry>,
}

impl AppContext {
    /// Builds the context, selecting the store named by the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(AppContext)` on success
    /// * `Err(RecentsError::Config)` if the configuration is invalid
    pub fn new(config: RecentsConfig) -> RecentsResult<Self> {
        config.validate()?;
        let store: Arc<dyn RecencyStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(JsonFileStore::new(&config.storage.path)),
        };
        Self::with_store(config, store)
    }

    /// Builds the context around an explicit store.
    pub fn with_store(config: RecentsConfig, store: Arc<dyn RecencyStore>) -> RecentsResult<Self> {
        let registry = RecencyRegistry::new(store, config.recency.clone())?;
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }

    /// The loaded configuration.
    pub fn config(&self) -> &RecentsConfig {
        &self.config
    }

    /// The recency registry.
    pub fn registry(&self) -> &Arc<RecencyRegistry> {
        &self.registry
    }
}
