//! Persistence collaborators for recent-tag snapshots.
//!
//! The registry depends only on [`RecencyStore`]: an ordered list of tags
//! in, the same ordered list out. Concrete backends decide how the list is
//! encoded; both shipped here use a JSON array of strings.

use async_trait::async_trait;

use crate::error::persistence::PersistenceResult;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Durable storage of most-recent-first tag lists, keyed by identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecencyStore: Send + Sync {
    /// Loads the stored list for `identity`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(tags))` if a snapshot exists
    /// * `Ok(None)` if nothing was ever saved for the identity
    /// * `Err(PersistenceError)` if the backend failed
    async fn load(&self, identity: &str) -> PersistenceResult<Option<Vec<String>>>;

    /// Stores `tags` for `identity`, replacing any earlier snapshot.
    async fn save(&self, identity: &str, tags: &[String]) -> PersistenceResult<()>;
}
