//! In-process snapshot store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::RecencyStore;
use crate::error::persistence::PersistenceResult;

/// Keeps snapshots in a concurrent map. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: DashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities with a stored snapshot.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns whether nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[async_trait]
impl RecencyStore for MemoryStore {
    async fn load(&self, identity: &str) -> PersistenceResult<Option<Vec<String>>> {
        Ok(self.snapshots.get(identity).map(|tags| tags.value().clone()))
    }

    async fn save(&self, identity: &str, tags: &[String]) -> PersistenceResult<()> {
        self.snapshots.insert(identity.to_string(), tags.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_order() {
        let store = MemoryStore::new();
        let tags = vec!["z".to_string(), "a".to_string(), "m".to_string()];

        tokio_test::block_on(async {
            assert_eq!(store.load("user").await.unwrap(), None);
            store.save("user", &tags).await.unwrap();
            assert_eq!(store.load("user").await.unwrap(), Some(tags.clone()));
        });
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_previous() {
        let store = MemoryStore::new();
        store.save("user", &["old".to_string()]).await.unwrap();
        store.save("user", &["new".to_string()]).await.unwrap();
        assert_eq!(store.load("user").await.unwrap(), Some(vec!["new".to_string()]));
    }
}
