//! Process-wide directory of per-identity recency trackers.
//!
//! The registry is an owned value, typically held by the application
//! context and shared behind an `Arc`. Each identity maps to a
//! `tokio::sync::OnceCell`, so the first caller hydrates the tracker from
//! the store while concurrent callers for the same identity wait for that
//! single result instead of hydrating a second copy. Once created, a
//! tracker sits behind its own mutex; the lock is only held for in-memory
//! work, never across a store call.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::{RecencyConfig, Validate};
use crate::error::config::ConfigError;
use crate::error::RecentsResult;
use crate::recency::identity::IdentityKey;
use crate::recency::tracker::{RecencyTracker, TouchOutcome};
use crate::storage::RecencyStore;

/// A tracker shared between the registry and its callers.
pub type SharedTracker = Arc<Mutex<RecencyTracker>>;

type TrackerCell = Arc<OnceCell<SharedTracker>>;

/// Maps identities to their recency trackers, creating them on first use.
pub struct RecencyRegistry {
    trackers: DashMap<IdentityKey, TrackerCell>,
    store: Arc<dyn RecencyStore>,
    config: RecencyConfig,
}

impl RecencyRegistry {
    /// Creates an empty registry.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence collaborator used for hydration and `persist`
    /// * `config` - Capacity and map settings applied to every tracker
    ///
    /// # Returns
    ///
    /// * `Ok(RecencyRegistry)` if `config` is valid
    /// * `Err(RecentsError::Config)` otherwise
    pub fn new(store: Arc<dyn RecencyStore>, config: RecencyConfig) -> RecentsResult<Self> {
        config.validate()?;
        Ok(Self {
            trackers: DashMap::new(),
            store,
            config,
        })
    }

    /// Number of identities with a live tracker.
    pub fn len(&self) -> usize {
        self.trackers
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Returns whether no tracker has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether a tracker exists for `identity`. Never hydrates.
    pub fn contains(&self, identity: &str) -> bool {
        let Ok(identity) = IdentityKey::parse(identity) else {
            return false;
        };
        self.trackers
            .get(&identity)
            .map_or(false, |cell| cell.initialized())
    }

    /// Returns the tracker for `identity`, creating and hydrating it if absent.
    ///
    /// Hydration loads the stored snapshot at most once per identity. If the
    /// load fails the error is returned, no tracker is retained, and the next
    /// call tries again.
    ///
    /// # Returns
    ///
    /// * `Ok(SharedTracker)` on success
    /// * `Err(RecentsError::MissingIdentity)` for a blank identity
    /// * `Err(RecentsError::Persistence)` if the store failed to load
    pub async fn resolve(&self, identity: &str) -> RecentsResult<SharedTracker> {
        let identity = IdentityKey::parse(identity)?;
        self.resolve_key(&identity).await
    }

    /// Records that `identity` used `tag` and returns the updated list.
    ///
    /// A blank tag changes nothing; the current list is still returned.
    pub async fn touch(&self, identity: &str, tag: &str) -> RecentsResult<Vec<String>> {
        let identity = IdentityKey::parse(identity)?;
        let tracker = self.resolve_key(&identity).await?;

        let (outcome, tags) = {
            let mut tracker = tracker.lock();
            let outcome = tracker.touch(tag);
            (outcome, tracker.list())
        };

        match outcome {
            TouchOutcome::Rejected => debug!(identity = %identity, "Ignored blank tag"),
            TouchOutcome::Evicted(evicted) => {
                debug!(identity = %identity, evicted = %evicted, "Recent tag evicted")
            }
            TouchOutcome::Refreshed | TouchOutcome::Inserted => {}
        }
        Ok(tags)
    }

    /// Recent tags for `identity`, most recent first.
    pub async fn snapshot(&self, identity: &str) -> RecentsResult<Vec<String>> {
        let tracker = self.resolve(identity).await?;
        let tags = tracker.lock().list();
        Ok(tags)
    }

    /// Saves the current list for `identity`, replacing any stored snapshot.
    pub async fn persist(&self, identity: &str) -> RecentsResult<()> {
        let identity = IdentityKey::parse(identity)?;
        let tracker = self.resolve_key(&identity).await?;
        let tags = tracker.lock().list();

        self.store.save(identity.as_str(), &tags).await?;
        info!(identity = %identity, count = tags.len(), "Persisted recent tags");
        Ok(())
    }

    /// Saves every live tracker. Intended for shutdown.
    ///
    /// # Returns
    ///
    /// The number of snapshots written, or the first store failure.
    pub async fn persist_all(&self) -> RecentsResult<usize> {
        let snapshots: Vec<(IdentityKey, Vec<String>)> = self
            .trackers
            .iter()
            .filter_map(|entry| {
                let tracker = entry.value().get()?;
                let tags = tracker.lock().list();
                Some((entry.key().clone(), tags))
            })
            .collect();

        futures::future::try_join_all(
            snapshots
                .iter()
                .map(|(identity, tags)| self.store.save(identity.as_str(), tags)),
        )
        .await?;

        info!(count = snapshots.len(), "Persisted all recent tags");
        Ok(snapshots.len())
    }

    async fn resolve_key(&self, identity: &IdentityKey) -> RecentsResult<SharedTracker> {
        // Clone the cell out so no map guard is held across the await.
        let cell = Arc::clone(self.trackers.entry(identity.clone()).or_default().value());
        let tracker = cell.get_or_try_init(|| self.hydrate(identity)).await?;
        Ok(Arc::clone(tracker))
    }

    async fn hydrate(&self, identity: &IdentityKey) -> RecentsResult<SharedTracker> {
        let mut tracker =
            RecencyTracker::with_map_config(self.config.capacity, self.config.map_config())
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        match self.store.load(identity.as_str()).await {
            Ok(Some(tags)) => tracker.hydrate(tags),
            Ok(None) => {}
            Err(e) => {
                warn!(identity = %identity, error = %e, "Failed to hydrate recent tags");
                return Err(e.into());
            }
        }

        debug!(identity = %identity, tags = tracker.len(), "Created recency tracker");
        Ok(Arc::new(Mutex::new(tracker)))
    }
}

impl fmt::Debug for RecencyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyRegistry")
            .field("identities", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
