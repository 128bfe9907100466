//! Bounded most-recently-touched tag tracker.
//!
//! A tracker records `tag -> last touch` in a [`CuckooMap`] and keeps at most
//! `capacity` tags. Touch times come from a per-tracker logical clock, so
//! every touch is strictly newer than the last one. Ordering is derived on
//! demand by [`RecencyTracker::list`]; with a capacity of a dozen or so a
//! linear scan for the oldest entry is cheaper than a second index.
//!
//! Ties are broken by tag: the oldest entry is the smallest
//! `(timestamp, tag)` and listing sorts newest first, then by tag.

use std::cmp::Reverse;

use crate::data_structures::cuckoo_map::{self, CuckooMap, CuckooMapConfig};

/// Default number of tags a tracker retains.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// What a call to [`RecencyTracker::touch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchOutcome {
    /// The tag was blank; nothing changed.
    Rejected,
    /// The tag was already tracked and is now the most recent.
    Refreshed,
    /// The tag was added without exceeding capacity.
    Inserted,
    /// The tag was added and the contained tag was evicted as the oldest.
    Evicted(String),
}

/// Recently touched tags for a single identity.
#[derive(Debug, Clone)]
pub struct RecencyTracker {
    entries: CuckooMap<String, u64>,
    capacity: usize,
    map_config: CuckooMapConfig,
    clock: u64,
}

impl RecencyTracker {
    /// Creates an empty tracker holding at most `capacity` tags.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: CuckooMap::new(),
            capacity: capacity.max(1),
            map_config: CuckooMapConfig::default(),
            clock: 0,
        }
    }

    /// Creates an empty tracker backed by a map built from `map_config`.
    ///
    /// # Returns
    ///
    /// * `Ok(RecencyTracker)` on success
    /// * `Err(CuckooMapError)` if the map configuration is unusable
    pub fn with_map_config(capacity: usize, map_config: CuckooMapConfig) -> cuckoo_map::Result<Self> {
        let entries = CuckooMap::with_config(map_config.clone())?;
        Ok(Self {
            entries,
            capacity: capacity.max(1),
            map_config,
            clock: 0,
        })
    }

    /// Maximum number of tags retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tags currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no tags are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `tag` (after trimming) is tracked.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag.trim())
    }

    /// Records that `tag` was just used.
    ///
    /// Surrounding whitespace is ignored and blank tags are rejected without
    /// touching any state. A new tag that pushes the count past capacity
    /// evicts the oldest entry.
    pub fn touch(&mut self, tag: &str) -> TouchOutcome {
        let tag = tag.trim();
        if tag.is_empty() {
            return TouchOutcome::Rejected;
        }

        self.clock += 1;
        let now = self.clock;
        if let Some(last_touch) = self.entries.get_mut(tag) {
            *last_touch = now;
            return TouchOutcome::Refreshed;
        }

        self.entries.insert(tag.to_string(), now);
        match self.evict_overflow() {
            Some(evicted) => TouchOutcome::Evicted(evicted),
            None => TouchOutcome::Inserted,
        }
    }

    /// Tracked tags, most recently touched first.
    pub fn list(&self) -> Vec<String> {
        let mut entries: Vec<(&String, u64)> = self
            .entries
            .iter()
            .map(|(tag, last_touch)| (tag, *last_touch))
            .collect();
        entries.sort_unstable_by_key(|&(tag, last_touch)| (Reverse(last_touch), tag));
        entries.into_iter().map(|(tag, _)| tag.clone()).collect()
    }

    /// Replaces the tracker contents with a persisted most-recent-first list.
    ///
    /// Blank entries and repeats are skipped and at most `capacity` tags are
    /// kept. Entries receive strictly decreasing synthetic timestamps so that
    /// [`list`](Self::list) reproduces the input order.
    pub fn hydrate<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seeded: Vec<String> = Vec::with_capacity(self.capacity);
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || seeded.iter().any(|seen| seen == tag) {
                continue;
            }
            seeded.push(tag.to_string());
            if seeded.len() == self.capacity {
                break;
            }
        }

        // `map_config` was validated when the tracker was built.
        let mut entries = CuckooMap::build(&self.map_config);
        let base = seeded.len() as u64;
        for (index, tag) in seeded.into_iter().enumerate() {
            entries.insert(tag, base - index as u64);
        }

        self.entries = entries;
        self.clock = base;
    }

    fn evict_overflow(&mut self) -> Option<String> {
        if self.entries.len() <= self.capacity {
            return None;
        }
        let oldest = self
            .entries
            .iter()
            .min_by_key(|&(tag, last_touch)| (*last_touch, tag))
            .map(|(tag, _)| tag.clone())?;
        self.entries.remove(oldest.as_str());
        tracing::debug!(tag = %oldest, "Evicted oldest recent tag");
        Some(oldest)
    }

    /// Touches `tag` with an explicit timestamp. Lets tests force ties.
    #[cfg(test)]
    pub(crate) fn touch_at(&mut self, tag: &str, last_touch: u64) -> TouchOutcome {
        let existed = self.entries.insert(tag.to_string(), last_touch).is_some();
        self.clock = self.clock.max(last_touch);
        if existed {
            return TouchOutcome::Refreshed;
        }
        match self.evict_overflow() {
            Some(evicted) => TouchOutcome::Evicted(evicted),
            None => TouchOutcome::Inserted,
        }
    }
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn tracker_with(capacity: usize, tags: &[&str]) -> RecencyTracker {
        let mut tracker = RecencyTracker::new(capacity);
        for tag in tags {
            tracker.touch(tag);
        }
        tracker
    }

    #[test]
    fn test_oldest_evicted_past_capacity() {
        let mut tracker = tracker_with(3, &["A", "B", "C"]);
        assert_eq!(tracker.touch("D"), TouchOutcome::Evicted("A".to_string()));
        assert_eq!(tracker.list(), vec!["D", "C", "B"]);
    }

    #[test]
    fn test_retouch_moves_to_front() {
        let mut tracker = tracker_with(3, &["A", "B", "C"]);
        assert_eq!(tracker.list(), vec!["C", "B", "A"]);

        assert_eq!(tracker.touch("B"), TouchOutcome::Refreshed);
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.list(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_repeated_touch_is_idempotent() {
        let mut tracker = tracker_with(3, &["A"]);
        for _ in 0..5 {
            tracker.touch("A");
        }
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.list(), vec!["A"]);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "control whitespace")]
    fn test_blank_tag_rejected(tag: &str) {
        let mut tracker = tracker_with(3, &["A"]);
        assert_eq!(tracker.touch(tag), TouchOutcome::Rejected);
        assert_eq!(tracker.list(), vec!["A"]);
    }

    #[test]
    fn test_tags_are_trimmed() {
        let mut tracker = tracker_with(3, &["  rust "]);
        assert_eq!(tracker.touch("rust"), TouchOutcome::Refreshed);
        assert!(tracker.contains(" rust"));
        assert_eq!(tracker.list(), vec!["rust"]);
    }

    #[test]
    fn test_hydrate_reproduces_order() {
        let mut tracker = RecencyTracker::new(10);
        tracker.hydrate(["x", "y", "z"]);
        assert_eq!(tracker.list(), vec!["x", "y", "z"]);

        tracker.touch("z");
        assert_eq!(tracker.list(), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_hydrate_skips_blanks_and_repeats_and_truncates() {
        let mut tracker = RecencyTracker::new(3);
        tracker.hydrate(vec!["a", " ", "b", "a", "c", "d"]);
        assert_eq!(tracker.list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_hydrate_replaces_previous_state() {
        let mut tracker = tracker_with(3, &["old1", "old2"]);
        tracker.hydrate(["new"]);
        assert_eq!(tracker.list(), vec!["new"]);
        assert!(!tracker.contains("old1"));
    }

    #[test]
    fn test_hydrate_keeps_configured_map() {
        let config = CuckooMapConfig::new()
            .with_initial_capacity(64)
            .with_max_load_factor(0.5);
        let mut tracker = RecencyTracker::with_map_config(5, config).unwrap();
        tracker.hydrate(["a", "b"]);

        assert_eq!(tracker.entries.capacity(), 64);
        assert_eq!(tracker.list(), vec!["a", "b"]);
    }

    #[test]
    fn test_eviction_tie_breaks_on_tag() {
        let mut tracker = RecencyTracker::new(2);
        tracker.touch_at("beta", 5);
        tracker.touch_at("alpha", 5);

        assert_eq!(tracker.list(), vec!["alpha", "beta"]);
        assert_eq!(
            tracker.touch_at("gamma", 9),
            TouchOutcome::Evicted("alpha".to_string())
        );
        assert_eq!(tracker.list(), vec!["gamma", "beta"]);
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut tracker = RecencyTracker::default();
        for i in 0..100 {
            tracker.touch(&format!("tag{i}"));
            assert!(tracker.len() <= DEFAULT_RECENT_CAPACITY);
        }
        let expected: Vec<String> = (90..100).rev().map(|i| format!("tag{i}")).collect();
        assert_eq!(tracker.list(), expected);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut tracker = RecencyTracker::new(0);
        tracker.touch("a");
        tracker.touch("b");
        assert_eq!(tracker.capacity(), 1);
        assert_eq!(tracker.list(), vec!["b"]);
    }
}
