// Copyright (c) 2025 Recent Topics Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Two-table cuckoo map.
//!
//! Every key lives in exactly one slot: `index1(key)` in table 1 or
//! `index2(key)` in table 2. Lookups therefore probe at most two slots.
//! Insertion of a new key may displace the occupant of its table-1 slot,
//! which moves to its table-2 slot, possibly displacing another key back
//! into table 1, and so on. When the displacement budget runs out the
//! tables double and the homeless entry is placed again.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::mem;

use crate::data_structures::cuckoo_map::config::CuckooMapConfig;
use crate::data_structures::cuckoo_map::error::Result;
use crate::data_structures::cuckoo_map::hash::{SlotHasher, SlotKey};

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Slot<K, V> = Option<Entry<K, V>>;

/// Which of the two tables a key was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    First,
    Second,
}

/// A hash map resolving collisions by cuckoo displacement between two
/// equally sized tables.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement [`SlotKey`] and `Eq`.
/// * `V` - The value type.
#[derive(Debug, Clone)]
pub struct CuckooMap<K, V> {
    table1: Vec<Slot<K, V>>,
    table2: Vec<Slot<K, V>>,

    /// Slots per table, always a power of two.
    capacity: usize,

    /// Occupied slots across both tables.
    size: usize,

    hasher: SlotHasher,
    max_load_factor: f64,
    max_displacements: usize,
}

impl<K, V> CuckooMap<K, V>
where
    K: SlotKey + Eq,
{
    /// Creates an empty map with the default configuration.
    pub fn new() -> Self {
        Self::build(&CuckooMapConfig::default())
    }

    /// Creates an empty map with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity, load factor and displacement settings.
    ///
    /// # Returns
    ///
    /// * `Ok(CuckooMap)` for a valid configuration
    /// * `Err(CuckooMapError::InvalidConfiguration)` otherwise
    pub fn with_config(config: CuckooMapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    /// Builds an empty map from a configuration that already passed
    /// [`CuckooMapConfig::validate`].
    pub(crate) fn build(config: &CuckooMapConfig) -> Self {
        let capacity = config.table_capacity();
        Self {
            table1: empty_table(capacity),
            table2: empty_table(capacity),
            capacity,
            size: 0,
            hasher: SlotHasher::new(capacity),
            max_load_factor: config.max_load_factor,
            max_displacements: config.max_displacements,
        }
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Slots per table. Only ever grows.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ratio of occupied slots to the total across both tables.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / (2 * self.capacity) as f64
    }

    /// Gets the value stored for `key`.
    ///
    /// # Returns
    ///
    /// `Some(&value)` if the key is present, `None` otherwise.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: SlotKey + Eq + ?Sized,
    {
        let (table, index) = self.locate(key)?;
        self.slot(table, index).as_ref().map(|entry| &entry.value)
    }

    /// Gets a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: SlotKey + Eq + ?Sized,
    {
        let (table, index) = self.locate(key)?;
        self.slot_mut(table, index)
            .as_mut()
            .map(|entry| &mut entry.value)
    }

    /// Checks whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: SlotKey + Eq + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Inserts or updates a key.
    ///
    /// An existing key is overwritten in place without any displacement.
    /// A new key may trigger a grow, either up front when the load factor
    /// would be exceeded or after a displacement chain runs out of budget.
    ///
    /// # Returns
    ///
    /// The previous value if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(current) = self.get_mut(&key) {
            return Some(mem::replace(current, value));
        }

        if self.needs_grow() {
            self.grow();
        }
        self.place(Entry { key, value });
        None
    }

    /// Removes `key` from the map.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: SlotKey + Eq + ?Sized,
    {
        let (table, index) = self.locate(key)?;
        let entry = self.slot_mut(table, index).take()?;
        self.size -= 1;
        Some(entry.value)
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.table1.iter_mut().for_each(|slot| *slot = None);
        self.table2.iter_mut().for_each(|slot| *slot = None);
        self.size = 0;
    }

    /// Iterates over all entries: table 1 in slot order, then table 2.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.table1
            .iter()
            .chain(self.table2.iter())
            .filter_map(|slot| slot.as_ref().map(|entry| (&entry.key, &entry.value)))
    }

    /// Iterates over all keys in [`iter`](Self::iter) order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn locate<Q>(&self, key: &Q) -> Option<(Table, usize)>
    where
        K: Borrow<Q>,
        Q: SlotKey + Eq + ?Sized,
    {
        let i = self.hasher.index1(key);
        if matches!(&self.table1[i], Some(entry) if <K as Borrow<Q>>::borrow(&entry.key) == key) {
            return Some((Table::First, i));
        }
        let j = self.hasher.index2(key);
        if matches!(&self.table2[j], Some(entry) if <K as Borrow<Q>>::borrow(&entry.key) == key) {
            return Some((Table::Second, j));
        }
        None
    }

    fn slot(&self, table: Table, index: usize) -> &Slot<K, V> {
        match table {
            Table::First => &self.table1[index],
            Table::Second => &self.table2[index],
        }
    }

    fn slot_mut(&mut self, table: Table, index: usize) -> &mut Slot<K, V> {
        match table {
            Table::First => &mut self.table1[index],
            Table::Second => &mut self.table2[index],
        }
    }

    fn needs_grow(&self) -> bool {
        (self.size + 1) as f64 > (2 * self.capacity) as f64 * self.max_load_factor
    }

    /// Places a key known to be absent, growing until it fits.
    fn place(&mut self, entry: Entry<K, V>) {
        let mut pending = entry;
        loop {
            match self.try_place(pending) {
                Ok(()) => {
                    self.size += 1;
                    return;
                }
                Err(homeless) => {
                    tracing::trace!(
                        capacity = self.capacity,
                        size = self.size,
                        "Displacement budget exhausted, growing"
                    );
                    self.grow();
                    pending = homeless;
                }
            }
        }
    }

    /// Runs one displacement chain.
    ///
    /// On failure the entry left without a slot is handed back; it may be
    /// a previous occupant rather than the key originally inserted.
    fn try_place(&mut self, entry: Entry<K, V>) -> std::result::Result<(), Entry<K, V>> {
        let mut incoming = entry;
        for _ in 0..self.max_displacements {
            let i = self.hasher.index1(&incoming.key);
            match self.table1[i].replace(incoming) {
                None => return Ok(()),
                Some(displaced) => incoming = displaced,
            }

            let j = self.hasher.index2(&incoming.key);
            match self.table2[j].replace(incoming) {
                None => return Ok(()),
                Some(displaced) => incoming = displaced,
            }
        }
        Err(incoming)
    }

    /// Doubles both tables and reinserts every entry.
    fn grow(&mut self) {
        let new_capacity = self.capacity * 2;
        let old1 = mem::replace(&mut self.table1, empty_table(new_capacity));
        let old2 = mem::replace(&mut self.table2, empty_table(new_capacity));
        self.capacity = new_capacity;
        self.hasher = SlotHasher::new(new_capacity);
        self.size = 0;

        tracing::trace!(capacity = new_capacity, "Cuckoo map grown");

        for entry in old1.into_iter().chain(old2).flatten() {
            self.place(entry);
        }
    }
}

impl<K: SlotKey + Eq, V> Default for CuckooMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_table<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut table = Vec::with_capacity(capacity);
    table.resize_with(capacity, || None);
    table
}

impl<K: SlotKey + Eq + Debug, V> CuckooMap<K, V> {
    /// Checks the placement invariant for every entry. Test helper.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut counted = 0;
        for (i, slot) in self.table1.iter().enumerate() {
            if let Some(entry) = slot {
                assert_eq!(self.hasher.index1(&entry.key), i, "{:?} misplaced", entry.key);
                let j = self.hasher.index2(&entry.key);
                assert!(
                    !matches!(&self.table2[j], Some(other) if other.key == entry.key),
                    "{:?} present in both tables",
                    entry.key
                );
                counted += 1;
            }
        }
        for (j, slot) in self.table2.iter().enumerate() {
            if let Some(entry) = slot {
                assert_eq!(self.hasher.index2(&entry.key), j, "{:?} misplaced", entry.key);
                counted += 1;
            }
        }
        assert_eq!(counted, self.size);
        assert!(self.size <= 2 * self.capacity);
        assert!(self.capacity.is_power_of_two());
    }
}
