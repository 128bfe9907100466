// Copyright (c) 2025 Recent Topics Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash functions for the cuckoo map.
//!
//! Both table indices derive from a single 64-bit FNV-1a digest of the key's
//! canonical bytes, as defined by [`SlotKey`]. For strings those are exactly
//! the UTF-8 bytes, so a tag lands in the same slot in any implementation
//! of FNV-1a 64 regardless of language or platform.
//!
//! * `hash1` is the digest itself.
//! * `hash2` runs the digest through a 64-bit finalizer (xor-shift, odd
//!   multiplicative constant, xor-shift) so that keys sharing low bits
//!   under `hash1` are spread apart under `hash2`.

use std::hash::Hasher;

use fnv::FnvHasher;

/// Odd multiplier of the `hash2` finalizer.
#[allow(clippy::unreadable_literal)]
const MIX_MULTIPLIER: u64 = 0xff51afd7ed558ccd;

/// Keys with a stable byte representation for slot hashing.
///
/// Strings hash their UTF-8 bytes; integers hash their little-endian bytes.
pub trait SlotKey {
    /// Feeds the key's canonical bytes to `hasher`.
    fn write_slot_bytes(&self, hasher: &mut FnvHasher);
}

impl SlotKey for str {
    fn write_slot_bytes(&self, hasher: &mut FnvHasher) {
        hasher.write(self.as_bytes());
    }
}

impl SlotKey for String {
    fn write_slot_bytes(&self, hasher: &mut FnvHasher) {
        self.as_str().write_slot_bytes(hasher);
    }
}

impl SlotKey for [u8] {
    fn write_slot_bytes(&self, hasher: &mut FnvHasher) {
        hasher.write(self);
    }
}

impl<T: SlotKey + ?Sized> SlotKey for &T {
    fn write_slot_bytes(&self, hasher: &mut FnvHasher) {
        (**self).write_slot_bytes(hasher);
    }
}

macro_rules! impl_slot_key_for_int {
    ($($t:ty),*) => {
        $(
            impl SlotKey for $t {
                fn write_slot_bytes(&self, hasher: &mut FnvHasher) {
                    hasher.write(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_slot_key_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Computes the 64-bit FNV-1a digest of a key's canonical bytes.
pub fn fnv1a<K: SlotKey + ?Sized>(key: &K) -> u64 {
    let mut hasher = FnvHasher::default();
    key.write_slot_bytes(&mut hasher);
    hasher.finish()
}

/// Bit-mixes a digest for use by the second table.
pub fn mix(digest: u64) -> u64 {
    let mut h = digest;
    h ^= h >> 33;
    h = h.wrapping_mul(MIX_MULTIPLIER);
    h ^= h >> 33;
    h
}

/// Maps a key to its slot in each of the two tables.
///
/// `capacity` must be a power of two; the modulus reduces to a mask.
#[derive(Debug, Clone, Copy)]
pub struct SlotHasher {
    mask: u64,
}

impl SlotHasher {
    /// Creates a hasher for tables holding `capacity` slots each.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            mask: capacity as u64 - 1,
        }
    }

    /// Slot of `key` in table 1.
    pub fn index1<K: SlotKey + ?Sized>(&self, key: &K) -> usize {
        (fnv1a(key) & self.mask) as usize
    }

    /// Slot of `key` in table 2.
    pub fn index2<K: SlotKey + ?Sized>(&self, key: &K) -> usize {
        (mix(fnv1a(key)) & self.mask) as usize
    }
}
