//! HashMap-backed store implementations.
//!
//! ## Key Components
//!
//! - [`HashMapStore`]: plain `FxHashMap` storage, O(1) expected per op.
//! - [`ReservedHashMapStore`]: pre-sizes its table at construction and
//!   re-reserves after `clear`, avoiding rehash churn for known cache sizes.
//! - [`CompactHashMapStore`]: trades a little time for memory by shrinking
//!   its table whenever removals leave it sparse.
//!
//! All three store `V` directly (no indirection) and are single-threaded;
//! wrap the whole cache in external synchronization if it must be shared.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::store::traits::{StoreCore, StoreMut};

// =============================================================================
// HashMapStore
// =============================================================================

/// Plain hash-map storage.
#[derive(Debug)]
pub struct HashMapStore<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> HashMapStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Creates an empty store with a pre-sized table.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl<K, V> Default for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> StoreCore<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V> StoreMut<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

// =============================================================================
// ReservedHashMapStore
// =============================================================================

/// Hash-map storage that keeps its table pre-sized.
///
/// The reservation is applied at construction and re-applied after `clear`,
/// so a cache that cycles through fill/clear phases never pays for rehashing
/// on the refill.
#[derive(Debug)]
pub struct ReservedHashMapStore<K, V> {
    map: FxHashMap<K, V>,
    reserved: usize,
}

impl<K, V> ReservedHashMapStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store reserving room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            reserved: capacity,
        }
    }

    /// Returns the reservation applied after `clear`.
    pub fn reserved_capacity(&self) -> usize {
        self.reserved
    }

    /// Updates the reservation and grows the table if needed.
    pub fn set_reserved_capacity(&mut self, capacity: usize) {
        self.reserved = capacity;
        let additional = capacity.saturating_sub(self.map.len());
        self.map.reserve(additional);
    }
}

impl<K, V> StoreCore<K, V> for ReservedHashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V> StoreMut<K, V> for ReservedHashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.map.reserve(self.reserved);
    }
}

// =============================================================================
// CompactHashMapStore
// =============================================================================

/// Table capacity beyond this multiple of the live count triggers a shrink.
const SPARSE_FACTOR: usize = 4;

/// Hash-map storage tuned for memory footprint.
///
/// After a removal leaves the table holding more than [`SPARSE_FACTOR`]
/// times as many slots as entries, the table is shrunk to fit; `clear`
/// releases the table entirely.
#[derive(Debug)]
pub struct CompactHashMapStore<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> CompactHashMapStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Returns the current table capacity (diagnostics).
    pub fn table_capacity(&self) -> usize {
        self.map.capacity()
    }
}

impl<K, V> Default for CompactHashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> StoreCore<K, V> for CompactHashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V> StoreMut<K, V> for CompactHashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.map.remove(key);
        if !self.map.is_empty() && self.map.capacity() > self.map.len() * SPARSE_FACTOR {
            self.map.shrink_to_fit();
        }
        removed
    }

    fn clear(&mut self) {
        self.map.clear();
        self.map.shrink_to_fit();
    }
}
