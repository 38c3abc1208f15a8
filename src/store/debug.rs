//! Instrumented store wrapper.
//!
//! [`DebugStore`] wraps any [`StoreMut`] and counts operations, hits, and
//! misses, exposing a running hit ratio. Counters use `Cell` so the
//! read-path (`get`, `contains`) stays `&self`; the wrapper is therefore as
//! single-threaded as the store it wraps.

use std::cell::Cell;

use crate::store::traits::{StoreCore, StoreMut};

/// Store decorator that counts operations, hits, and misses.
///
/// # Example
///
/// ```
/// use evictkit::store::debug::DebugStore;
/// use evictkit::store::hashmap::HashMapStore;
/// use evictkit::store::traits::{StoreCore, StoreMut};
///
/// let mut store = DebugStore::new(HashMapStore::new());
/// store.insert(1, "one");
/// store.get(&1);
/// store.get(&2);
///
/// assert_eq!(store.hit_count(), 1);
/// assert_eq!(store.miss_count(), 1);
/// assert!((store.hit_ratio() - 0.5).abs() < f64::EPSILON);
/// ```
#[derive(Debug)]
pub struct DebugStore<S> {
    inner: S,
    operations: Cell<u64>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<S> DebugStore<S> {
    /// Wraps a store with fresh counters.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            operations: Cell::new(0),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Returns the total number of store operations observed.
    pub fn operation_count(&self) -> u64 {
        self.operations.get()
    }

    /// Returns the number of successful lookups.
    pub fn hit_count(&self) -> u64 {
        self.hits.get()
    }

    /// Returns the number of failed lookups.
    pub fn miss_count(&self) -> u64 {
        self.misses.get()
    }

    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits.get() + self.misses.get();
        if lookups == 0 {
            0.0
        } else {
            self.hits.get() as f64 / lookups as f64
        }
    }

    /// Zeroes all counters.
    pub fn reset_statistics(&self) {
        self.operations.set(0);
        self.hits.set(0);
        self.misses.set(0);
    }

    /// Returns a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps into the underlying store, discarding counters.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn record_lookup(&self, hit: bool) {
        self.operations.set(self.operations.get() + 1);
        if hit {
            self.hits.set(self.hits.get() + 1);
        } else {
            self.misses.set(self.misses.get() + 1);
        }
    }

    fn record_op(&self) {
        self.operations.set(self.operations.get() + 1);
    }
}

impl<K, V, S> StoreCore<K, V> for DebugStore<S>
where
    S: StoreCore<K, V>,
{
    fn get(&self, key: &K) -> Option<&V> {
        let result = self.inner.get(key);
        self.record_lookup(result.is_some());
        result
    }

    fn contains(&self, key: &K) -> bool {
        let found = self.inner.contains(key);
        self.record_lookup(found);
        found
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, S> StoreMut<K, V> for DebugStore<S>
where
    S: StoreMut<K, V>,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.record_op();
        self.inner.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.record_op();
        self.inner.remove(key)
    }

    fn clear(&mut self) {
        self.record_op();
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::hashmap::HashMapStore;

    #[test]
    fn counts_hits_and_misses() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert(1, "one");

        assert_eq!(store.get(&1), Some(&"one"));
        assert_eq!(store.get(&2), None);
        assert_eq!(store.get(&1), Some(&"one"));

        assert_eq!(store.hit_count(), 2);
        assert_eq!(store.miss_count(), 1);
    }

    #[test]
    fn contains_counts_as_lookup() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert("a", 1);

        assert!(store.contains(&"a"));
        assert!(!store.contains(&"z"));
        assert_eq!(store.hit_count(), 1);
        assert_eq!(store.miss_count(), 1);
    }

    #[test]
    fn hit_ratio_is_zero_before_lookups() {
        let store: DebugStore<HashMapStore<u64, u64>> = DebugStore::new(HashMapStore::new());
        assert_eq!(store.hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_tracks_lookups() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert(1, 1);
        store.get(&1);
        store.get(&1);
        store.get(&1);
        store.get(&2);
        assert!((store.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn operation_count_includes_writes() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert(1, 1); // op 1
        store.get(&1); // op 2
        store.remove(&1); // op 3
        store.clear(); // op 4
        assert_eq!(store.operation_count(), 4);
    }

    #[test]
    fn reset_statistics_zeroes_counters() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert(1, 1);
        store.get(&1);
        store.reset_statistics();
        assert_eq!(store.operation_count(), 0);
        assert_eq!(store.hit_count(), 0);
        assert_eq!(store.miss_count(), 0);
    }

    #[test]
    fn into_inner_returns_wrapped_store() {
        let mut store = DebugStore::new(HashMapStore::new());
        store.insert(1, "one");
        let inner = store.into_inner();
        assert_eq!(inner.get(&1), Some(&"one"));
    }
}
