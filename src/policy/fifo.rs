//! FIFO (First In First Out) eviction policy.
//!
//! Keys leave in the order they were inserted. Reads and value overwrites do
//! not change a key's position: only insertion order matters.
//!
//! Random-position removal is the awkward operation for a queue, so this
//! policy keeps the insertion order in a doubly linked key list with a
//! key→node map, giving eager O(1) `remove_key` instead of lazy tombstoning.
//! `len` therefore always agrees with storage.
//!
//! ## Operations
//!
//! | Operation       | Time | Effect                        |
//! |-----------------|------|-------------------------------|
//! | `on_insert`     | O(1) | append to the back            |
//! | `on_access`     | O(1) | no-op                         |
//! | `on_update`     | O(1) | no-op (position is preserved) |
//! | `select_victim` | O(1) | front of the list (oldest)    |
//! | `remove_key`    | O(1) | unlink node via the index map |

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::arena::NodeId;
use crate::ds::list::ArenaList;
use crate::traits::EvictionPolicy;

/// First In First Out replacement metadata.
#[derive(Debug)]
pub struct FifoPolicy<K> {
    /// Insertion order: front = oldest (the victim), back = newest.
    queue: ArenaList<K>,
    index: FxHashMap<K, NodeId>,
}

impl<K> FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty FIFO policy.
    pub fn new() -> Self {
        Self {
            queue: ArenaList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty FIFO policy with reserved tracking capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: ArenaList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the age rank of `key` (0 = oldest). O(n).
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.queue.iter().position(|tracked| tracked == key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        assert_eq!(self.queue.len(), self.index.len());
        for (key, &id) in &self.index {
            assert_eq!(self.queue.get(id), Some(key));
        }
        self.queue.debug_validate_invariants();
    }
}

impl<K> Default for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn on_access(&mut self, _key: &K) {
        // Insertion order is not affected by reads.
    }

    fn on_insert(&mut self, key: K) {
        let id = self.queue.push_back(key.clone());
        self.index.insert(key, id);
    }

    fn on_update(&mut self, _key: &K) {
        // Overwrites keep the original insertion position.
    }

    fn select_victim(&mut self) -> Option<K> {
        self.queue.front().cloned()
    }

    fn remove_key(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.queue.remove(id);
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victim_is_oldest_insertion() {
        let mut policy = FifoPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");

        assert_eq!(policy.select_victim(), Some("a"));
    }

    #[test]
    fn access_does_not_change_order() {
        let mut policy = FifoPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        policy.on_access(&"a");
        policy.on_access(&"a");
        assert_eq!(policy.select_victim(), Some("a"));
    }

    #[test]
    fn update_does_not_change_order() {
        let mut policy = FifoPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        policy.on_update(&"a");
        assert_eq!(policy.select_victim(), Some("a"));
    }

    #[test]
    fn remove_key_is_eager() {
        let mut policy = FifoPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");

        policy.remove_key(&"a");
        // len agrees with the live key count immediately
        assert_eq!(policy.len(), 2);
        assert_eq!(policy.select_victim(), Some("b"));
        policy.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_key_keeps_order() {
        let mut policy = FifoPolicy::new();
        policy.on_insert(1);
        policy.on_insert(2);
        policy.on_insert(3);

        policy.remove_key(&2);
        assert_eq!(policy.select_victim(), Some(1));
        policy.remove_key(&1);
        assert_eq!(policy.select_victim(), Some(3));
        policy.debug_validate_invariants();
    }

    #[test]
    fn age_rank_orders_keys() {
        let mut policy = FifoPolicy::new();
        policy.on_insert("first");
        policy.on_insert("second");
        policy.on_insert("third");

        assert_eq!(policy.age_rank(&"first"), Some(0));
        assert_eq!(policy.age_rank(&"second"), Some(1));
        assert_eq!(policy.age_rank(&"third"), Some(2));
        assert_eq!(policy.age_rank(&"missing"), None);
    }

    #[test]
    fn select_victim_on_empty_is_none() {
        let mut policy: FifoPolicy<u64> = FifoPolicy::new();
        assert_eq!(policy.select_victim(), None);
    }

    #[test]
    fn clear_resets_state() {
        let mut policy = FifoPolicy::new();
        policy.on_insert(1);
        policy.on_insert(2);
        policy.clear();
        assert!(policy.is_empty());
        assert_eq!(policy.select_victim(), None);
        policy.debug_validate_invariants();
    }
}
