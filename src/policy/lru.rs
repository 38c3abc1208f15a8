//! LRU (Least Recently Used) eviction policy.
//!
//! Tracks recency with a doubly linked key list (front = most recent) plus a
//! map from key to its list node, and selects the back of the list as the
//! victim. List nodes live in a node arena and are addressed by `NodeId`, so
//! no raw pointers are involved.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      LruPolicy<K> Layout                         │
//! │                                                                  │
//! │   index: FxHashMap<K, NodeId>      list: ArenaList<K>            │
//! │                                                                  │
//! │   ┌──────────┬────────┐       head (MRU)          tail (LRU)     │
//! │   │   Key    │ NodeId │        ┌────┐   ┌────┐   ┌────┐          │
//! │   ├──────────┼────────┤        │ k3 │◄─►│ k1 │◄─►│ k2 │          │
//! │   │   k1     │  id_1  │───┐    └────┘   └────┘   └────┘          │
//! │   │   k2     │  id_2  │───┼─── keep      keep     EVICT          │
//! │   │   k3     │  id_3  │───┘                                      │
//! │   └──────────┴────────┘                                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation       | Time | Effect                                |
//! |-----------------|------|---------------------------------------|
//! | `on_insert`     | O(1) | push key to front                     |
//! | `on_access`     | O(1) | splice node to front                  |
//! | `on_update`     | O(1) | same as `on_access`                   |
//! | `select_victim` | O(1) | back of the list, not removed         |
//! | `remove_key`    | O(1) | unlink node via the index map         |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruPolicy;
//! use evictkit::traits::EvictionPolicy;
//!
//! let mut policy = LruPolicy::new();
//! policy.on_insert("a");
//! policy.on_insert("b");
//! policy.on_insert("c");
//!
//! // Touch "a": "b" becomes the coldest key
//! policy.on_access(&"a");
//! assert_eq!(policy.select_victim(), Some("b"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::arena::NodeId;
use crate::ds::list::ArenaList;
use crate::traits::EvictionPolicy;

/// Least Recently Used replacement metadata.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
#[derive(Debug)]
pub struct LruPolicy<K> {
    /// Recency order: front = most recent, back = least recent.
    list: ArenaList<K>,
    /// Key -> node handle into `list`.
    index: FxHashMap<K, NodeId>,
}

impl<K> LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty LRU policy.
    pub fn new() -> Self {
        Self {
            list: ArenaList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty LRU policy with reserved tracking capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: ArenaList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the recency rank of `key` (0 = most recent). O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|tracked| tracked == key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        assert_eq!(self.list.len(), self.index.len());
        for (key, &id) in &self.index {
            assert_eq!(self.list.get(id), Some(key));
        }
        self.list.debug_validate_invariants();
    }
}

impl<K> Default for LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn on_access(&mut self, key: &K) {
        if let Some(&id) = self.index.get(key) {
            self.list.move_to_front(id);
        }
    }

    fn on_insert(&mut self, key: K) {
        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
    }

    fn on_update(&mut self, key: &K) {
        self.on_access(key);
    }

    fn select_victim(&mut self) -> Option<K> {
        self.list.back().cloned()
    }

    fn remove_key(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.list.remove(id);
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Recency Order
    // ==============================================

    mod recency_order {
        use super::*;

        #[test]
        fn victim_is_least_recently_inserted() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            policy.on_insert("b");
            policy.on_insert("c");

            assert_eq!(policy.select_victim(), Some("a"));
        }

        #[test]
        fn access_protects_key() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            policy.on_insert("b");

            policy.on_access(&"a");
            assert_eq!(policy.select_victim(), Some("b"));
        }

        #[test]
        fn update_counts_as_access() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            policy.on_insert("b");

            policy.on_update(&"a");
            assert_eq!(policy.select_victim(), Some("b"));
        }

        #[test]
        fn recency_rank_orders_keys() {
            let mut policy = LruPolicy::new();
            policy.on_insert(1);
            policy.on_insert(2);
            policy.on_insert(3);

            assert_eq!(policy.recency_rank(&3), Some(0));
            assert_eq!(policy.recency_rank(&2), Some(1));
            assert_eq!(policy.recency_rank(&1), Some(2));
            assert_eq!(policy.recency_rank(&99), None);
        }
    }

    // ==============================================
    // Removal & Lifecycle
    // ==============================================

    mod removal {
        use super::*;

        #[test]
        fn remove_key_untracks_it() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            policy.on_insert("b");

            policy.remove_key(&"a");
            assert!(!policy.contains(&"a"));
            assert_eq!(policy.len(), 1);
            assert_eq!(policy.select_victim(), Some("b"));
            policy.debug_validate_invariants();
        }

        #[test]
        fn remove_missing_key_is_noop() {
            let mut policy: LruPolicy<&str> = LruPolicy::new();
            policy.on_insert("a");
            policy.remove_key(&"missing");
            assert_eq!(policy.len(), 1);
        }

        #[test]
        fn select_victim_on_empty_is_none() {
            let mut policy: LruPolicy<u64> = LruPolicy::new();
            assert_eq!(policy.select_victim(), None);
        }

        #[test]
        fn select_victim_does_not_remove() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            assert_eq!(policy.select_victim(), Some("a"));
            assert_eq!(policy.len(), 1);
            assert!(policy.contains(&"a"));
        }

        #[test]
        fn clear_resets_state() {
            let mut policy = LruPolicy::new();
            policy.on_insert("a");
            policy.on_insert("b");
            policy.clear();

            assert!(policy.is_empty());
            assert_eq!(policy.select_victim(), None);
            policy.debug_validate_invariants();
        }
    }

    // ==============================================
    // Invariants
    // ==============================================

    #[test]
    fn invariants_hold_after_mixed_ops() {
        let mut policy = LruPolicy::new();
        for i in 0..10 {
            policy.on_insert(i);
        }
        policy.on_access(&3);
        policy.on_access(&7);
        policy.remove_key(&0);
        policy.on_update(&5);
        policy.remove_key(&9);

        assert_eq!(policy.len(), 8);
        policy.debug_validate_invariants();

        // Victim drain visits every key exactly once.
        let mut drained = Vec::new();
        while let Some(victim) = policy.select_victim() {
            policy.remove_key(&victim);
            drained.push(victim);
        }
        assert_eq!(drained.len(), 8);
        assert!(policy.is_empty());
    }
}
