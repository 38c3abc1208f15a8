//! MRU (Most Recently Used) eviction policy.
//!
//! Structurally identical to [`LruPolicy`](crate::policy::lru::LruPolicy):
//! a doubly linked key list (front = most recent) plus a key→node map. The
//! only difference is victim selection, which takes the *front* of the list.
//! Since an access also moves the key to the front, the most recently touched
//! key is always the next candidate. This suits cyclic scans where the item
//! just used is the one least likely to be needed again soon.
//!
//! All operations are O(1).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::arena::NodeId;
use crate::ds::list::ArenaList;
use crate::traits::EvictionPolicy;

/// Most Recently Used replacement metadata.
#[derive(Debug)]
pub struct MruPolicy<K> {
    /// Recency order: front = most recent (the victim), back = least recent.
    list: ArenaList<K>,
    index: FxHashMap<K, NodeId>,
}

impl<K> MruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty MRU policy.
    pub fn new() -> Self {
        Self {
            list: ArenaList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty MRU policy with reserved tracking capacity.
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

impl<K> Default for MruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for MruPolicy<K>
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
        self.list.front().cloned()
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

    #[test]
    fn victim_is_most_recently_inserted() {
        let mut policy = MruPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");

        assert_eq!(policy.select_victim(), Some("c"));
    }

    #[test]
    fn access_exposes_key_to_eviction() {
        let mut policy = MruPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        // Opposite of LRU: touching "a" makes it the next victim.
        policy.on_access(&"a");
        assert_eq!(policy.select_victim(), Some("a"));
    }

    #[test]
    fn update_counts_as_access() {
        let mut policy = MruPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        policy.on_update(&"a");
        assert_eq!(policy.select_victim(), Some("a"));
    }

    #[test]
    fn remove_key_untracks_it() {
        let mut policy = MruPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        policy.remove_key(&"b");
        assert!(!policy.contains(&"b"));
        assert_eq!(policy.select_victim(), Some("a"));
        policy.debug_validate_invariants();
    }

    #[test]
    fn select_victim_on_empty_is_none() {
        let mut policy: MruPolicy<u64> = MruPolicy::new();
        assert_eq!(policy.select_victim(), None);
    }

    #[test]
    fn oldest_keys_survive_drain() {
        let mut policy = MruPolicy::new();
        for i in 0..5 {
            policy.on_insert(i);
        }

        // Draining removes newest-first.
        assert_eq!(policy.select_victim(), Some(4));
        policy.remove_key(&4);
        assert_eq!(policy.select_victim(), Some(3));
        policy.remove_key(&3);
        assert_eq!(policy.select_victim(), Some(2));
        policy.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut policy = MruPolicy::new();
        policy.on_insert(1);
        policy.on_insert(2);
        policy.clear();
        assert!(policy.is_empty());
        assert_eq!(policy.select_victim(), None);
    }
}
