use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::arena::{NodeArena, NodeId};

#[derive(Debug)]
struct Entry<K> {
    key: K,
    freq: u64,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

/// Ordered frequency buckets: one doubly linked key list per distinct
/// frequency, threaded through a `NodeArena` and ordered by a `BTreeMap`.
///
/// Keys enter at frequency 1 and move one bucket up per touch. Within a
/// bucket, keys sit in promotion order: the head is the key that reached the
/// bucket longest ago. Empty buckets are deleted immediately, so the first
/// and last map entries are always the live minimum and maximum frequencies.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: NodeArena<Entry<K>>,
    index: FxHashMap<K, NodeId>,
    buckets: BTreeMap<u64, Bucket>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: NodeArena::new(),
            index: FxHashMap::default(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    pub fn max_freq(&self) -> Option<u64> {
        self.buckets.keys().next_back().copied()
    }

    /// Head of the lowest-frequency bucket: the coldest key, oldest first.
    pub fn peek_min(&self) -> Option<&K> {
        let (_, bucket) = self.buckets.iter().next()?;
        let id = bucket.head?;
        self.entries.get(id).map(|entry| &entry.key)
    }

    /// Head of the highest-frequency bucket: the hottest key, oldest first.
    pub fn peek_max(&self) -> Option<&K> {
        let (_, bucket) = self.buckets.iter().next_back()?;
        let id = bucket.head?;
        self.entries.get(id).map(|entry| &entry.key)
    }

    /// Tracks a new key at frequency 1. Returns `false` if already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            key: key.clone(),
            freq: 1,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.bucket_push_back(1, id);
        true
    }

    /// Moves a key one frequency bucket up and returns the new frequency.
    ///
    /// The counter saturates at `u64::MAX`; the key is then re-appended to
    /// its bucket so promotion order still advances.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.entries.get(id)?.freq;

        if freq == u64::MAX {
            self.bucket_remove(freq, id);
            self.bucket_push_back(freq, id);
            return Some(freq);
        }

        let next_freq = freq + 1;
        self.bucket_remove(freq, id);
        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.bucket_push_back(next_freq, id);
        Some(next_freq)
    }

    /// Stops tracking a key and returns its final frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = self.entries.get(id)?.freq;
        self.bucket_remove(freq, id);
        self.entries.remove(id).map(|entry| entry.freq)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
    }

    fn bucket_push_back(&mut self, freq: u64, id: NodeId) {
        let bucket = self.buckets.entry(freq).or_default();
        let old_tail = bucket.tail;
        bucket.tail = Some(id);
        if old_tail.is_none() {
            bucket.head = Some(id);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = old_tail;
            entry.next = None;
        }
        if let Some(tail_id) = old_tail {
            if let Some(tail) = self.entries.get_mut(tail_id) {
                tail.next = Some(id);
            }
        }
    }

    fn bucket_remove(&mut self, freq: u64, id: NodeId) {
        let (prev, next) = match self.entries.get(id) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        if let Some(bucket) = self.buckets.get_mut(&freq) {
            if bucket.head == Some(id) {
                bucket.head = next;
            }
            if bucket.tail == Some(id) {
                bucket.tail = prev;
            }
        }

        if let Some(prev_id) = prev {
            if let Some(entry) = self.entries.get_mut(prev_id) {
                entry.next = next;
            }
        }
        if let Some(next_id) = next {
            if let Some(entry) = self.entries.get_mut(next_id) {
                entry.prev = prev;
            }
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }

        let now_empty = self
            .buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(false);
        if now_empty {
            self.buckets.remove(&freq);
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.entries.debug_validate_invariants();
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            return;
        }

        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(bucket.head.is_some(), "empty bucket left behind");
            assert!(bucket.tail.is_some());

            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.freq, freq);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
                count += 1;
            }
            assert_eq!(bucket.tail, last);
            assert!(count > 0);
            total += count;
        }
        assert_eq!(total, self.len());
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_flow() {
        let mut buckets = FrequencyBuckets::new();
        assert!(buckets.insert("a"));
        assert!(buckets.insert("b"));

        assert_eq!(buckets.frequency(&"a"), Some(1));
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(buckets.max_freq(), Some(1));

        assert_eq!(buckets.touch(&"a"), Some(2));
        assert_eq!(buckets.frequency(&"a"), Some(2));
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(buckets.max_freq(), Some(2));

        assert_eq!(buckets.peek_min(), Some(&"b"));
        assert_eq!(buckets.peek_max(), Some(&"a"));
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut buckets = FrequencyBuckets::new();
        assert!(buckets.insert("a"));
        assert!(!buckets.insert("a"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.frequency(&"a"), Some(1));
    }

    #[test]
    fn touch_missing_returns_none() {
        let mut buckets: FrequencyBuckets<&str> = FrequencyBuckets::new();
        assert_eq!(buckets.touch(&"missing"), None);
        assert_eq!(buckets.min_freq(), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn remove_deletes_empty_bucket() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.touch(&"b");
        assert_eq!(buckets.min_freq(), Some(1));

        assert_eq!(buckets.remove(&"a"), Some(1));
        assert_eq!(buckets.min_freq(), Some(2));
        assert!(!buckets.contains(&"a"));
        assert!(buckets.contains(&"b"));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn peek_on_empty() {
        let buckets: FrequencyBuckets<&str> = FrequencyBuckets::new();
        assert_eq!(buckets.peek_min(), None);
        assert_eq!(buckets.peek_max(), None);
        assert_eq!(buckets.min_freq(), None);
        assert_eq!(buckets.max_freq(), None);
    }

    #[test]
    fn fifo_order_within_same_frequency() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.insert("c");

        assert_eq!(buckets.peek_min(), Some(&"a"));
        buckets.remove(&"a");
        assert_eq!(buckets.peek_min(), Some(&"b"));
        buckets.remove(&"b");
        assert_eq!(buckets.peek_min(), Some(&"c"));
    }

    #[test]
    fn promotion_order_within_bucket() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");

        // b reaches bucket 2 first, then a joins behind it.
        buckets.touch(&"b");
        buckets.touch(&"a");
        assert_eq!(buckets.peek_min(), Some(&"b"));
        assert_eq!(buckets.peek_max(), Some(&"b"));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn min_and_max_track_distinct_buckets() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.insert("c");

        buckets.touch(&"a");
        buckets.touch(&"a");
        assert_eq!(buckets.frequency(&"a"), Some(3));
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(buckets.max_freq(), Some(3));
        assert_eq!(buckets.peek_min(), Some(&"b"));
        assert_eq!(buckets.peek_max(), Some(&"a"));

        buckets.remove(&"b");
        buckets.remove(&"c");
        assert_eq!(buckets.min_freq(), Some(3));
        assert_eq!(buckets.peek_min(), Some(&"a"));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.touch(&"a");
        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.min_freq(), None);
        assert_eq!(buckets.peek_min(), None);
        assert_eq!(buckets.peek_max(), None);
    }

    #[test]
    fn invariants_hold_after_mixed_ops() {
        let mut buckets = FrequencyBuckets::new();
        for key in ["a", "b", "c", "d"] {
            buckets.insert(key);
        }
        buckets.touch(&"a");
        buckets.touch(&"a");
        buckets.touch(&"c");
        buckets.remove(&"b");
        buckets.touch(&"d");
        buckets.debug_validate_invariants();
        assert_eq!(buckets.len(), 3);
    }
}
