//! Runtime-selected cache construction.
//!
//! The aliases in [`crate::cache`] pick an eviction algorithm at compile
//! time. When the algorithm comes from configuration instead, use
//! [`CacheBuilder`] with an [`Algorithm`] value: it wires the same default
//! policies and hides the per-algorithm types behind one [`Cache`] wrapper.
//!
//! ## Example
//!
//! ```
//! use evictkit::builder::{Algorithm, CacheBuilder};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(Algorithm::Lru);
//! cache.insert(1, "hello".to_string()).unwrap();
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::cache::{FifoCache, LfuCache, LruCache, MfuCache, MruCache, RandomCache};
use crate::error::PolicyError;

/// Available eviction algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Least Recently Used eviction.
    Lru,
    /// Most Recently Used eviction.
    Mru,
    /// First In First Out eviction; reads do not refresh position.
    Fifo,
    /// Least Frequently Used eviction.
    Lfu,
    /// Most Frequently Used eviction.
    Mfu,
    /// Uniform random eviction with an explicit RNG seed.
    Random { seed: u64 },
}

/// Uniform cache wrapper over the six default compositions.
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Clone + Eq + Hash,
{
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lfu(LfuCache<K, V>),
    Mfu(MfuCache<K, V>),
    Random(RandomCache<K, V>),
}

macro_rules! delegate {
    ($self:expr, $cache:ident => $body:expr) => {
        match $self {
            CacheInner::Lru($cache) => $body,
            CacheInner::Mru($cache) => $body,
            CacheInner::Fifo($cache) => $body,
            CacheInner::Lfu($cache) => $body,
            CacheInner::Mfu($cache) => $body,
            CacheInner::Random($cache) => $body,
        }
    };
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Inserts or overwrites a key, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, PolicyError> {
        delegate!(&mut self.inner, cache => cache.insert(key, value))
    }

    /// Looks up a key; hit semantics follow the selected algorithm.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        delegate!(&mut self.inner, cache => cache.get(key))
    }

    /// Returns `true` if the key is present, without side effects.
    pub fn contains(&self, key: &K) -> bool {
        delegate!(&self.inner, cache => cache.contains(key))
    }

    /// Removes a key, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        delegate!(&mut self.inner, cache => cache.remove(key))
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        delegate!(&self.inner, cache => cache.len())
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the nominal capacity.
    pub fn capacity(&self) -> usize {
        delegate!(&self.inner, cache => cache.capacity())
    }

    /// Reconfigures the capacity and evicts down to the new limit.
    pub fn set_capacity(&mut self, new_capacity: usize) -> Result<(), PolicyError> {
        delegate!(&mut self.inner, cache => cache.set_capacity(new_capacity))
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        delegate!(&mut self.inner, cache => cache.clear())
    }
}

/// Builder for runtime-selected caches.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache using the given eviction algorithm and the default
    /// storage/access/capacity wiring for it.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::builder::{Algorithm, CacheBuilder};
    ///
    /// // Deterministic random cache from configuration
    /// let mut cache =
    ///     CacheBuilder::new(10).build::<u64, u64>(Algorithm::Random { seed: 42 });
    /// cache.insert(1, 10).unwrap();
    /// assert_eq!(cache.get(&1), Some(&10));
    /// ```
    pub fn build<K, V>(self, algorithm: Algorithm) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match algorithm {
            Algorithm::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            Algorithm::Mru => CacheInner::Mru(MruCache::new(self.capacity)),
            Algorithm::Fifo => CacheInner::Fifo(FifoCache::new(self.capacity)),
            Algorithm::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            Algorithm::Mfu => CacheInner::Mfu(MfuCache::new(self.capacity)),
            Algorithm::Random { seed } => {
                CacheInner::Random(RandomCache::with_seed(self.capacity, seed))
            }
        };

        Cache { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_algorithms_support_basic_ops() {
        let algorithms = [
            Algorithm::Lru,
            Algorithm::Mru,
            Algorithm::Fifo,
            Algorithm::Lfu,
            Algorithm::Mfu,
            Algorithm::Random { seed: 7 },
        ];

        for algorithm in algorithms {
            let mut cache = CacheBuilder::new(10).build::<u64, String>(algorithm);

            assert_eq!(cache.insert(1, "one".to_string()).unwrap(), None);
            assert_eq!(cache.insert(2, "two".to_string()).unwrap(), None);

            assert_eq!(cache.get(&1), Some(&"one".to_string()));
            assert_eq!(cache.get(&3), None);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&99));
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.capacity(), 10);

            assert_eq!(
                cache.insert(1, "ONE".to_string()).unwrap(),
                Some("one".to_string())
            );
            assert_eq!(cache.get(&1), Some(&"ONE".to_string()));

            assert_eq!(cache.remove(&2), Some("two".to_string()));
            assert_eq!(cache.len(), 1);

            cache.clear();
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn capacity_is_enforced_per_algorithm() {
        let algorithms = [
            Algorithm::Lru,
            Algorithm::Mru,
            Algorithm::Fifo,
            Algorithm::Lfu,
            Algorithm::Mfu,
            Algorithm::Random { seed: 7 },
        ];

        for algorithm in algorithms {
            let mut cache = CacheBuilder::new(3).build::<u64, u64>(algorithm);
            for i in 0..20 {
                cache.insert(i, i).unwrap();
                assert!(cache.len() <= 3, "{algorithm:?} exceeded capacity");
            }
            assert_eq!(cache.len(), 3);
        }
    }

    #[test]
    fn lru_selection_behaves_like_lru() {
        let mut cache = CacheBuilder::new(2).build::<u64, &str>(Algorithm::Lru);
        cache.insert(1, "a").unwrap();
        cache.insert(2, "b").unwrap();
        cache.get(&1);
        cache.insert(3, "c").unwrap();

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn set_capacity_passes_through() {
        let mut cache = CacheBuilder::new(10).build::<u64, u64>(Algorithm::Fifo);
        for i in 0..10 {
            cache.insert(i, i).unwrap();
        }
        cache.set_capacity(3).unwrap();
        assert!(cache.len() < 3);
        assert_eq!(cache.capacity(), 3);
    }
}
