//! Policy-composed bounded cache.
//!
//! [`PolicyCache`] is the single cache type in this crate: a bounded
//! associative store assembled from four orthogonal policies, composed by
//! value and dispatched statically. Picking an eviction algorithm means
//! picking a type, not a branch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   PolicyCache<K, V, E, S, A, C>                     │
//! │                                                                     │
//! │   insert(k, v) ──► store.contains? ──┬─ yes ─► overwrite            │
//! │                                      │         eviction.on_update   │
//! │                                      └─ no ──► capacity.needs_      │
//! │                                                eviction? drain      │
//! │                                                store.insert         │
//! │                                                eviction.on_insert   │
//! │                                                                     │
//! │   get(k) ──► hit?  ──┬─ yes ─► access.on_access ─► true?            │
//! │                      │          └─► eviction.on_access              │
//! │                      └─ no ──► access.on_miss ─► None               │
//! │                                                                     │
//! │   drain: while victims needed:                                      │
//! │     eviction.select_victim ─► store.remove ─► eviction.remove_key   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! After every public operation:
//!
//! 1. `len() <= ` the capacity policy's effective maximum.
//! 2. A key is in storage iff the eviction policy tracks it.
//!
//! The fixed ordering of the update steps (evict → store insert → policy
//! insert; store overwrite → policy update; store remove → policy remove)
//! keeps (2) true even when an operation aborts partway with
//! [`PolicyError`].
//!
//! ## Defaults per algorithm
//!
//! | Alias | Eviction | Access | Storage | Capacity |
//! |-------|----------|--------|---------|----------|
//! | [`LruCache`] | [`LruPolicy`] | [`UpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//! | [`MruCache`] | [`MruPolicy`] | [`UpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//! | [`FifoCache`] | [`FifoPolicy`] | [`NoUpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//! | [`LfuCache`] | [`LfuPolicy`] | [`UpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//! | [`MfuCache`] | [`MfuPolicy`] | [`UpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//! | [`RandomCache`] | [`RandomPolicy`] | [`NoUpdateOnAccess`] | [`HashMapStore`] | [`FixedCapacity`] |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert(1, "a").unwrap();
//! cache.insert(2, "b").unwrap();
//! cache.get(&1); // 1 is now the most recently used
//! cache.insert(3, "c").unwrap(); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"a"));
//! assert_eq!(cache.get(&3), Some(&"c"));
//! ```
//!
//! Custom compositions plug any four policies together; a type that does
//! not satisfy its policy contract fails to compile:
//!
//! ```
//! use evictkit::access::ThresholdAccess;
//! use evictkit::cache::PolicyCache;
//! use evictkit::capacity::SoftCapacity;
//! use evictkit::policy::lfu::LfuPolicy;
//! use evictkit::store::hashmap::HashMapStore;
//!
//! // LFU that only promotes after 2 hits, with a 20% soft overshoot.
//! let mut cache = PolicyCache::from_parts(
//!     LfuPolicy::new(),
//!     HashMapStore::new(),
//!     ThresholdAccess::new(2),
//!     SoftCapacity::new(100),
//! );
//! cache.insert("k", 1).unwrap();
//! assert_eq!(cache.get(&"k"), Some(&1));
//! ```
//!
//! ## Thread Safety
//!
//! A `PolicyCache` is single-threaded: every operation takes `&mut self`,
//! runs to completion, and never blocks. Wrap the whole cache in external
//! synchronization to share it. The cache is deliberately not `Clone`:
//! deep-copying a live cache is almost never what a caller wants.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::access::{NoUpdateOnAccess, UpdateOnAccess};
use crate::capacity::FixedCapacity;
use crate::error::PolicyError;
use crate::policy::fifo::FifoPolicy;
use crate::policy::lfu::LfuPolicy;
use crate::policy::lru::LruPolicy;
use crate::policy::mfu::MfuPolicy;
use crate::policy::mru::MruPolicy;
use crate::policy::random::RandomPolicy;
use crate::store::hashmap::HashMapStore;
use crate::store::traits::StoreMut;
use crate::traits::{AccessPolicy, CapacityPolicy, EvictionPolicy};

/// Bounded cache assembled from four policies.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
/// - `V`: value type
/// - `E`: [`EvictionPolicy`] implementation
/// - `S`: [`StoreMut`] implementation
/// - `A`: [`AccessPolicy`] implementation
/// - `C`: [`CapacityPolicy`] implementation
pub struct PolicyCache<K, V, E, S, A, C> {
    eviction: E,
    store: S,
    access: A,
    capacity: C,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, E, S, A, C> PolicyCache<K, V, E, S, A, C>
where
    K: Clone + Eq + Hash,
    E: EvictionPolicy<K>,
    S: StoreMut<K, V>,
    A: AccessPolicy<K>,
    C: CapacityPolicy,
{
    /// Assembles a cache from explicit policy instances.
    pub fn from_parts(eviction: E, store: S, access: A, capacity: C) -> Self {
        Self {
            eviction,
            store,
            access,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Inserts or overwrites a key, returning the previous value.
    ///
    /// For a new key, the capacity policy is consulted first and victims are
    /// drained until there is room; if no room can be made (capacity 0), the
    /// insert is a silent no-op. Overwrites never trigger eviction.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if eviction selects a key unknown to storage
    /// (invariant breach in a policy implementation). The new entry is not
    /// inserted in that case, but the cache remains self-consistent.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first").unwrap(), None);
    /// assert_eq!(cache.insert(1, "second").unwrap(), Some("first"));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, PolicyError> {
        if self.store.contains(&key) {
            let previous = self.store.insert(key.clone(), value);
            self.eviction.on_update(&key);
            return Ok(previous);
        }

        let size = self.store.len();
        if self.capacity.needs_eviction(size) {
            let count = self.capacity.eviction_count(size);
            self.drain_victims(count)?;
        }
        if self.capacity.needs_eviction(self.store.len()) {
            // No room could be made (capacity 0): the insert is a no-op.
            return Ok(None);
        }

        self.store.insert(key.clone(), value);
        self.eviction.on_insert(key);
        Ok(None)
    }

    /// Looks up a key, letting the access policy decide whether the hit
    /// refreshes eviction order. Returns `None` on a miss (after informing
    /// the access policy).
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert("k", 42).unwrap();
    /// assert_eq!(cache.get(&"k"), Some(&42));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.store.contains(key) {
            if self.access.on_access(key) {
                self.eviction.on_access(key);
            }
            self.store.get(key)
        } else {
            self.access.on_miss(key);
            None
        }
    }

    /// Returns `true` if the key is present. No side effects: neither the
    /// access policy nor the eviction policy hears about this query.
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.store.remove(key);
        if removed.is_some() {
            self.eviction.remove_key(key);
        }
        removed
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the capacity policy's nominal capacity.
    pub fn capacity(&self) -> usize {
        self.capacity.capacity()
    }

    /// Reconfigures the capacity policy, then drains victims until the new
    /// limit is satisfied (leaving room for the next insert).
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] under the same conditions as
    /// [`insert`](Self::insert).
    pub fn set_capacity(&mut self, new_capacity: usize) -> Result<(), PolicyError> {
        self.capacity.set_capacity(new_capacity);
        loop {
            let size = self.store.len();
            if size == 0 || !self.capacity.needs_eviction(size) {
                break;
            }
            self.drain_victims(1)?;
            if self.store.len() == size {
                // The eviction policy has nothing left to offer.
                break;
            }
        }
        Ok(())
    }

    /// Drops every entry and resets eviction metadata.
    pub fn clear(&mut self) {
        self.store.clear();
        self.eviction.clear();
    }

    /// Returns the eviction policy, e.g. to query per-key frequencies.
    pub fn eviction_policy(&self) -> &E {
        &self.eviction
    }

    /// Returns the eviction policy mutably, e.g. to reseed a
    /// [`RandomPolicy`].
    pub fn eviction_policy_mut(&mut self) -> &mut E {
        &mut self.eviction
    }

    /// Returns the access policy.
    pub fn access_policy(&self) -> &A {
        &self.access
    }

    /// Returns the access policy mutably, e.g. to retune a threshold.
    pub fn access_policy_mut(&mut self) -> &mut A {
        &mut self.access
    }

    /// Returns the capacity policy.
    pub fn capacity_policy(&self) -> &C {
        &self.capacity
    }

    /// Returns the capacity policy mutably, e.g. to drive
    /// [`DynamicCapacity::consider_capacity_adjustment`](crate::capacity::DynamicCapacity::consider_capacity_adjustment).
    pub fn capacity_policy_mut(&mut self) -> &mut C {
        &mut self.capacity
    }

    /// Returns the storage policy (shared access only; mutating storage
    /// behind the façade's back would break key agreement).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Removes `count` victims chosen by the eviction policy, stopping
    /// early if storage or the policy runs dry.
    fn drain_victims(&mut self, count: usize) -> Result<(), PolicyError> {
        for _ in 0..count {
            if self.store.is_empty() {
                break;
            }
            let Some(victim) = self.eviction.select_victim() else {
                break;
            };
            if self.store.remove(&victim).is_none() {
                return Err(PolicyError::new(
                    "eviction selected a key that storage does not contain",
                ));
            }
            self.eviction.remove_key(&victim);
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.store.len(), self.eviction.len());
    }
}

impl<K, V, E, S, A, C> fmt::Debug for PolicyCache<K, V, E, S, A, C>
where
    K: Clone + Eq + Hash,
    E: EvictionPolicy<K>,
    S: StoreMut<K, V>,
    A: AccessPolicy<K>,
    C: CapacityPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyCache")
            .field("len", &self.store.len())
            .field("capacity", &self.capacity.capacity())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Per-algorithm aliases and constructors
// =============================================================================

/// Least Recently Used cache with the default policy wiring.
pub type LruCache<K, V> =
    PolicyCache<K, V, LruPolicy<K>, HashMapStore<K, V>, UpdateOnAccess, FixedCapacity>;

/// Most Recently Used cache with the default policy wiring.
pub type MruCache<K, V> =
    PolicyCache<K, V, MruPolicy<K>, HashMapStore<K, V>, UpdateOnAccess, FixedCapacity>;

/// First In First Out cache with the default policy wiring. Reads do not
/// refresh position.
pub type FifoCache<K, V> =
    PolicyCache<K, V, FifoPolicy<K>, HashMapStore<K, V>, NoUpdateOnAccess, FixedCapacity>;

/// Least Frequently Used cache with the default policy wiring.
pub type LfuCache<K, V> =
    PolicyCache<K, V, LfuPolicy<K>, HashMapStore<K, V>, UpdateOnAccess, FixedCapacity>;

/// Most Frequently Used cache with the default policy wiring.
pub type MfuCache<K, V> =
    PolicyCache<K, V, MfuPolicy<K>, HashMapStore<K, V>, UpdateOnAccess, FixedCapacity>;

/// Uniform random replacement cache with the default policy wiring. Reads
/// do not change eviction probability.
pub type RandomCache<K, V> =
    PolicyCache<K, V, RandomPolicy<K>, HashMapStore<K, V>, NoUpdateOnAccess, FixedCapacity>;

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            LruPolicy::with_capacity(capacity),
            HashMapStore::with_capacity(capacity),
            UpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MRU cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            MruPolicy::with_capacity(capacity),
            HashMapStore::with_capacity(capacity),
            UpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a FIFO cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            FifoPolicy::with_capacity(capacity),
            HashMapStore::with_capacity(capacity),
            NoUpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            LfuPolicy::new(),
            HashMapStore::with_capacity(capacity),
            UpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}

impl<K, V> MfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MFU cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            MfuPolicy::new(),
            HashMapStore::with_capacity(capacity),
            UpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}

impl<K, V> RandomCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a random-replacement cache with the default RNG seed.
    pub fn new(capacity: usize) -> Self {
        PolicyCache::from_parts(
            RandomPolicy::new(),
            HashMapStore::with_capacity(capacity),
            NoUpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }

    /// Creates a random-replacement cache with an explicit RNG seed, so
    /// eviction sequences replay across runs.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::RandomCache;
    ///
    /// let mut a = RandomCache::with_seed(3, 42);
    /// let mut b = RandomCache::with_seed(3, 42);
    /// for i in 0..10 {
    ///     a.insert(i, i).unwrap();
    ///     b.insert(i, i).unwrap();
    /// }
    /// let survivors_a: Vec<bool> = (0..10).map(|i| a.contains(&i)).collect();
    /// let survivors_b: Vec<bool> = (0..10).map(|i| b.contains(&i)).collect();
    /// assert_eq!(survivors_a, survivors_b);
    /// ```
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        PolicyCache::from_parts(
            RandomPolicy::with_seed(seed),
            HashMapStore::with_capacity(capacity),
            NoUpdateOnAccess,
            FixedCapacity::new(capacity),
        )
    }
}
