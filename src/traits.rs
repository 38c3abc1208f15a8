//! # Policy Trait Hierarchy
//!
//! This module defines the contracts that the four orthogonal cache policies
//! must satisfy. The cache façade ([`PolicyCache`](crate::cache::PolicyCache))
//! is generic over one implementation of each, so an invalid composition is
//! rejected by the compiler rather than discovered at runtime.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌───────────────────────────────────────────┐
//!                  │        PolicyCache<K, V, E, S, A, C>      │
//!                  │                                           │
//!                  │   insert / get / contains / remove        │
//!                  │   len / capacity / set_capacity / clear   │
//!                  └────┬─────────┬───────────┬──────────┬─────┘
//!                       │         │           │          │
//!                       ▼         ▼           ▼          ▼
//!          ┌────────────────┐ ┌───────┐ ┌──────────┐ ┌──────────┐
//!          │ EvictionPolicy │ │ Store │ │ Access   │ │ Capacity │
//!          │                │ │ Mut   │ │ Policy   │ │ Policy   │
//!          │ on_insert      │ │       │ │          │ │          │
//!          │ on_access      │ │ (see  │ │ on_access│ │ needs_   │
//!          │ on_update      │ │ store │ │ on_miss  │ │ eviction │
//!          │ select_victim  │ │ ::    │ │          │ │ eviction_│
//!          │ remove_key     │ │traits)│ │          │ │ count    │
//!          └────────────────┘ └───────┘ └──────────┘ └──────────┘
//! ```
//!
//! ## Division of responsibility
//!
//! | Policy | Owns | Never touches |
//! |--------|------|---------------|
//! | Eviction | replacement metadata, victim selection | values |
//! | Storage | the key→value map | eviction order |
//! | Access | whether a read counts as an access | values, victims |
//! | Capacity | the size limit, how many victims to drain | keys, values |
//!
//! The façade is the only component that talks to more than one policy; the
//! policies never talk to each other. Cross-structure consistency (a key is
//! tracked by the eviction policy iff storage holds it) is the façade's
//! responsibility and is enforced by the fixed ordering of its update steps.

use crate::error::ConfigError;

/// Replacement-order bookkeeping for one eviction algorithm.
///
/// The policy tracks keys only; values stay in storage. The façade notifies
/// the policy on every mutation, and asks it for a victim when the capacity
/// policy reports overflow.
///
/// # Contract
///
/// - After `on_insert(k)`, `k` is tracked exactly once.
/// - `select_victim` returns a tracked key without removing it, or `None`
///   when nothing is tracked (the empty-policy condition); the façade calls
///   [`remove_key`](Self::remove_key) after removing the victim from storage.
/// - `remove_key(&k)` on an untracked key is a no-op.
/// - `len` equals the number of tracked keys at all times.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruPolicy;
/// use evictkit::traits::EvictionPolicy;
///
/// let mut policy: LruPolicy<u64> = LruPolicy::new();
/// policy.on_insert(1);
/// policy.on_insert(2);
/// policy.on_access(&1);
///
/// // 2 is now the least recently used key
/// assert_eq!(policy.select_victim(), Some(2));
/// policy.remove_key(&2);
/// assert_eq!(policy.len(), 1);
/// ```
pub trait EvictionPolicy<K> {
    /// Records a read of `key`. Called by the façade only when the access
    /// policy voted to update eviction order.
    fn on_access(&mut self, key: &K);

    /// Starts tracking a newly inserted key.
    fn on_insert(&mut self, key: K);

    /// Records an overwrite of an existing key's value.
    fn on_update(&mut self, key: &K);

    /// Returns the key the algorithm would evict next, without removing it.
    ///
    /// Returns `None` when no key is tracked.
    fn select_victim(&mut self) -> Option<K>;

    /// Stops tracking `key`. No-op if the key is not tracked.
    fn remove_key(&mut self, key: &K);

    /// Returns the number of tracked keys.
    fn len(&self) -> usize;

    /// Returns `true` if no key is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all tracked keys and resets internal state.
    fn clear(&mut self);
}

/// Decides whether a cache hit counts as an "access" for eviction purposes.
///
/// Separating this from the eviction policy lets the same algorithm serve
/// different read semantics: FIFO and RANDOM pair with
/// [`NoUpdateOnAccess`](crate::access::NoUpdateOnAccess), while
/// [`ThresholdAccess`](crate::access::ThresholdAccess) keeps one-shot scans
/// from promoting keys in an LRU.
///
/// # Example
///
/// ```
/// use evictkit::access::ThresholdAccess;
/// use evictkit::traits::AccessPolicy;
///
/// let mut access: ThresholdAccess<u64> = ThresholdAccess::new(2);
/// assert!(!access.on_access(&7)); // first hit: below threshold
/// assert!(access.on_access(&7));  // second hit: promote
/// ```
pub trait AccessPolicy<K> {
    /// Called on every cache hit. Returns `true` if the hit should update
    /// the eviction order.
    fn on_access(&mut self, key: &K) -> bool;

    /// Called on every cache miss. Returns `true` if the miss should be
    /// recorded by interested observers.
    fn on_miss(&mut self, key: &K) -> bool;
}

/// Owns the size limit and decides when and how hard eviction must fire.
///
/// # Contract
///
/// - `needs_eviction(s)` is `true` iff inserting one more entry at size `s`
///   would violate the policy's invariant.
/// - `eviction_count(s)` is the minimum number of victims such that, after
///   removing them and inserting one entry, the invariant holds.
///
/// # Example
///
/// ```
/// use evictkit::capacity::FixedCapacity;
/// use evictkit::traits::CapacityPolicy;
///
/// let policy = FixedCapacity::new(4);
/// assert!(!policy.needs_eviction(3));
/// assert!(policy.needs_eviction(4));
/// assert_eq!(policy.eviction_count(4), 1);
/// assert_eq!(policy.eviction_count(6), 3);
/// ```
pub trait CapacityPolicy {
    /// Returns the nominal capacity in entries.
    fn capacity(&self) -> usize;

    /// Reconfigures the nominal capacity. The façade follows up with an
    /// eviction pass, so implementations only record the new limit.
    fn set_capacity(&mut self, new_capacity: usize);

    /// Returns `true` if an insert at `current_size` requires eviction first.
    fn needs_eviction(&self, current_size: usize) -> bool;

    /// Returns how many victims to drain before inserting at `current_size`.
    fn eviction_count(&self, current_size: usize) -> usize;
}

/// Validates that `value` lies in `[low, high]`, for capacity-policy
/// constructors.
pub(crate) fn check_range(
    name: &str,
    value: f64,
    low: f64,
    high: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= low && value <= high {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "{name} must be within [{low}, {high}], got {value}"
        )))
    }
}
