//! Access policies: whether a cache hit counts as an "access".
//!
//! The eviction policy only hears about a hit when the access policy votes
//! yes, so these small types control read-driven promotion without the
//! eviction algorithms knowing anything about it.
//!
//! ## Key Components
//!
//! - [`UpdateOnAccess`]: every hit promotes (default for LRU/MRU/LFU/MFU).
//! - [`NoUpdateOnAccess`]: hits never promote (default for FIFO/RANDOM).
//! - [`ThresholdAccess`]: promotes only after a key has been hit a
//!   configured number of times, so one-shot scans cannot pollute the
//!   eviction order.
//! - [`TimeDecayAccess`]: always promotes, while keeping a decaying
//!   last-access map on a logical clock as an ancillary signal.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::AccessPolicy;

// =============================================================================
// UpdateOnAccess / NoUpdateOnAccess
// =============================================================================

/// Access policy that always updates eviction order on a hit.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateOnAccess;

impl<K> AccessPolicy<K> for UpdateOnAccess {
    fn on_access(&mut self, _key: &K) -> bool {
        true
    }

    fn on_miss(&mut self, _key: &K) -> bool {
        true
    }
}

/// Access policy that never updates eviction order on a hit.
///
/// Pairs with algorithms whose order is fixed at insertion time (FIFO,
/// RANDOM), and is useful for observing any cache without perturbing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUpdateOnAccess;

impl<K> AccessPolicy<K> for NoUpdateOnAccess {
    fn on_access(&mut self, _key: &K) -> bool {
        false
    }

    fn on_miss(&mut self, _key: &K) -> bool {
        true
    }
}

// =============================================================================
// ThresholdAccess
// =============================================================================

/// Access policy that promotes a key only after repeated hits.
///
/// Keeps a per-key hit counter; `on_access` returns `true` once the counter
/// has reached the threshold. Counters are incremented on every hit and are
/// never reset while the policy lives, so a key that crosses the threshold
/// stays promoted.
///
/// # Example
///
/// ```
/// use evictkit::access::ThresholdAccess;
/// use evictkit::traits::AccessPolicy;
///
/// let mut access = ThresholdAccess::new(3);
/// assert!(!access.on_access(&"page"));
/// assert!(!access.on_access(&"page"));
/// assert!(access.on_access(&"page")); // third hit crosses the threshold
/// ```
#[derive(Debug)]
pub struct ThresholdAccess<K> {
    counts: FxHashMap<K, u64>,
    threshold: u64,
}

impl<K> ThresholdAccess<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a policy that promotes from the `threshold`-th hit onward.
    pub fn new(threshold: u64) -> Self {
        Self {
            counts: FxHashMap::default(),
            threshold,
        }
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Reconfigures the threshold; existing counters are kept.
    pub fn set_threshold(&mut self, threshold: u64) {
        self.threshold = threshold;
    }

    /// Returns how many hits `key` has accumulated.
    pub fn access_count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Drops all per-key counters.
    pub fn clear_counts(&mut self) {
        self.counts.clear();
    }
}

impl<K> AccessPolicy<K> for ThresholdAccess<K>
where
    K: Clone + Eq + Hash,
{
    fn on_access(&mut self, key: &K) -> bool {
        let count = self.counts.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count >= self.threshold
    }

    fn on_miss(&mut self, _key: &K) -> bool {
        true
    }
}

// =============================================================================
// TimeDecayAccess
// =============================================================================

/// Access policy on a logical clock with periodic decay.
///
/// Every `on_access` and `on_miss` advances the clock; hits record the key's
/// last-access time. Once per `decay_interval` ticks the map is swept and
/// entries older than `now − 2 × decay_interval` are dropped. Hits always
/// update eviction order; the timestamp map is an ancillary signal for
/// diagnostics or policies layered on top.
#[derive(Debug)]
pub struct TimeDecayAccess<K> {
    last_access: FxHashMap<K, u64>,
    clock: u64,
    decay_interval: u64,
}

impl<K> TimeDecayAccess<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a policy sweeping every `decay_interval` clock ticks.
    ///
    /// An interval of 0 is coerced to 1.
    pub fn new(decay_interval: u64) -> Self {
        Self {
            last_access: FxHashMap::default(),
            clock: 0,
            decay_interval: decay_interval.max(1),
        }
    }

    /// Returns the sweep interval in clock ticks.
    pub fn decay_interval(&self) -> u64 {
        self.decay_interval
    }

    /// Reconfigures the sweep interval (0 is coerced to 1).
    pub fn set_decay_interval(&mut self, interval: u64) {
        self.decay_interval = interval.max(1);
    }

    /// Returns the current logical time.
    pub fn current_time(&self) -> u64 {
        self.clock
    }

    /// Returns when `key` was last hit, or `None` if unseen or decayed.
    pub fn last_access_time(&self, key: &K) -> Option<u64> {
        self.last_access.get(key).copied()
    }

    fn sweep(&mut self) {
        let horizon = self.decay_interval.saturating_mul(2);
        let cutoff = self.clock.saturating_sub(horizon);
        self.last_access.retain(|_, &mut stamp| stamp >= cutoff);
    }
}

impl<K> AccessPolicy<K> for TimeDecayAccess<K>
where
    K: Clone + Eq + Hash,
{
    fn on_access(&mut self, key: &K) -> bool {
        self.clock += 1;
        self.last_access.insert(key.clone(), self.clock);
        if self.clock % self.decay_interval == 0 {
            self.sweep();
        }
        true
    }

    fn on_miss(&mut self, _key: &K) -> bool {
        self.clock += 1;
        true
    }
}
