//! Random eviction policy.
//!
//! Victims are drawn uniformly at random from a dense key vector, with a
//! map from key to its current vector index. Removal swaps the target slot
//! with the tail and pops, patching the moved key's index entry, so every
//! operation is O(1) worst case.
//!
//! ## Architecture
//!
//! ```text
//!   keys: Vec<K>                  index: FxHashMap<K, usize>
//!
//!   ┌─────┬─────┬─────┬─────┐     ┌──────────┬───────┐
//!   │  0  │  1  │  2  │  3  │     │   Key    │ index │
//!   ├─────┼─────┼─────┼─────┤     ├──────────┼───────┤
//!   │  A  │  B  │  C  │  D  │◄────│    A     │   0   │
//!   └─────┴─────┴─────┴─────┘     │    B     │   1   │ ...
//!
//!   remove_key(B):  swap(1, 3) → [A, D, C, B], index[D] = 1, pop → B gone
//! ```
//!
//! ## Determinism
//!
//! The policy owns its own [`SmallRng`] seeded from a `u64`. The default
//! seed is a fixed constant, so runs are reproducible out of the box;
//! [`RandomPolicy::with_seed`] and [`RandomPolicy::seed`] pin or reset the
//! stream explicitly for property tests. No process-wide RNG state is used.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::random::RandomPolicy;
//! use evictkit::traits::EvictionPolicy;
//!
//! let mut a: RandomPolicy<u32> = RandomPolicy::with_seed(7);
//! let mut b: RandomPolicy<u32> = RandomPolicy::with_seed(7);
//! for i in 0..10 {
//!     a.on_insert(i);
//!     b.on_insert(i);
//! }
//!
//! // Same seed, same insertions: identical victim streams.
//! assert_eq!(a.select_victim(), b.select_victim());
//! ```

use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::traits::EvictionPolicy;

/// Default RNG seed; fixed so that runs are reproducible unless reseeded.
const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Uniform random replacement metadata.
#[derive(Debug)]
pub struct RandomPolicy<K> {
    /// Dense key vector for O(1) uniform sampling and swap-and-pop removal.
    keys: Vec<K>,
    /// Key -> current position in `keys`.
    index: FxHashMap<K, usize>,
    rng: SmallRng,
}

impl<K> RandomPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty policy with the default seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates an empty policy with an explicit RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            keys: Vec::new(),
            index: FxHashMap::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Resets the RNG to a known seed, restarting the victim stream.
    pub fn seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.keys.len(), self.index.len());
        for (position, key) in self.keys.iter().enumerate() {
            assert_eq!(self.index.get(key), Some(&position));
        }
    }
}

impl<K> Default for RandomPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for RandomPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn on_access(&mut self, _key: &K) {
        // Reads do not change eviction probability.
    }

    fn on_insert(&mut self, key: K) {
        let position = self.keys.len();
        self.keys.push(key.clone());
        self.index.insert(key, position);
    }

    fn on_update(&mut self, _key: &K) {
        // Overwrites do not change eviction probability.
    }

    fn select_victim(&mut self) -> Option<K> {
        if self.keys.is_empty() {
            return None;
        }
        let position = self.rng.gen_range(0..self.keys.len());
        Some(self.keys[position].clone())
    }

    fn remove_key(&mut self, key: &K) {
        let Some(position) = self.index.remove(key) else {
            return;
        };
        let last = self.keys.len() - 1;
        if position != last {
            self.keys.swap(position, last);
            let moved = self.keys[position].clone();
            self.index.insert(moved, position);
        }
        self.keys.pop();
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.index.clear();
    }
}
