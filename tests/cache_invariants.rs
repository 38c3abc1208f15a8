// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// A seeded op-sequence generator drives every algorithm through the public
// facade and checks the library-wide invariants after each step:
//
//   1. len() never exceeds capacity()
//   2. storage and the eviction policy agree on the tracked key set
//   3. a just-inserted key is readable with its value
//   4. remove() reports presence truthfully and untracks the key
//   5. clear() leaves an empty, usable cache
//
// Frequency monotonicity (LFU/MFU) and random-seed reproducibility get
// their own tests below.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use evictkit::cache::{
    FifoCache, LfuCache, LruCache, MfuCache, MruCache, PolicyCache, RandomCache,
};
use evictkit::capacity::FixedCapacity;
use evictkit::store::hashmap::HashMapStore;
use evictkit::traits::{AccessPolicy, EvictionPolicy};

const KEY_DOMAIN: u32 = 20;
const CAPACITY: usize = 5;
const STEPS: usize = 2000;

/// Runs a seeded put/get/erase sequence, checking invariants after every
/// step.
fn drive<E, A>(
    mut cache: PolicyCache<u32, u64, E, HashMapStore<u32, u64>, A, FixedCapacity>,
    seed: u64,
) where
    E: EvictionPolicy<u32>,
    A: AccessPolicy<u32>,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut next_value = 0u64;

    for _ in 0..STEPS {
        let key = rng.gen_range(1..=KEY_DOMAIN);
        match rng.gen_range(0..3u8) {
            0 => {
                next_value += 1;
                let value = next_value;
                cache.insert(key, value).unwrap();
                assert!(cache.contains(&key), "inserted key must be present");
                assert_eq!(cache.get(&key), Some(&value));
            }
            1 => {
                let _ = cache.get(&key);
            }
            _ => {
                let was_present = cache.contains(&key);
                let removed = cache.remove(&key);
                assert_eq!(was_present, removed.is_some());
                assert!(!cache.contains(&key));
            }
        }

        assert!(cache.len() <= CAPACITY, "size bound violated");
        cache.debug_validate_invariants();
    }

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    cache.debug_validate_invariants();
}

// ==============================================
// Per-Algorithm Runs
// ==============================================

#[test]
fn lru_invariants_hold() {
    drive(LruCache::new(CAPACITY), 0x1001);
}

#[test]
fn mru_invariants_hold() {
    drive(MruCache::new(CAPACITY), 0x1002);
}

#[test]
fn fifo_invariants_hold() {
    drive(FifoCache::new(CAPACITY), 0x1003);
}

#[test]
fn lfu_invariants_hold() {
    drive(LfuCache::new(CAPACITY), 0x1004);
}

#[test]
fn mfu_invariants_hold() {
    drive(MfuCache::new(CAPACITY), 0x1005);
}

#[test]
fn random_invariants_hold() {
    drive(RandomCache::with_seed(CAPACITY, 77), 0x1006);
}

// ==============================================
// Overwrite Semantics
// ==============================================

#[test]
fn overwrite_replaces_value_without_growing() {
    let mut cache = LruCache::new(CAPACITY);
    cache.insert(1u32, 10u64).unwrap();
    let len_after_first = cache.len();

    cache.insert(1, 20).unwrap();
    assert_eq!(cache.get(&1), Some(&20));
    assert_eq!(cache.len(), len_after_first);
}

// ==============================================
// Frequency Monotonicity (LFU / MFU)
// ==============================================

#[test]
fn lfu_frequency_counters_never_decrease() {
    let mut cache: LfuCache<u32, u64> = LfuCache::new(CAPACITY);
    let mut rng = SmallRng::seed_from_u64(0x2001);
    let mut last_seen: HashMap<u32, u64> = HashMap::new();

    for _ in 0..STEPS {
        let key = rng.gen_range(1..=KEY_DOMAIN);
        match rng.gen_range(0..3u8) {
            0 => {
                cache.insert(key, 0).unwrap();
            }
            1 => {
                let _ = cache.get(&key);
            }
            _ => {
                cache.remove(&key);
            }
        }

        // Counters may only reset by leaving the cache entirely.
        for k in 1..=KEY_DOMAIN {
            match cache.eviction_policy().frequency(&k) {
                Some(freq) => {
                    if let Some(&previous) = last_seen.get(&k) {
                        assert!(
                            freq >= previous,
                            "frequency of {k} fell from {previous} to {freq}"
                        );
                    }
                    last_seen.insert(k, freq);
                }
                None => {
                    last_seen.remove(&k);
                }
            }
        }
    }
}

#[test]
fn mfu_frequency_counters_never_decrease() {
    let mut cache: MfuCache<u32, u64> = MfuCache::new(CAPACITY);
    let mut rng = SmallRng::seed_from_u64(0x2002);
    let mut last_seen: HashMap<u32, u64> = HashMap::new();

    for _ in 0..STEPS {
        let key = rng.gen_range(1..=KEY_DOMAIN);
        match rng.gen_range(0..3u8) {
            0 => {
                cache.insert(key, 0).unwrap();
            }
            1 => {
                let _ = cache.get(&key);
            }
            _ => {
                cache.remove(&key);
            }
        }

        for k in 1..=KEY_DOMAIN {
            match cache.eviction_policy().frequency(&k) {
                Some(freq) => {
                    if let Some(&previous) = last_seen.get(&k) {
                        assert!(freq >= previous);
                    }
                    last_seen.insert(k, freq);
                }
                None => {
                    last_seen.remove(&k);
                }
            }
        }
    }
}

// ==============================================
// Random Reproducibility
// ==============================================

fn random_trace(cache_seed: u64, op_seed: u64) -> Vec<Vec<u32>> {
    let mut cache = RandomCache::with_seed(CAPACITY, cache_seed);
    let mut rng = SmallRng::seed_from_u64(op_seed);
    let mut trace = Vec::new();

    for _ in 0..1000 {
        let key = rng.gen_range(1..=KEY_DOMAIN);
        match rng.gen_range(0..3u8) {
            0 => {
                cache.insert(key, u64::from(key)).unwrap();
            }
            1 => {
                let _ = cache.get(&key);
            }
            _ => {
                cache.remove(&key);
            }
        }
        trace.push((1..=KEY_DOMAIN).filter(|k| cache.contains(k)).collect());
    }
    trace
}

#[test]
fn random_with_fixed_seed_replays_exactly() {
    assert_eq!(random_trace(42, 0x3001), random_trace(42, 0x3001));
}

#[test]
fn random_eviction_depends_on_the_seed() {
    // Same op sequence, different cache seeds: the resident sets diverge.
    assert_ne!(random_trace(1, 0x3001), random_trace(2, 0x3001));
}
