//! Storage backends for the policy-composed cache.
//!
//! Stores own keys and values and answer point queries; they know nothing
//! about eviction order, and they are unbounded; the capacity policy owns
//! the size limit and the façade drains victims before a store ever grows
//! past it.
//!
//! ## Trait Hierarchy
//!
//! ```text
//!     ┌──────────────────┐
//!     │    StoreCore     │  get(&K) -> Option<&V>
//!     │   (read-only)    │  contains, len, is_empty
//!     └────────┬─────────┘
//!              │ extends
//!              ▼
//!     ┌──────────────────┐
//!     │    StoreMut      │  insert(K, V) -> Option<V>
//!     │   (read-write)   │  remove(&K) -> Option<V>
//!     └──────────────────┘  clear()
//! ```
//!
//! ## Ownership Model
//!
//! The store owns `K` and `V` after insertion; `get` returns `&V` with zero
//! overhead and `remove` returns the owned `V`. Destroying the store drops
//! every live entry.

/// Read-only store operations.
///
/// # Example
///
/// ```
/// use evictkit::store::hashmap::HashMapStore;
/// use evictkit::store::traits::{StoreCore, StoreMut};
///
/// let mut store: HashMapStore<u64, String> = HashMapStore::new();
/// store.insert(1, "hello".to_string());
/// assert_eq!(store.get(&1), Some(&"hello".to_string()));
/// assert!(store.contains(&1));
/// assert_eq!(store.len(), 1);
/// ```
pub trait StoreCore<K, V> {
    /// Returns a reference to the value for `key`, if present.
    ///
    /// Does not update access metadata; that is the access and eviction
    /// policies' concern.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutable store operations.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// `None` means the key was new.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes and returns the value for `key`, if present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Drops all entries.
    fn clear(&mut self);
}
