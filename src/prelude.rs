pub use crate::access::{NoUpdateOnAccess, ThresholdAccess, TimeDecayAccess, UpdateOnAccess};
pub use crate::builder::{Algorithm, CacheBuilder};
pub use crate::cache::{
    FifoCache, LfuCache, LruCache, MfuCache, MruCache, PolicyCache, RandomCache,
};
pub use crate::capacity::{DynamicCapacity, FixedCapacity, MemoryCapacity, SoftCapacity};
pub use crate::ds::{ArenaList, FrequencyBuckets, NodeArena, NodeId};
pub use crate::error::{ConfigError, PolicyError};
pub use crate::policy::{FifoPolicy, LfuPolicy, LruPolicy, MfuPolicy, MruPolicy, RandomPolicy};
pub use crate::store::{
    CompactHashMapStore, DebugStore, HashMapStore, ReservedHashMapStore, StoreCore, StoreMut,
};
pub use crate::traits::{AccessPolicy, CapacityPolicy, EvictionPolicy};
