pub mod debug;
pub mod hashmap;
pub mod traits;

pub use debug::DebugStore;
pub use hashmap::{CompactHashMapStore, HashMapStore, ReservedHashMapStore};
pub use traits::{StoreCore, StoreMut};
