pub mod arena;
pub mod frequency_buckets;
pub mod list;

pub use arena::{NodeArena, NodeId};
pub use frequency_buckets::FrequencyBuckets;
pub use list::ArenaList;
