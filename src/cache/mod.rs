// Cache module

pub mod entry;
pub mod error;
pub mod stats;
pub mod store;

pub use entry::{CacheEntry, CacheKey, ResponseKind};
pub use error::CacheError;
pub use stats::CacheStats;
pub use store::{CacheStore, MemoryCacheStore};
