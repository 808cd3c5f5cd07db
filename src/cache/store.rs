//! Cache store trait and in-memory implementation
//!
//! The store holds named, versioned generations of request/response pairs.
//! There is no LRU, size bound, or TTL at this layer: eviction is entirely
//! generation-based and happens wholesale at activation.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::entry::{CacheEntry, CacheKey};
use super::error::CacheError;
use super::stats::{CacheStats, CacheStatsTracker};

/// Storage trait for named, versioned cache generations
///
/// Writes are last-write-wins per identity; entries are idempotent snapshots
/// of the same resource, so concurrent racing puts are acceptable.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create the named generation if absent. Idempotent.
    async fn open(&self, generation: &str) -> Result<(), CacheError>;

    /// Exact match on normalized identity across all generations.
    /// Returns the most recently stored entry for that identity.
    async fn match_any(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    /// Exact match scoped to one generation
    async fn match_in(
        &self,
        generation: &str,
        key: &CacheKey,
    ) -> Result<Option<CacheEntry>, CacheError>;

    /// Store an entry, overwriting any existing entry for that identity in
    /// that generation. Creates the generation if absent (lazy creation of
    /// the dynamic generation relies on this).
    async fn put(
        &self,
        generation: &str,
        key: CacheKey,
        entry: CacheEntry,
    ) -> Result<(), CacheError>;

    /// Delete a single entry. Returns true if the entry existed.
    async fn delete(&self, generation: &str, key: &CacheKey) -> Result<bool, CacheError>;

    /// Remove a generation and all its entries permanently.
    /// Returns true if the generation existed.
    async fn delete_generation(&self, generation: &str) -> Result<bool, CacheError>;

    /// Names of all known generations
    async fn list_generations(&self) -> Result<Vec<String>, CacheError>;

    /// Snapshot of store statistics
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}

/// In-memory cache store
///
/// Process-wide but fully encapsulated behind `CacheStore`; constructed
/// explicitly and injected, never ambient state. Safe for concurrent
/// independent reads and overwrite-style writes.
pub struct MemoryCacheStore {
    generations: RwLock<HashMap<String, HashMap<CacheKey, CacheEntry>>>,
    stats: Arc<CacheStatsTracker>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            generations: RwLock::new(HashMap::new()),
            stats: Arc::new(CacheStatsTracker::new()),
        }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn open(&self, generation: &str) -> Result<(), CacheError> {
        let mut generations = self.generations.write();
        generations.entry(generation.to_string()).or_default();
        Ok(())
    }

    async fn match_any(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let generations = self.generations.read();
        let found = generations
            .values()
            .filter_map(|entries| entries.get(key))
            .max_by_key(|entry| entry.stored_at)
            .cloned();
        match found {
            Some(entry) => {
                self.stats.increment_hits();
                Ok(Some(entry))
            }
            None => {
                self.stats.increment_misses();
                Ok(None)
            }
        }
    }

    async fn match_in(
        &self,
        generation: &str,
        key: &CacheKey,
    ) -> Result<Option<CacheEntry>, CacheError> {
        let generations = self.generations.read();
        Ok(generations
            .get(generation)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(
        &self,
        generation: &str,
        key: CacheKey,
        entry: CacheEntry,
    ) -> Result<(), CacheError> {
        let mut generations = self.generations.write();
        generations
            .entry(generation.to_string())
            .or_default()
            .insert(key, entry);
        Ok(())
    }

    async fn delete(&self, generation: &str, key: &CacheKey) -> Result<bool, CacheError> {
        let mut generations = self.generations.write();
        Ok(generations
            .get_mut(generation)
            .map(|entries| entries.remove(key).is_some())
            .unwrap_or(false))
    }

    async fn delete_generation(&self, generation: &str) -> Result<bool, CacheError> {
        let mut generations = self.generations.write();
        Ok(generations.remove(generation).is_some())
    }

    async fn list_generations(&self) -> Result<Vec<String>, CacheError> {
        let generations = self.generations.read();
        Ok(generations.keys().cloned().collect())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let generations = self.generations.read();
        let generation_count = generations.len() as u64;
        let entry_count = generations.values().map(|e| e.len() as u64).sum();
        let size_bytes = generations
            .values()
            .flat_map(|e| e.values())
            .map(|entry| entry.size_bytes() as u64)
            .sum();
        Ok(self
            .stats
            .snapshot(entry_count, generation_count, size_bytes))
    }
}
