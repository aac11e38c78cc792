//! Bounded FIFO cache for document diff results.
//!
//! Keyed by a content fingerprint of the normalized input pair.
//! Eviction is strict insertion order: hits do not re-promote an
//! entry. Entries are owned exclusively by the cache; lookups clone
//! the result out, so eviction never invalidates a caller's copy.

use super::result::DiffResult;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// Cache performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total lookups.
    pub lookups: u64,
    /// Lookups that returned a cached result.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries evicted at capacity.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<u64, DiffResult>,
    order: VecDeque<u64>,
    stats: CacheStats,
}

/// Thread-safe bounded result cache with FIFO eviction.
#[derive(Debug)]
pub struct ResultCache {
    inner: RwLock<CacheInner>,
    capacity: usize,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries.
    /// Zero disables caching entirely.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            capacity,
        }
    }

    /// Look up a cached result by fingerprint, cloning it out.
    pub fn get(&self, key: u64) -> Option<DiffResult> {
        let mut inner = self.inner.write().expect("cache lock poisoned");
        inner.stats.lookups += 1;
        let result = inner.map.get(&key).cloned();
        if result.is_some() {
            inner.stats.hits += 1;
        } else {
            inner.stats.misses += 1;
        }
        result
    }

    /// Store a result, evicting the oldest entries above capacity.
    ///
    /// Re-inserting an existing key replaces the value without
    /// refreshing its position in the eviction order.
    pub fn insert(&self, key: u64, result: DiffResult) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.write().expect("cache lock poisoned");
        if inner.map.insert(key, result).is_some() {
            return;
        }
        inner.order.push_back(key);
        while inner.map.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
                inner.stats.evictions += 1;
            } else {
                break;
            }
        }
    }

    /// Check whether a key is currently cached, without touching the
    /// lookup counters.
    #[must_use]
    pub fn contains(&self, key: u64) -> bool {
        self.inner
            .read()
            .expect("cache lock poisoned")
            .map
            .contains_key(&key)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("cache lock poisoned").map.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries, keeping counters.
    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("cache lock poisoned");
        inner.map.clear();
        inner.order.clear();
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.inner
            .read()
            .expect("cache lock poisoned")
            .stats
            .clone()
    }

    /// Reset the cache counters.
    pub fn reset_stats(&self) {
        self.inner.write().expect("cache lock poisoned").stats = CacheStats::default();
    }
}
