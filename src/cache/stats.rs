//! Cache Statistics Module
//!
//! Snapshot of the lookup and sweep counters kept by a cache store.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and sweep counters for one cache store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live item
    pub hits: u64,
    /// Lookups that found nothing or an expired item
    pub misses: u64,
    /// Expired items removed by sweeps, manual or janitor
    pub swept: u64,
    /// Items currently stored, including expired ones not yet swept
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
