//! Cache Store Module
//!
//! Synchronous expiring map. Shared access and the janitor live in
//! [`SharedCache`](super::SharedCache).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;

use crate::cache::{CacheStats, Item, Ttl};

// == Cache Store ==
/// Key-value storage with per-item expiration.
///
/// Expired items stay in the map until swept. Lookups treat them as absent.
/// Lookup counters are atomic so `get` only needs shared access.
#[derive(Debug)]
pub struct CacheStore<V> {
    items: HashMap<String, Item<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    swept: u64,
    /// Expiration applied for `Ttl::Default`, None = never expire
    default_expiration: Option<Duration>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_expiration` - TTL used for `Ttl::Default`; None means such items never expire
    pub fn new(default_expiration: Option<Duration>) -> Self {
        Self {
            items: HashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            swept: 0,
            default_expiration: default_expiration.filter(|d| !d.is_zero()),
        }
    }

    pub fn default_expiration(&self) -> Option<Duration> {
        self.default_expiration
    }

    // == Set ==
    /// Stores a value, replacing any existing item under the key.
    pub fn set(&mut self, key: String, value: V, ttl: Ttl) {
        let ttl = match ttl {
            Ttl::Default => self.default_expiration,
            Ttl::Never => None,
            Ttl::After(duration) => Some(duration),
        };
        self.items.insert(key, Item::new(value, ttl));
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// Expired items are reported as misses but left for the next sweep.
    pub fn get(&self, key: &str) -> Option<V> {
        match self.items.get(key) {
            Some(item) if !item.is_expired() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(item.object.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    // == Delete ==
    /// Removes one item. Returns whether the key was stored, expired or not.
    pub fn delete(&mut self, key: &str) -> bool {
        self.items.remove(key).is_some()
    }

    // == Delete Expired ==
    /// Removes every expired item and returns how many were removed.
    pub fn delete_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.items.len();
        self.items.retain(|_, item| !item.is_expired_at(now));

        let removed = before - self.items.len();
        self.swept += removed as u64;
        removed
    }

    // == Items ==
    /// Copies every stored item, including expired ones not yet swept.
    pub fn items(&self) -> HashMap<String, Item<V>> {
        self.items.clone()
    }

    // == Flush ==
    /// Removes every item.
    pub fn flush(&mut self) {
        self.items.clear();
    }

    /// Number of stored items, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            swept: self.swept,
            total_entries: self.items.len(),
        }
    }
}
