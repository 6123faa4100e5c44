//! Tab capability and its request-scoped implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{Method, Uri};
use tracing::debug;

use crate::cache::{CacheStats, CacheValue, Item, SharedCache, Ttl};

// == Tab ==
/// Cache operations available to a request handler.
#[async_trait]
pub trait Tab<V>: Send + Sync {
    /// Stores a value, replacing any existing item under the key.
    async fn set(&self, key: String, value: V, ttl: Ttl);

    /// Returns the value if present and unexpired.
    async fn get(&self, key: &str) -> Option<V>;

    /// Removes one item. Returns whether it was stored.
    async fn delete(&self, key: &str) -> bool;

    /// Sweeps expired items now instead of waiting for the janitor.
    async fn delete_expired(&self) -> usize;

    /// Snapshot of every stored item, including expired ones not yet swept.
    /// Check [`Item::is_expired`] before trusting a value.
    async fn items(&self) -> HashMap<String, Item<V>>;

    async fn item_count(&self) -> usize;

    /// Removes every item.
    async fn flush(&self);

    async fn stats(&self) -> CacheStats;
}

// == Request Tab ==
/// A shared cache bound to one incoming request.
pub struct RequestTab<V> {
    cache: SharedCache<V>,
    method: Method,
    uri: Uri,
}

impl<V: CacheValue> RequestTab<V> {
    pub fn new(cache: SharedCache<V>, method: Method, uri: Uri) -> Self {
        Self { cache, method, uri }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

#[async_trait]
impl<V: CacheValue> Tab<V> for RequestTab<V> {
    async fn set(&self, key: String, value: V, ttl: Ttl) {
        debug!("{} {}: set {} ({:?})", self.method, self.uri, key, ttl);
        self.cache.set(key, value, ttl).await;
    }

    async fn get(&self, key: &str) -> Option<V> {
        let value = self.cache.get(key).await;
        debug!(
            "{} {}: get {} ({})",
            self.method,
            self.uri,
            key,
            if value.is_some() { "hit" } else { "miss" }
        );
        value
    }

    async fn delete(&self, key: &str) -> bool {
        debug!("{} {}: delete {}", self.method, self.uri, key);
        self.cache.delete(key).await
    }

    async fn delete_expired(&self) -> usize {
        let removed = self.cache.delete_expired().await;
        debug!("{} {}: swept {} expired items", self.method, self.uri, removed);
        removed
    }

    async fn items(&self) -> HashMap<String, Item<V>> {
        self.cache.items().await
    }

    async fn item_count(&self) -> usize {
        self.cache.item_count().await
    }

    async fn flush(&self) {
        debug!("{} {}: flush", self.method, self.uri);
        self.cache.flush().await;
    }

    async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
