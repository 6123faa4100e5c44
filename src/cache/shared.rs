//! Shared Cache Module
//!
//! The process-wide cache handle every request tab forwards to, and the
//! opener that starts its janitor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore, CacheValue, Item, Ttl};
use crate::tasks::{spawn_janitor, Janitor};

// == Shared Cache ==
/// Cloneable handle to one expiring store.
///
/// All clones see the same items. The janitor, if any, is stopped when the
/// last clone is dropped.
pub struct SharedCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    janitor: Option<Arc<Janitor>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            janitor: self.janitor.clone(),
        }
    }
}

impl<V: CacheValue> SharedCache<V> {
    /// Wraps a store without a janitor. Expired items are only removed by
    /// `delete_expired`.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            janitor: None,
        }
    }

    /// Wraps a store and sweeps it every `interval` on the current tokio runtime.
    ///
    /// A zero interval disables the janitor. Outside a runtime the janitor
    /// cannot be spawned; the cache is still usable and a warning is logged.
    pub fn with_janitor(store: CacheStore<V>, interval: Duration) -> Self {
        let mut cache = Self::new(store);
        if interval.is_zero() {
            debug!("Zero cleanup interval, janitor disabled");
        } else if Handle::try_current().is_ok() {
            let janitor = spawn_janitor(Arc::downgrade(&cache.store), interval);
            cache.janitor = Some(Arc::new(janitor));
        } else {
            warn!("No tokio runtime available, janitor disabled");
        }
        cache
    }

    /// Whether a background sweep is attached to this cache.
    pub fn has_janitor(&self) -> bool {
        self.janitor.is_some()
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Ttl) {
        self.store.write().await.set(key.into(), value, ttl);
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    pub async fn delete_expired(&self) -> usize {
        self.store.write().await.delete_expired()
    }

    pub async fn items(&self) -> HashMap<String, Item<V>> {
        self.store.read().await.items()
    }

    pub async fn item_count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn flush(&self) {
        self.store.write().await.flush();
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

// == Opener ==
/// Creates a shared cache and starts its janitor.
///
/// # Arguments
/// * `default_expiration` - TTL applied by `Ttl::Default`; None (or zero) means never expire
/// * `cleanup_interval` - Janitor period; None (or zero) disables the janitor
///
/// # Example
/// ```ignore
/// let cache: SharedCache<String> =
///     open_tab(Some(Duration::from_secs(300)), Some(Duration::from_secs(1)));
/// let app = Router::new().route("/", get(handler)).layer(new_tab(cache));
/// ```
pub fn open_tab<V: CacheValue>(
    default_expiration: Option<Duration>,
    cleanup_interval: Option<Duration>,
) -> SharedCache<V> {
    let store = CacheStore::new(default_expiration);

    match cleanup_interval.filter(|interval| !interval.is_zero()) {
        Some(interval) => {
            info!(
                "Opening cache: default_expiration={:?}, cleanup_interval={:?}",
                store.default_expiration(),
                interval
            );
            SharedCache::with_janitor(store, interval)
        }
        None => {
            info!(
                "Opening cache without janitor: default_expiration={:?}",
                store.default_expiration()
            );
            SharedCache::new(store)
        }
    }
}
