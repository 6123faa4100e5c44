//! Janitor Task
//!
//! Background task that periodically removes expired cache items.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, CacheValue};

/// Handle to a running janitor. Dropping it stops the task.
#[derive(Debug)]
pub struct Janitor {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl Janitor {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True once the task has exited or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Janitor stopped");
    }
}

/// Spawns a task that sweeps the store every `interval`.
///
/// The task only holds a weak reference, so it never keeps the store alive;
/// it exits on its own once the store is gone. Callers must pass a non-zero
/// interval; [`SharedCache::with_janitor`](crate::cache::SharedCache::with_janitor) filters zero.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<String>::new(None)));
/// let janitor = spawn_janitor(Arc::downgrade(&store), Duration::from_secs(1));
/// // Later:
/// drop(janitor);
/// ```
pub(crate) fn spawn_janitor<V: CacheValue>(
    store: Weak<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> Janitor {
    let handle = tokio::spawn(async move {
        info!("Starting janitor with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!("Cache dropped, janitor exiting");
                break;
            };

            let removed = store.write().await.delete_expired();

            if removed > 0 {
                info!("Janitor sweep: removed {} expired items", removed);
            } else {
                debug!("Janitor sweep: no expired items found");
            }
        }
    });

    Janitor { handle, interval }
}
