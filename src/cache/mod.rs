//! Cache Module
//!
//! Provides an in-memory key/value cache with per-item expiration and a
//! background janitor.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{Item, Ttl};
pub use shared::{open_tab, SharedCache};
pub use stats::CacheStats;
pub use store::CacheStore;

/// Values that can be stored in a [`SharedCache`] and shared across tasks.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> CacheValue for T {}
