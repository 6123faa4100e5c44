//! Cache Entry Module
//!
//! Defines stored items and the time-to-live argument accepted by `set`.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

// == Time To Live ==
/// Time-to-live requested for a single `set` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Use the cache's default expiration
    #[default]
    Default,
    /// The item never expires
    Never,
    /// The item expires after the given duration
    After(Duration),
}

impl From<Duration> for Ttl {
    /// A zero duration means "use the default", any other duration expires after it.
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Ttl::Default
        } else {
            Ttl::After(duration)
        }
    }
}

// == Item ==
/// A stored value with its absolute expiration time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item<V> {
    /// The stored value
    pub object: V,
    /// Expiration timestamp, None = no expiration
    pub expiration: Option<DateTime<Utc>>,
}

impl<V> Item<V> {
    // == Constructor ==
    /// Creates an item expiring `ttl` from now, or never when `ttl` is None.
    pub fn new(object: V, ttl: Option<Duration>) -> Self {
        Self {
            object,
            expiration: ttl.and_then(expiration_after),
        }
    }

    // == Is Expired ==
    /// Checks if the item has expired.
    ///
    /// An item is expired once the current time is strictly past its
    /// expiration. Items without an expiration never expire.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against a caller-supplied instant.
    ///
    /// Useful when filtering a snapshot from `items()` against a single `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiration {
            Some(expiration) => now > expiration,
            None => false,
        }
    }
}

/// Absolute expiration for a TTL starting now. Out-of-range TTLs never expire.
fn expiration_after(ttl: Duration) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::from_std(ttl).ok()?;
    Utc::now().checked_add_signed(delta)
}
