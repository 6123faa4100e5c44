//! Tab Cache - an in-process expiring key/value cache for axum services
//!
//! [`open_tab`] creates a shared cache with a background janitor;
//! [`new_tab`] turns it into a tower layer that hands every request a
//! [`TabContext`] to read and write the cache through.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tab;
pub mod tasks;

pub use cache::{open_tab, Item, SharedCache, Ttl};
pub use config::Config;
pub use tab::{new_tab, Tab, TabContext};
