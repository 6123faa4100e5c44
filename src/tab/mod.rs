//! Tab Module
//!
//! Request-scoped access to a [`SharedCache`](crate::cache::SharedCache).
//!
//! [`new_tab`] builds a tower layer that, for every request, wraps the shared
//! cache in a [`RequestTab`] and stores it in the request extensions as a
//! [`TabContext`]. Handlers take `TabContext<V>` as an extractor and talk to
//! the cache through the [`Tab`] trait.

mod context;
mod handle;
mod layer;

pub use context::TabContext;
pub use handle::{RequestTab, Tab};
pub use layer::{new_tab, TabLayer, TabService};
