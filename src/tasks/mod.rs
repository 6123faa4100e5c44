//! Background Tasks Module
//!
//! # Tasks
//! - Janitor: sweeps expired cache items at a fixed interval

mod janitor;

pub(crate) use janitor::spawn_janitor;
pub use janitor::Janitor;
