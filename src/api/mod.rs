//! API Module
//!
//! HTTP handlers and routing for the demo cache server.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /items` - List stored items
//! - `POST /delete-expired` - Sweep expired items
//! - `POST /flush` - Remove every item
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
