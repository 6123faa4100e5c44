//! API Routes
//!
//! Configures the Axum router and binds the cache tab into every request.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_expired_handler, delete_handler, flush_handler, get_handler, health_handler,
    items_handler, set_handler, stats_handler,
};
use crate::cache::SharedCache;
use crate::tab::new_tab;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `GET /items` - List stored items with their expirations
/// - `POST /delete-expired` - Sweep expired items now
/// - `POST /flush` - Remove every item
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Tab: binds `cache` to each request as a `TabContext<Value>`
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(cache: SharedCache<Value>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/items", get(items_handler))
        .route("/delete-expired", post(delete_expired_handler))
        .route("/flush", post(flush_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(new_tab(cache))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
