//! API Handlers
//!
//! Every handler reaches the cache through the tab bound to its request.

use axum::{extract::Path, Json};
use serde_json::Value;

use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, FlushResponse, GetResponse, HealthResponse, ItemsResponse, SetRequest,
    SetResponse, StatsResponse, SweepResponse,
};
use crate::tab::TabContext;

/// Tab over a cache of JSON values, as used by the HTTP API.
pub type JsonTab = TabContext<Value>;

/// Handler for PUT /set
pub async fn set_handler(tab: JsonTab, Json(req): Json<SetRequest>) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    tab.set(req.key.clone(), req.value, ttl).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(tab: JsonTab, Path(key): Path<String>) -> Result<Json<GetResponse>> {
    match tab.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    tab: JsonTab,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if tab.delete(&key).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /items
///
/// Expired items not yet swept are included; each carries its expiration.
pub async fn items_handler(tab: JsonTab) -> Json<ItemsResponse> {
    Json(ItemsResponse::new(tab.items().await))
}

/// Handler for POST /delete-expired
pub async fn delete_expired_handler(tab: JsonTab) -> Json<SweepResponse> {
    Json(SweepResponse::new(tab.delete_expired().await))
}

/// Handler for POST /flush
pub async fn flush_handler(tab: JsonTab) -> Json<FlushResponse> {
    tab.flush().await;
    Json(FlushResponse::flushed())
}

/// Handler for GET /stats
pub async fn stats_handler(tab: JsonTab) -> Json<StatsResponse> {
    Json(tab.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
