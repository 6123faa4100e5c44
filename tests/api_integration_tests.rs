//! Integration Tests for API Endpoints
//!
//! Drives the router through the tab layer, both in-process with `oneshot`
//! and against a live server with reqwest.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tab_cache::{api::create_router, open_tab, SharedCache, Ttl};
use tower::ServiceExt;

// == Helper Functions ==

fn test_cache() -> SharedCache<Value> {
    open_tab(Some(Duration::from_secs(300)), None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_router(test_cache());

    let (status, json) = send(&app, "PUT", "/set", Some(r#"{"key":"get_key","value":{"n":1}}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("get_key"));

    let (status, json) = send(&app, "GET", "/get/get_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], json!({"n": 1}));
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_router(test_cache());

    let (status, json) = send(&app, "GET", "/get/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_set_ttl_zero_never_expires() {
    let cache = test_cache();
    let app = create_router(cache.clone());

    send(&app, "PUT", "/set", Some(r#"{"key":"pinned","value":1,"ttl":0}"#)).await;
    send(&app, "PUT", "/set", Some(r#"{"key":"timed","value":2,"ttl":60}"#)).await;
    send(&app, "PUT", "/set", Some(r#"{"key":"default","value":3}"#)).await;

    let items = cache.items().await;
    assert!(items["pinned"].expiration.is_none());
    assert!(items["timed"].expiration.is_some());
    assert!(items["default"].expiration.is_some());
}

#[tokio::test]
async fn test_expired_item_not_served() {
    let cache = test_cache();
    let app = create_router(cache.clone());

    cache
        .set("ttl_test", json!("expires_soon"), Ttl::After(Duration::from_millis(10)))
        .await;

    let (status, _) = send(&app, "GET", "/get/ttl_test", None).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(20)).await;

    let (status, _) = send(&app, "GET", "/get/ttl_test", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == DELETE ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_router(test_cache());

    send(&app, "PUT", "/set", Some(r#"{"key":"delete_key","value":"v"}"#)).await;

    let (status, _) = send(&app, "DELETE", "/del/delete_key", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/get/delete_key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/del/delete_key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == ITEMS / DELETE-EXPIRED / FLUSH ==

#[tokio::test]
async fn test_items_include_expired_until_swept() {
    let cache = test_cache();
    let app = create_router(cache.clone());

    cache.set("stale", json!(1), Ttl::After(Duration::from_millis(5))).await;
    cache.set("fresh", json!(2), Ttl::Never).await;
    tokio::time::sleep(Duration::from_millis(15)).await;

    let (status, json) = send(&app, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert!(json["items"]["stale"]["expiration"].is_string());
    assert!(json["items"]["fresh"]["expiration"].is_null());

    let (status, json) = send(&app, "POST", "/delete-expired", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 1);

    let (_, json) = send(&app, "GET", "/items", None).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"]["fresh"]["object"], 2);
}

#[tokio::test]
async fn test_flush_endpoint() {
    let app = create_router(test_cache());

    send(&app, "PUT", "/set", Some(r#"{"key":"b","value":"x","ttl":0}"#)).await;

    let (status, _) = send(&app, "POST", "/flush", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/get/b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/items", None).await;
    assert_eq!(json["count"], 0);
}

// == STATS / HEALTH ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_router(test_cache());

    send(&app, "PUT", "/set", Some(r#"{"key":"stats_key","value":"v"}"#)).await;
    send(&app, "GET", "/get/stats_key", None).await; // hit
    send(&app, "GET", "/get/nonexistent", None).await; // miss

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["swept"], 0);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(test_cache());

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Responses ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_router(test_cache());

    let (status, _) = send(&app, "PUT", "/set", Some(r#"{"invalid json"#)).await;

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_router(test_cache());

    let (status, json) = send(&app, "PUT", "/set", Some(r#"{"key":"","value":"test"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == Live Server ==

#[tokio::test]
async fn test_live_server_shares_cache_across_requests() {
    let cache = open_tab(Some(Duration::from_secs(300)), Some(Duration::from_millis(50)));
    let app = create_router(cache.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let response = client
        .put(format!("{}/set", base))
        .json(&json!({"key": "live", "value": [1, 2, 3]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(format!("{}/get/live", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"], json!([1, 2, 3]));

    // visible to the handle that opened the cache too
    assert_eq!(cache.get("live").await, Some(json!([1, 2, 3])));

    // the janitor sweeps without a manual request
    cache.set("short", json!(0), Ttl::After(Duration::from_millis(10))).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!cache.items().await.contains_key("short"));

    server.abort();
}
