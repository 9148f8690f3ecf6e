#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a fresh database file. Keep the `TempDir` alive for the test's duration.
pub async fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("comics.db").display());

    let cfg = comic_shelf::Config {
        database_url,
        body_limit: 64 * 1024,
        ..Default::default()
    };
    let store = comic_shelf::Store::new(&cfg.database_url).expect("invalid database url");
    store.init_schema().await.expect("schema init failed");

    let app = comic_shelf::shelf_router(comic_shelf::ShelfState::new(store), &cfg);
    (dir, app)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let req = builder
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
        .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn create_collection(app: &Router, body: &str) -> Value {
    let (status, value) = send(app, "POST", "/collections", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {value}");
    value
}

pub async fn create_issue(app: &Router, collection_id: i64, body: &str) -> Value {
    let uri = format!("/collections/{collection_id}/issues");
    let (status, value) = send(app, "POST", &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {value}");
    value
}
