//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use betal_state_store::memory_storage::MemoryStorage;
use betal_test_support::{FailingCatalog, SequenceRng};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app.router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["stories"], 4);
    assert_eq!(json["engine_ready"], true);
}

#[tokio::test]
async fn test_health_returns_503_when_catalog_unreachable() {
    let app = common::build_test_app_with(
        Arc::new(MemoryStorage::new()),
        Arc::new(FailingCatalog),
        SequenceRng::new(vec![0]),
    );

    let (status, json) = common::get_json(app.router(), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "degraded");
    assert!(json["stories"].is_null());
    assert_eq!(json["engine_ready"], true);
}

#[tokio::test]
async fn test_health_returns_503_when_engine_lock_poisoned() {
    let app = common::build_test_app();
    let engine = Arc::clone(&app.state.engine);
    let _ = std::thread::spawn(move || {
        let _guard = engine.lock().unwrap();
        panic!("handler panicked while holding the engine");
    })
    .join();

    let (status, json) = common::get_json(app.router(), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["engine_ready"], false);
    assert_eq!(json["stories"], 4);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
