//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use betal_content::application::catalog::{InMemoryCatalog, StoryCatalog};
use betal_core::rng::DeterministicRng;
use betal_core::storage::KeyValueStorage;
use betal_game::application::controller::GameEngine;
use betal_game::application::store::GameStateStore;
use betal_game::domain::rules::GameRules;
use betal_state_store::memory_storage::MemoryStorage;
use betal_test_support::{ManualClock, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

use betal_api::state::AppState;

/// A running app with a clock the test can move.
pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// A fresh router over the shared state.
    pub fn router(&self) -> Router {
        betal_api::app(self.state.clone())
    }
}

/// Build the full app over the bundled catalog, in-memory storage, a manual
/// clock and an RNG that always picks the first story.
pub fn build_test_app() -> TestApp {
    build_test_app_with(
        Arc::new(MemoryStorage::new()),
        Arc::new(InMemoryCatalog::builtin().unwrap()),
        SequenceRng::new(vec![0; 64]),
    )
}

/// Build the full app with custom storage, catalog and RNG.
pub fn build_test_app_with(
    storage: Arc<dyn KeyValueStorage>,
    catalog: Arc<dyn StoryCatalog>,
    rng: SequenceRng,
) -> TestApp {
    let clock = Arc::new(ManualClock::default());
    let store = GameStateStore::open(storage, clock.clone());
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(rng));
    let state = AppState::new(GameEngine::new(store, GameRules::default()), catalog, rng);
    TestApp { state, clock }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request without a body.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    post_json(app, uri, &serde_json::Value::Null).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
