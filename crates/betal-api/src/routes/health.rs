//! Liveness plus a readiness check of the catalog and the game engine.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every component is usable, otherwise `degraded`.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Stories the catalog can serve; absent when it is unreachable.
    pub stories: Option<usize>,
    /// Whether the game engine can be locked.
    pub engine_ready: bool,
}

/// GET /health
///
/// Answers 503 when the catalog or the engine is unusable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let stories = match state.catalog.story_count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "health check: catalog unreachable");
            None
        }
    };
    let engine_ready = state.engine().is_ok();

    let healthy = stories.is_some() && engine_ready;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            stories,
            engine_ready,
        }),
    )
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
