//! Tales of Betal: local play service.
//!
//! Exposes the game engine, the theme list and the story catalog over JSON
//! so a presentation layer can drive a single player's session.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full router over `state`.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the presentation layer's origin.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .nest("/api/v1/themes", routes::themes::router())
        .nest("/api/v1/stories", routes::stories::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
