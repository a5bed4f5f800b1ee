//! Theme picker listing.

use axum::{Json, Router, routing::get};
use betal_content::domain::themes::{BUILTIN_THEMES, Theme};

use crate::state::AppState;

/// GET /
async fn list_themes() -> Json<Vec<Theme>> {
    Json(BUILTIN_THEMES.to_vec())
}

/// Returns the router for the theme list.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_themes))
}
