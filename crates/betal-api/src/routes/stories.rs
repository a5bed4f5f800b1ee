//! Story lookup and subtitle sync.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use betal_content::domain::story::Story;
use betal_content::domain::subtitles::SubtitleCue;
use betal_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Query for GET /{id}/subtitle.
#[derive(Debug, Deserialize)]
pub struct SubtitleQuery {
    /// Playback position in seconds.
    pub t: f64,
}

/// The cue showing at a playback position.
#[derive(Debug, Serialize)]
pub struct SubtitleResponse {
    /// Story the cue belongs to.
    pub story_id: String,
    /// Position asked about, in seconds.
    pub t: f64,
    /// Text to display, or `None` between cues.
    pub text: Option<String>,
    /// The full cue.
    pub cue: Option<SubtitleCue>,
}

async fn find_story(state: &AppState, id: &str) -> Result<Story, ApiError> {
    state
        .catalog
        .story_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("story {id}")).into())
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Story>, ApiError> {
    Ok(Json(find_story(&state, &id).await?))
}

/// GET /{id}/subtitle?t=<seconds>
async fn get_subtitle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SubtitleQuery>,
) -> Result<Json<SubtitleResponse>, ApiError> {
    let story = find_story(&state, &id).await?;
    let cue = story.subtitle_at(query.t).cloned();
    Ok(Json(SubtitleResponse {
        story_id: story.id,
        t: query.t,
        text: cue.as_ref().map(|c| c.text.clone()),
        cue,
    }))
}

/// Returns the router for story lookups.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_story))
        .route("/{id}/subtitle", get(get_subtitle))
}
