//! Routes for the game session: snapshot and player intents.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use betal_content::domain::themes::normalize_theme;
use betal_core::error::DomainError;
use betal_game::application::controller::GameEngine;
use betal_game::application::views::GameSnapshot;
use betal_game::domain::intents::IntentKind;
use betal_game::domain::notices::Notice;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /choose-theme.
#[derive(Debug, Deserialize)]
pub struct ChooseThemeRequest {
    /// Theme to tell a story about.
    pub theme: String,
}

/// Request body for POST /answer. Exactly one field is expected;
/// `option_index` wins if both are sent.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Whether the player answered correctly.
    pub correct: Option<bool>,
    /// Index of the chosen option on the active story.
    pub option_index: Option<usize>,
}

/// Response body for every intent.
#[derive(Debug, Serialize)]
pub struct IntentResponse {
    /// What happened.
    pub notice: Notice,
    /// Toast text for the notice; empty when nothing should be shown.
    pub message: String,
    /// The game after the intent.
    pub snapshot: GameSnapshot,
}

impl IntentResponse {
    fn new(notice: Notice, engine: &mut GameEngine) -> Self {
        Self {
            message: notice.message(),
            notice,
            snapshot: engine.snapshot(),
        }
    }
}

/// Runs `work` against the locked engine on the blocking pool: intents
/// write the game state through to storage, which may be a file.
async fn with_engine<T, F>(state: AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut GameEngine) -> T + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let mut engine = state.engine()?;
        Ok::<_, DomainError>(work(&mut *engine))
    })
    .await
    .map_err(|e| DomainError::Infrastructure(format!("game engine task failed: {e}")))?;
    Ok(result?)
}

async fn handle<F>(
    state: AppState,
    intent: IntentKind,
    apply: F,
) -> Result<Json<IntentResponse>, ApiError>
where
    F: FnOnce(&mut GameEngine) -> Notice + Send + 'static,
{
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, intent = intent.intent_type(), "handling game intent");

    let response = with_engine(state, move |engine| {
        let notice = apply(engine);
        IntentResponse::new(notice, engine)
    })
    .await?;
    Ok(Json(response))
}

/// GET /
async fn snapshot(State(state): State<AppState>) -> Result<Json<GameSnapshot>, ApiError> {
    Ok(Json(with_engine(state, GameEngine::snapshot).await?))
}

/// POST /wake
async fn wake(State(state): State<AppState>) -> Result<Json<IntentResponse>, ApiError> {
    handle(state, IntentKind::Wake, GameEngine::wake).await
}

/// POST /choose-theme
///
/// The engine lock is released while the catalog is queried; a newer choice
/// or a reset made in the meantime wins.
#[instrument(skip(state, request), fields(theme = %request.theme))]
async fn choose_theme(
    State(state): State<AppState>,
    Json(request): Json<ChooseThemeRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    let theme = normalize_theme(&request.theme);
    if theme.is_empty() {
        return Err(DomainError::Validation("theme must not be empty".to_owned()).into());
    }
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, intent = IntentKind::ChooseTheme.intent_type(), "handling game intent");

    let requested = theme.clone();
    let begun = with_engine(state.clone(), move |engine| {
        match engine.begin_theme_request(&requested) {
            Ok(ticket) => Ok(ticket),
            Err(notice) => Err(IntentResponse::new(notice, engine)),
        }
    })
    .await?;
    let ticket = match begun {
        Ok(ticket) => ticket,
        Err(response) => return Ok(Json(response)),
    };

    let result = state.catalog.stories_by_theme(&theme).await;

    let rng = Arc::clone(&state.rng);
    let response = with_engine(state, move |engine| {
        let mut rng = rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("rng lock poisoned".to_owned()))?;
        let notice = engine.complete_theme_request(ticket, result, &mut *rng);
        Ok::<_, DomainError>(IntentResponse::new(notice, engine))
    })
    .await??;
    Ok(Json(response))
}

/// POST /playback-ended
async fn playback_ended(State(state): State<AppState>) -> Result<Json<IntentResponse>, ApiError> {
    handle(state, IntentKind::PlaybackEnded, GameEngine::notify_playback_ended).await
}

/// POST /answer
async fn answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    match (request.option_index, request.correct) {
        (Some(index), _) => {
            handle(state, IntentKind::Answer, move |engine| engine.answer_option(index)).await
        }
        (None, Some(correct)) => {
            handle(state, IntentKind::Answer, move |engine| engine.answer(correct)).await
        }
        (None, None) => Err(DomainError::Validation(
            "answer requires `option_index` or `correct`".to_owned(),
        )
        .into()),
    }
}

/// POST /dont-know
async fn dont_know(State(state): State<AppState>) -> Result<Json<IntentResponse>, ApiError> {
    handle(state, IntentKind::DontKnow, GameEngine::answer_dont_know).await
}

/// POST /dismiss
async fn dismiss(State(state): State<AppState>) -> Result<Json<IntentResponse>, ApiError> {
    handle(state, IntentKind::Dismiss, GameEngine::dismiss).await
}

/// POST /reset
async fn reset(State(state): State<AppState>) -> Result<Json<IntentResponse>, ApiError> {
    handle(state, IntentKind::Reset, GameEngine::reset).await
}

/// Returns the router for the game session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(snapshot))
        .route("/wake", post(wake))
        .route("/choose-theme", post(choose_theme))
        .route("/playback-ended", post(playback_ended))
        .route("/answer", post(answer))
        .route("/dont-know", post(dont_know))
        .route("/dismiss", post(dismiss))
        .route("/reset", post(reset))
}
