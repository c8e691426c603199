//! HTTP API endpoints.
//!
//! Thin mapping from routes to [`AppState`] operations. Unknown game ids are
//! 404s; malformed bodies and anything the game rejects are 400s.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::GameError;
use crate::protocol::{AnswerAttempt, CreateGameRequest, CreateGameResponse, ErrorResponse};
use crate::state::{AppState, CreateGameError};
use crate::types::{AnswerResult, GameId, TriviaGameState, TriviaQuestion};

/// Errors returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error(transparent)]
    CreateGame(#[from] CreateGameError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::CreateGame(_) | ApiError::Game(_) | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// All API routes, without middleware
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", post(create_game))
        .route("/api/games/{game_id}", get(game_exists).delete(end_game))
        .route("/api/games/{game_id}/state", get(game_state))
        .route("/api/games/{game_id}/question", get(current_question))
        .route("/api/games/{game_id}/answer", post(submit_answer))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Start a new game.
///
/// POST /api/games
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateGameRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateGameResponse>)> {
    let Json(request) = request?;
    let game_id = state
        .create_game(request.team_names, request.num_teams)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateGameResponse { game_id })))
}

/// Whether a game with this id is registered.
///
/// GET /api/games/{game_id}
pub async fn game_exists(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Json<bool> {
    Json(state.game_exists(&game_id).await)
}

/// End a game. Returns false if there was nothing to end.
///
/// DELETE /api/games/{game_id}
pub async fn end_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Json<bool> {
    Json(state.end_game(&game_id).await)
}

/// GET /api/games/{game_id}/state
pub async fn game_state(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> ApiResult<Json<TriviaGameState>> {
    state
        .game_state(&game_id)
        .await
        .map(Json)
        .ok_or(ApiError::GameNotFound(game_id))
}

/// The question the team on turn has to answer. Never includes the answer.
///
/// GET /api/games/{game_id}/question
pub async fn current_question(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> ApiResult<Json<TriviaQuestion>> {
    state
        .current_question(&game_id)
        .await
        .map(Json)
        .ok_or(ApiError::GameNotFound(game_id))
}

/// Answer the current question.
///
/// POST /api/games/{game_id}/answer
///
/// Answers for any question other than the current one leave the game
/// untouched, so retried requests only count once.
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
    attempt: Result<Json<AnswerAttempt>, JsonRejection>,
) -> ApiResult<Json<AnswerResult>> {
    let Json(attempt) = attempt?;
    let result = state
        .submit_answer(&game_id, attempt.question_id, &attempt.answer)
        .await
        .ok_or_else(|| ApiError::GameNotFound(game_id.clone()))??;
    Ok(Json(result))
}
