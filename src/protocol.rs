//! Request and response bodies of the HTTP API.
//!
//! Engine snapshots (`TriviaGameState`, `TriviaQuestion`, `AnswerResult`) are
//! sent as-is; this module only adds the envelopes around them.

use serde::{Deserialize, Serialize};

use crate::types::{GameId, QuestionId};

/// POST /api/games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub team_names: Vec<String>,
    /// Total number of teams. Teams without a name get a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_teams: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateGameResponse {
    pub game_id: GameId,
}

/// POST /api/games/{game_id}/answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAttempt {
    pub question_id: QuestionId,
    pub answer: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
