use std::sync::Arc;
use tokio::sync::Mutex;

use super::{AppState, GameSession};
use crate::engine::TriviaGame;
use crate::error::{GameError, GameResult};
use crate::types::{AnswerResult, GameId, QuestionId, TriviaGameState, TriviaQuestion};

/// Reasons a new game can't be set up
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateGameError {
    #[error("{given} team names given for {num_teams} teams")]
    TooManyNames { given: usize, num_teams: usize },

    #[error("at most {max} teams per game, got {requested}")]
    TooManyTeams { requested: usize, max: usize },

    #[error("team name {0} is blank")]
    BlankTeamName(usize),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl AppState {
    /// Start a new game over the whole question bank and register it.
    ///
    /// With `num_teams`, any teams beyond `team_names` get a generated name.
    pub async fn create_game(
        &self,
        team_names: Vec<String>,
        num_teams: Option<usize>,
    ) -> Result<GameId, CreateGameError> {
        let team_names = self.resolve_team_names(team_names, num_teams)?;
        let game = TriviaGame::new(&team_names, self.questions.to_vec())?;

        let game_id = ulid::Ulid::new().to_string();
        self.games.write().await.insert(
            game_id.clone(),
            Arc::new(Mutex::new(GameSession::new(game))),
        );

        tracing::info!("Created game {} with teams {:?}", game_id, team_names);
        Ok(game_id)
    }

    fn resolve_team_names(
        &self,
        mut team_names: Vec<String>,
        num_teams: Option<usize>,
    ) -> Result<Vec<String>, CreateGameError> {
        let num_teams = num_teams.unwrap_or(team_names.len());
        if team_names.len() > num_teams {
            return Err(CreateGameError::TooManyNames {
                given: team_names.len(),
                num_teams,
            });
        }
        if num_teams > self.config.max_teams {
            return Err(CreateGameError::TooManyTeams {
                requested: num_teams,
                max: self.config.max_teams,
            });
        }

        for (index, name) in team_names.iter_mut().enumerate() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(CreateGameError::BlankTeamName(index));
            }
            *name = trimmed.to_string();
        }

        while team_names.len() < num_teams {
            let name = petname::petname(2, " ")
                .unwrap_or_else(|| format!("Team {}", team_names.len() + 1));
            team_names.push(name);
        }

        Ok(team_names)
    }

    /// Whether a game is registered. Counts as activity on that game.
    pub async fn game_exists(&self, game_id: &str) -> bool {
        self.open_session(game_id).await.is_some()
    }

    /// Current state of a game, or None if there is no such game
    pub async fn game_state(&self, game_id: &str) -> Option<TriviaGameState> {
        let session = self.open_session(game_id).await?;
        Some(session.game.state())
    }

    /// The question waiting to be answered in a game
    pub async fn current_question(&self, game_id: &str) -> Option<TriviaQuestion> {
        let session = self.open_session(game_id).await?;
        Some(session.game.current_question())
    }

    /// Submit an answer to a game. The outer None means there is no such game.
    pub async fn submit_answer(
        &self,
        game_id: &str,
        question_id: QuestionId,
        answer: &str,
    ) -> Option<GameResult<AnswerResult>> {
        let mut session = self.open_session(game_id).await?;
        let result = session.game.submit_answer(question_id, answer);
        match &result {
            Ok(answer_result) => tracing::info!(
                "Game {}: answer to question {} was {}",
                game_id,
                answer_result.question_id,
                if answer_result.correct { "correct" } else { "incorrect" }
            ),
            Err(e) => tracing::warn!("Game {}: rejected answer: {}", game_id, e),
        }
        Some(result)
    }

    /// End a game and forget about it. Returns true if the game existed.
    pub async fn end_game(&self, game_id: &str) -> bool {
        let removed = self.games.write().await.remove(game_id);
        match removed {
            Some(session) => {
                session.lock().await.close();
                tracing::info!("Ended game {}", game_id);
                true
            }
            None => false,
        }
    }
}
