use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Opaque ID types for type safety
pub type GameId = String;
/// Index of a question in the game's question pool
pub type QuestionId = usize;

/// A single trivia item. Never mutated once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub category: String,
    pub question_text: String,
    pub possible_answers: Vec<String>,
    pub answer: String,
}

impl Question {
    pub fn new(
        category: impl Into<String>,
        question_text: impl Into<String>,
        possible_answers: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question_text: question_text.into(),
            possible_answers,
            answer: answer.into(),
        }
    }

    /// Check that the question can be played.
    ///
    /// Category and answer must be non-empty, there must be at least one
    /// possible answer, none of them empty, and the answer must be one of them.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.category.is_empty() {
            return Err(QuestionError::EmptyCategory);
        }
        if self.answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        if self.possible_answers.is_empty() {
            return Err(QuestionError::NoPossibleAnswers);
        }
        if let Some(position) = self.possible_answers.iter().position(|a| a.is_empty()) {
            return Err(QuestionError::EmptyPossibleAnswer(position));
        }
        if !self.possible_answers.contains(&self.answer) {
            return Err(QuestionError::AnswerNotInChoices(self.answer.clone()));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Position of the correct answer among the choices
    pub fn correct_answer_index(&self) -> Option<usize> {
        self.possible_answers.iter().position(|a| *a == self.answer)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    SuddenDeath,
    Finished,
}

/// Snapshot of a single player's progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub name: String,
    pub questions_answered: u32,
    pub num_correct_answers: u32,
    /// Categories in the order they were completed
    pub completed_categories: Vec<String>,
}

/// The question currently on the board, as handed to clients.
/// Deliberately carries no answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaQuestion {
    pub id: QuestionId,
    pub category: String,
    pub question_text: String,
    pub possible_answers: Vec<String>,
    pub assigned_player: PlayerState,
}

/// Read-only view of a whole game.
/// Every player's completed categories are a subset of `question_categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaGameState {
    pub num_players: usize,
    pub question_categories: Vec<String>,
    pub player_states: Vec<PlayerState>,
    pub game_status: GameStatus,
    pub current_player_index: usize,
    pub current_round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerState>,
}

/// Outcome of an answer submission, always reported against the question
/// that was actually current.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerResult {
    pub question_id: QuestionId,
    pub given_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub correct_answer_index: usize,
}
