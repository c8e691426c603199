//! Caller-facing errors.
//!
//! Broken engine invariants are not represented here: those panic.

use crate::types::QuestionId;

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Why a question cannot be played
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("category is empty")]
    EmptyCategory,

    #[error("answer is empty")]
    EmptyAnswer,

    #[error("no possible answers")]
    NoPossibleAnswers,

    #[error("possible answer {0} is empty")]
    EmptyPossibleAnswer(usize),

    #[error("answer {0:?} is not one of the possible answers")]
    AnswerNotInChoices(String),
}

/// Errors that can occur when creating or playing a game
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("a game needs at least one question")]
    NoQuestions,

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question id {question_id} is out of range (pool has {pool_size} questions)")]
    InvalidQuestionId {
        question_id: QuestionId,
        pool_size: usize,
    },
}
