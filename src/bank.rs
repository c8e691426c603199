//! Loading the question bank from disk.
//!
//! The bank is a JSON array of questions:
//!
//! ```json
//! [{ "category": "Geography", "question_text": "Capital of France?",
//!    "possible_answers": ["London", "Paris"], "answer": "Paris" }]
//! ```

use std::path::Path;

use crate::error::QuestionError;
use crate::types::Question;

/// Errors that can occur while loading a question bank
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank is empty")]
    Empty,

    #[error("question {index} in bank is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Read and validate a question bank file
pub fn load_question_bank(path: impl AsRef<Path>) -> Result<Vec<Question>, BankError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let questions = parse_question_bank(&contents)?;

    tracing::info!(
        "Loaded {} questions from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

/// Parse and validate a question bank from JSON text
pub fn parse_question_bank(json: &str) -> Result<Vec<Question>, BankError> {
    let questions: Vec<Question> = serde_json::from_str(json)?;

    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|source| BankError::InvalidQuestion { index, source })?;
    }

    Ok(questions)
}
