use crate::types::PlayerState;

/// A contestant (or team) in a trivia game.
///
/// Only the engine mutates players, one answer at a time.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    completed_categories: Vec<String>,
    questions_answered: u32,
    num_correct_answers: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed_categories: Vec::new(),
            questions_answered: 0,
            num_correct_answers: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unseen categories count as incomplete
    pub fn has_completed_category(&self, category: &str) -> bool {
        self.completed_categories.iter().any(|c| c == category)
    }

    pub fn completed_categories(&self) -> &[String] {
        &self.completed_categories
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn num_correct_answers(&self) -> u32 {
        self.num_correct_answers
    }

    /// Record one answer in `category`. A correct answer completes the category.
    pub fn answer_question(&mut self, category: &str, correct: bool) {
        self.questions_answered += 1;

        if correct {
            self.num_correct_answers += 1;
            if !self.has_completed_category(category) {
                self.completed_categories.push(category.to_string());
            }
        }
    }

    pub fn player_state(&self) -> PlayerState {
        PlayerState {
            name: self.name.clone(),
            questions_answered: self.questions_answered,
            num_correct_answers: self.num_correct_answers,
            completed_categories: self.completed_categories.clone(),
        }
    }
}
