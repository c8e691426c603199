//! The trivia game engine.
//!
//! Players take turns answering questions picked from the categories they
//! still need. The first player to complete every category at the end of a
//! round wins. If several players finish in the same round they go into
//! sudden death: one question each per round, and the round ends the game as
//! soon as exactly one of them answers correctly.
//!
//! The engine is synchronous and has no locking; callers serialize access
//! per game.

mod player;
mod round;
mod selection;

pub use player::Player;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

use crate::error::{GameError, GameResult};
use crate::types::{AnswerResult, GameStatus, Question, QuestionId, TriviaGameState, TriviaQuestion};

/// A single trivia game.
///
/// Players and questions are referred to by their index, so two identical
/// questions in the pool are still tracked separately.
#[derive(Debug, Clone)]
pub struct TriviaGame {
    players: Vec<Player>,
    questions: Vec<Question>,
    /// Distinct categories of the pool, in order of first appearance
    categories: Vec<String>,

    status: GameStatus,
    current_question: Option<QuestionId>,
    current_player_index: usize,
    current_round: u32,
    winner: Option<usize>,
    used_questions: BTreeSet<QuestionId>,
    correct_this_round: Vec<usize>,

    // Only populated during sudden death
    sudden_death_roster: Vec<usize>,

    rng: StdRng,
}

impl TriviaGame {
    /// Create a game and queue up the first question.
    ///
    /// Fails if there are no players, no questions, or any invalid question.
    pub fn new(player_names: &[String], questions: Vec<Question>) -> GameResult<Self> {
        Self::with_rng(player_names, questions, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as [`TriviaGame::new`], with deterministic question selection.
    pub fn with_seed(
        player_names: &[String],
        questions: Vec<Question>,
        seed: u64,
    ) -> GameResult<Self> {
        Self::with_rng(player_names, questions, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        player_names: &[String],
        questions: Vec<Question>,
        rng: StdRng,
    ) -> GameResult<Self> {
        if player_names.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if questions.is_empty() {
            return Err(GameError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|source| GameError::InvalidQuestion { index, source })?;
        }

        let mut categories: Vec<String> = Vec::new();
        for question in &questions {
            if !categories.contains(&question.category) {
                categories.push(question.category.clone());
            }
        }

        let mut game = Self {
            players: player_names.iter().map(Player::new).collect(),
            questions,
            categories,
            status: GameStatus::InProgress,
            current_question: None,
            current_player_index: 0,
            current_round: 0,
            winner: None,
            used_questions: BTreeSet::new(),
            correct_this_round: Vec::new(),
            sudden_death_roster: Vec::new(),
            rng,
        };

        game.choose_next_question();
        game.check_invariants();

        tracing::info!(
            "Created trivia game: {} players, {} questions, {} categories",
            game.players.len(),
            game.questions.len(),
            game.categories.len()
        );
        Ok(game)
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The question the player on turn has to answer, without its answer.
    pub fn current_question(&self) -> TriviaQuestion {
        self.check_invariants();

        let id = self.current_question_id();
        let question = &self.questions[id];
        TriviaQuestion {
            id,
            category: question.category.clone(),
            question_text: question.question_text.clone(),
            possible_answers: question.possible_answers.clone(),
            assigned_player: self.current_player().player_state(),
        }
    }

    /// Snapshot of the whole game
    pub fn state(&self) -> TriviaGameState {
        self.check_invariants();

        TriviaGameState {
            num_players: self.players.len(),
            question_categories: self.categories.clone(),
            player_states: self.players.iter().map(Player::player_state).collect(),
            game_status: self.status,
            current_player_index: self.current_player_index,
            current_round: self.current_round,
            winner: self.winner().map(Player::player_state),
        }
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    // =========================================================================
    // Answering
    // =========================================================================

    /// Record an answer for the player on turn.
    ///
    /// The game only changes if `question_id` is the current question and the
    /// game isn't finished. Otherwise this is a pure read, and the result is
    /// still reported against the current question.
    pub fn submit_answer(
        &mut self,
        question_id: QuestionId,
        answer: &str,
    ) -> GameResult<AnswerResult> {
        self.check_invariants();

        if question_id >= self.questions.len() {
            return Err(GameError::InvalidQuestionId {
                question_id,
                pool_size: self.questions.len(),
            });
        }

        let current_id = self.current_question_id();
        let current = &self.questions[current_id];
        let correct = answer == current.answer;

        let result = AnswerResult {
            question_id: current_id,
            given_answer: answer.to_string(),
            correct_answer: current.answer.clone(),
            correct,
            correct_answer_index: current.correct_answer_index().unwrap_or(0),
        };

        if question_id == current_id && !self.is_finished() {
            let category = current.category.clone();
            let player_index = self.current_player_index;
            self.players[player_index].answer_question(&category, correct);

            if correct {
                self.correct_this_round.push(player_index);
            }

            tracing::debug!(
                "{} answered question {} ({}): {}",
                self.players[player_index].name(),
                current_id,
                category,
                if correct { "correct" } else { "incorrect" }
            );

            self.take_game_step();
        } else {
            tracing::debug!(
                "Ignoring answer for question {} (current: {}, status: {:?})",
                question_id,
                current_id,
                self.status
            );
        }

        self.check_invariants();
        Ok(result)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn current_question_id(&self) -> QuestionId {
        match self.current_question {
            Some(id) => id,
            None => panic!("no current question"),
        }
    }

    fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Categories the player has not completed yet, in pool order
    fn categories_needed(&self, player: &Player) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| !player.has_completed_category(c))
            .cloned()
            .collect()
    }

    /// Panics if the game is in an impossible state.
    fn check_invariants(&self) {
        assert!(
            self.current_player_index < self.players.len(),
            "current_player_index ({}) outside of 0..{}",
            self.current_player_index,
            self.players.len()
        );

        for player in &self.players {
            for category in player.completed_categories() {
                assert!(
                    self.categories.contains(category),
                    "{} completed unknown category {:?}",
                    player.name(),
                    category
                );
            }
        }

        match self.status {
            GameStatus::InProgress => assert!(
                !self.categories_needed(self.current_player()).is_empty(),
                "player on turn has nothing left to answer while the game is in progress"
            ),
            GameStatus::SuddenDeath => assert!(
                self.sudden_death_roster
                    .contains(&self.current_player_index),
                "player on turn is not in the sudden death roster"
            ),
            GameStatus::Finished => {}
        }

        assert_eq!(
            self.winner.is_some(),
            self.is_finished(),
            "winner must be set exactly when the game is finished"
        );

        if !self.is_finished() {
            assert!(
                self.current_question.is_some(),
                "unfinished game without a current question"
            );
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            "Geography",
            "What is the capital of France?",
            vec![
                "London".into(),
                "Paris".into(),
                "Rome".into(),
                "Madrid".into(),
            ],
            "Paris",
        ),
        Question::new(
            "History",
            "Who was the first president of the United States?",
            vec![
                "Abraham Lincoln".into(),
                "George Washington".into(),
                "Thomas Jefferson".into(),
                "John Adams".into(),
            ],
            "George Washington",
        ),
        Question::new(
            "Geography",
            "What is the largest ocean in the world?",
            vec![
                "Atlantic Ocean".into(),
                "Pacific Ocean".into(),
                "Indian Ocean".into(),
                "Arctic Ocean".into(),
            ],
            "Pacific Ocean",
        ),
    ]
}
