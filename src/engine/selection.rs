//! Picking the next question for the player on turn.
//!
//! Picks a category first and a question second, so categories with many
//! questions don't crowd out small ones. Fresh questions from a category the
//! player still needs are preferred; when there are none, questions get reused.

use rand::Rng;

use super::TriviaGame;
use crate::types::{GameStatus, QuestionId};

impl TriviaGame {
    /// Choose the next question for the player on turn.
    ///
    /// Returns false when no selection was made: the game is finished, or a
    /// sudden death turn went to a player who still misses categories.
    pub(super) fn choose_next_question(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let categories_needed = self.categories_needed(self.current_player());

        match self.status {
            GameStatus::InProgress => assert!(
                !categories_needed.is_empty(),
                "player on turn should be missing a category while the game is in progress"
            ),
            GameStatus::SuddenDeath if !categories_needed.is_empty() => return false,
            _ => {}
        }

        let available_categories = self.available_categories();
        let target: Vec<String> = categories_needed
            .iter()
            .filter(|c| available_categories.contains(c))
            .cloned()
            .collect();

        let chosen = if !target.is_empty() {
            let category = pick(&mut self.rng, &target).clone();
            let candidates = self.unused_questions_in(&category);
            *pick(&mut self.rng, &candidates)
        } else {
            // Nothing fresh left in the needed categories, so reuse.
            // Sudden death players have nothing left to complete.
            let categories = if self.status == GameStatus::SuddenDeath {
                self.categories.clone()
            } else {
                categories_needed
            };
            let category = pick(&mut self.rng, &categories).clone();
            let candidates = self.questions_in(&category);
            *pick(&mut self.rng, &candidates)
        };

        if self.used_questions.len() == self.questions.len() {
            tracing::debug!("All {} questions used, refreshing pool", self.questions.len());
            self.used_questions.clear();
        }

        // The chosen question stays used across a refresh
        self.current_question = Some(chosen);
        self.used_questions.insert(chosen);

        true
    }

    /// Categories that still have at least one unused question
    fn available_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| !self.unused_questions_in(c).is_empty())
            .cloned()
            .collect()
    }

    fn questions_in(&self, category: &str) -> Vec<QuestionId> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.category == category)
            .map(|(id, _)| id)
            .collect()
    }

    fn unused_questions_in(&self, category: &str) -> Vec<QuestionId> {
        self.questions_in(category)
            .into_iter()
            .filter(|id| !self.used_questions.contains(id))
            .collect()
    }
}

/// Uniform pick. Callers only pass candidate lists that can't be empty.
fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    assert!(!items.is_empty(), "picking from an empty candidate list");
    &items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sample_questions;
    use crate::types::Question;
    use std::collections::HashSet;

    fn players(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{}", i)).collect()
    }

    fn question(category: &str, text: &str) -> Question {
        Question::new(category, text, vec!["yes".into(), "no".into()], "yes")
    }

    #[test]
    fn test_first_question_is_marked_used() {
        let game = TriviaGame::with_seed(&players(1), sample_questions(), 1).unwrap();
        let current = game.current_question.unwrap();
        assert!(game.used_questions.contains(&current));
        assert_eq!(game.used_questions.len(), 1);
    }

    #[test]
    fn test_only_needed_categories_are_picked() {
        for seed in 0..50 {
            let mut game = TriviaGame::with_seed(&players(1), sample_questions(), seed).unwrap();
            game.players[0].answer_question("Geography", true);

            assert!(game.choose_next_question());
            let id = game.current_question.unwrap();
            assert_eq!(game.questions[id].category, "History");
        }
    }

    #[test]
    fn test_prefers_fresh_questions() {
        let questions = vec![
            question("Science", "a"),
            question("Science", "b"),
            question("Science", "c"),
            question("Art", "d"),
        ];
        for seed in 0..50 {
            let mut game = TriviaGame::with_seed(&players(1), questions.clone(), seed).unwrap();
            game.used_questions = [0, 1].into_iter().collect();
            game.players[0].answer_question("Art", true);

            assert!(game.choose_next_question());
            assert_eq!(game.current_question, Some(2));
        }
    }

    #[test]
    fn test_reuses_questions_when_needed_categories_are_exhausted() {
        let questions = vec![
            question("Science", "a"),
            question("Science", "b"),
            question("Art", "c"),
        ];
        let mut game = TriviaGame::with_seed(&players(1), questions, 3).unwrap();
        game.used_questions = [0, 1].into_iter().collect();
        game.players[0].answer_question("Art", true);

        assert!(game.choose_next_question());
        let id = game.current_question.unwrap();
        assert!(id == 0 || id == 1);
        // Art is still fresh, Science isn't, so nothing was refreshed
        assert_eq!(game.used_questions.len(), 2);
    }

    #[test]
    fn test_pool_refreshes_once_everything_is_used() {
        let questions = vec![question("Science", "a"), question("Art", "b")];
        let mut game = TriviaGame::with_seed(&players(1), questions, 4).unwrap();
        let first = game.current_question.unwrap();
        assert_eq!(game.used_questions.len(), 1);

        // The other question is the last fresh one
        assert!(game.choose_next_question());
        let second = game.current_question.unwrap();
        assert_ne!(second, first);
        assert_eq!(game.used_questions.len(), 2);

        // Nothing fresh is left: the pool refreshes and keeps only the new pick
        assert!(game.choose_next_question());
        let third = game.current_question.unwrap();
        assert_eq!(game.used_questions.len(), 1);
        assert!(game.used_questions.contains(&third));
    }

    #[test]
    fn test_single_question_pool_keeps_serving_it() {
        let questions = vec![question("Science", "a")];
        let mut game = TriviaGame::with_seed(&players(1), questions, 9).unwrap();
        for _ in 0..3 {
            assert!(game.choose_next_question());
            assert_eq!(game.current_question, Some(0));
            assert_eq!(game.used_questions.len(), 1);
        }
    }

    #[test]
    fn test_every_question_gets_used_before_repeats() {
        let questions: Vec<Question> = (0..6)
            .map(|i| question(if i % 2 == 0 { "Even" } else { "Odd" }, &i.to_string()))
            .collect();
        let mut game = TriviaGame::with_seed(&players(1), questions, 5).unwrap();

        let mut seen = HashSet::new();
        seen.insert(game.current_question.unwrap());
        for _ in 0..5 {
            assert!(game.choose_next_question());
            seen.insert(game.current_question.unwrap());
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_sudden_death_draws_from_all_categories() {
        let mut game = TriviaGame::with_seed(&players(2), sample_questions(), 6).unwrap();
        for player in &mut game.players {
            player.answer_question("Geography", true);
            player.answer_question("History", true);
        }
        game.status = GameStatus::SuddenDeath;
        game.sudden_death_roster = vec![0, 1];

        let mut categories = HashSet::new();
        for _ in 0..50 {
            game.used_questions = (0..2).collect();
            assert!(game.choose_next_question());
            let id = game.current_question.unwrap();
            categories.insert(game.questions[id].category.clone());
        }
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn test_sudden_death_skips_incomplete_player() {
        let mut game = TriviaGame::with_seed(&players(2), sample_questions(), 7).unwrap();
        let before = game.current_question;
        game.status = GameStatus::SuddenDeath;

        assert!(!game.choose_next_question());
        assert_eq!(game.current_question, before);
    }

    #[test]
    fn test_finished_game_selects_nothing() {
        let mut game = TriviaGame::with_seed(&players(1), sample_questions(), 8).unwrap();
        let before = game.current_question;
        game.status = GameStatus::Finished;
        game.winner = Some(0);

        assert!(!game.choose_next_question());
        assert_eq!(game.current_question, before);
    }
}
