//! Turn order and round transitions.

use super::{Player, TriviaGame};
use crate::types::GameStatus;

impl TriviaGame {
    /// Move on after an accepted answer: next player, then next question.
    pub(super) fn take_game_step(&mut self) {
        if self.is_finished() {
            return;
        }

        self.go_to_next_player();
        self.choose_next_question();
    }

    /// Advance to the next player on turn, running round evaluation when the
    /// turn order wraps around.
    fn go_to_next_player(&mut self) {
        match self.status {
            GameStatus::InProgress => {
                self.current_player_index += 1;
                if self.current_player_index == self.players.len() {
                    self.current_player_index = 0;
                    self.setup_next_round();

                    // The tiebreak starts with the first player on the roster
                    if self.status == GameStatus::SuddenDeath {
                        self.current_player_index = self.sudden_death_roster[0];
                    }
                }
            }
            GameStatus::SuddenDeath => {
                let roster_index = match self
                    .sudden_death_roster
                    .iter()
                    .position(|&p| p == self.current_player_index)
                {
                    Some(index) => index,
                    None => panic!("player on turn is not in the sudden death roster"),
                };

                let mut next = roster_index + 1;
                if next == self.sudden_death_roster.len() {
                    next = 0;
                    // May narrow the roster or end the game, but never empties it
                    self.setup_next_round();
                }

                self.current_player_index = self.sudden_death_roster[next];
            }
            GameStatus::Finished => {}
        }
    }

    fn is_player_finished(&self, player: &Player) -> bool {
        self.categories
            .iter()
            .all(|category| player.has_completed_category(category))
    }

    /// Evaluate the round that just ended and transition the game.
    fn setup_next_round(&mut self) {
        if self.is_finished() {
            return;
        }

        match self.status {
            GameStatus::InProgress => {
                let finished: Vec<usize> = self
                    .players
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| self.is_player_finished(p))
                    .map(|(index, _)| index)
                    .collect();

                match finished.len() {
                    0 => {}
                    1 => self.finish(finished[0]),
                    count => {
                        tracing::info!(
                            "Round {}: {} players finished, entering sudden death",
                            self.current_round,
                            count
                        );
                        self.sudden_death_roster = finished;
                        self.status = GameStatus::SuddenDeath;
                    }
                }
            }
            GameStatus::SuddenDeath => match self.correct_this_round.len() {
                0 => {}
                1 => {
                    let winner = self.correct_this_round[0];
                    self.finish(winner);
                }
                count => {
                    tracing::info!(
                        "Sudden death round {}: {} players still tied",
                        self.current_round,
                        count
                    );
                    self.sudden_death_roster = self.correct_this_round.clone();
                }
            },
            GameStatus::Finished => {}
        }

        self.current_round += 1;
        self.correct_this_round.clear();
    }

    fn finish(&mut self, winner: usize) {
        self.winner = Some(winner);
        self.status = GameStatus::Finished;
        tracing::info!(
            "Game finished after round {}: {} wins",
            self.current_round,
            self.players[winner].name()
        );
    }
}
