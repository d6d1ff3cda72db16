//! Running tally of finished games

use std::fmt;

use serde::Serialize;
use tictactoe_core::{Outcome, Symbol};

/// Wins per symbol and draws. Only the orchestrator updates it, once per
/// finished game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Score {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Symbol::X) => self.x_wins += 1,
            Outcome::Winner(Symbol::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    /// Fraction of games ending in `count`, 0 when nothing was played
    pub fn rate(&self, count: usize) -> f32 {
        let total = self.games();
        if total == 0 {
            0.0
        } else {
            count as f32 / total as f32
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X wins: {}, O wins: {}, draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}
