//! Move sources: humans fed by an outside collaborator, or bots

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Position, Symbol};
use crate::bot::{Bot, Difficulty};
use crate::error::{Error, MoveError, ParseDifficultyError, Result};
use crate::game::GameState;

/// Where human moves come from.
///
/// The engine does not parse text; implementors hand over coordinates and
/// learn about refusals through [`HumanInput::move_rejected`].
pub trait HumanInput {
    /// Next move for `state.current_symbol()`, or `None` once input is exhausted
    fn request_move(&mut self, state: &GameState) -> Option<Position>;

    /// The move was refused; the same player will be asked again
    fn move_rejected(&mut self, _state: &GameState, _pos: Position, _error: &MoveError) {}
}

/// Replays a fixed list of moves. With no moves it serves bot-only games.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    moves: VecDeque<Position>,
    rejections: usize,
}

impl ScriptedInput {
    pub fn new(moves: impl IntoIterator<Item = Position>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            rejections: 0,
        }
    }

    /// Number of scripted moves that were refused
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl HumanInput for ScriptedInput {
    fn request_move(&mut self, _state: &GameState) -> Option<Position> {
        self.moves.pop_front()
    }

    fn move_rejected(&mut self, _state: &GameState, _pos: Position, _error: &MoveError) {
        self.rejections += 1;
    }
}

/// Player description supplied at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Bot(Difficulty),
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("human"),
            PlayerKind::Bot(difficulty) => write!(f, "{} bot", difficulty),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("human") {
            Ok(PlayerKind::Human)
        } else {
            s.parse().map(PlayerKind::Bot)
        }
    }
}

/// One side of a game
#[derive(Clone, Debug)]
pub enum Player {
    Human,
    Bot(Bot),
}

impl Player {
    /// Build a player for `symbol`; `seed` makes bots reproducible
    pub fn from_kind(kind: PlayerKind, symbol: Symbol, seed: Option<u64>) -> Self {
        match kind {
            PlayerKind::Human => Player::Human,
            PlayerKind::Bot(difficulty) => Player::Bot(match seed {
                Some(seed) => Bot::with_seed(symbol, difficulty, seed),
                None => Bot::new(symbol, difficulty),
            }),
        }
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            Player::Human => PlayerKind::Human,
            Player::Bot(bot) => PlayerKind::Bot(bot.difficulty()),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Player::Human)
    }

    /// Seat this player on `symbol`'s side
    pub fn seat(&mut self, symbol: Symbol) {
        if let Player::Bot(bot) = self {
            bot.seat(symbol);
        }
    }

    /// Ask this player for a move in `state`.
    ///
    /// A bot always plays for the symbol on turn, whatever side it was
    /// built for.
    pub fn next_move<I>(&mut self, state: &GameState, input: &mut I) -> Result<Position>
    where
        I: HumanInput + ?Sized,
    {
        match self {
            Player::Human => input.request_move(state).ok_or(Error::InputClosed),
            Player::Bot(bot) => {
                bot.seat(state.current_symbol());
                Ok(bot.choose_move(state.board())?)
            }
        }
    }
}
