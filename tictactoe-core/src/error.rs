//! Error types for the game engine

use crate::board::Symbol;

/// A move the rules refuse. The game state is left untouched and the
/// caller is expected to ask for another move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already taken by {by}")]
    Occupied { row: usize, col: usize, by: Symbol },

    #[error("the game is already over")]
    GameOver,
}

/// Precondition failures of the bot strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no empty cells left to choose from")]
    NoMovesAvailable,
}

/// A deserialized board or game state that no sequence of legal moves
/// could have produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("board records {recorded} moves but holds {actual} marks")]
    MoveCountMismatch { recorded: usize, actual: usize },

    #[error("history move {index} was played out of turn")]
    OutOfTurn { index: usize },

    #[error("history move {index} is illegal: {source}")]
    IllegalMove { index: usize, source: MoveError },

    #[error("board, turn or status disagrees with the move history")]
    Inconsistent,
}

/// Unrecognized difficulty name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or 1-3)")]
pub struct ParseDifficultyError(pub String);

/// Errors surfaced while driving a game.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("move input closed before the game finished")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
