//! Tic-Tac-Toe Core - Game engine and bots
//!
//! This crate provides the core game logic:
//! - 3x3 board, move validation and win/draw detection
//! - One-move win search used by the simpler bots
//! - Minimax search with alpha-beta pruning for perfect play
//! - Players (human or bot) and the turn-driving game controller
//!
//! Console I/O, rendering and score keeping live outside this crate.

pub mod board;
pub mod error;
pub mod heuristics;
pub mod minimax;
pub mod bot;
pub mod player;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Cell, Position, Symbol, BOARD_SIZE, CELL_COUNT, CENTER, CORNERS, LINES};
pub use error::{Error, MoveError, ParseDifficultyError, Result, SearchError, StateError};
pub use heuristics::find_winning_move;
pub use minimax::{Minimax, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use bot::{Bot, Difficulty};
pub use player::{HumanInput, Player, PlayerKind, ScriptedInput};
pub use game::{Game, GameState, GameStatus, Outcome, Turn};
