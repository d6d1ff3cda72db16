//! Computer players for the three difficulty levels

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Position, Symbol, CENTER, CORNERS};
use crate::error::{ParseDifficultyError, SearchError};
use crate::heuristics::find_winning_move;
use crate::minimax::Minimax;

/// Bot strength
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty cell
    Easy,
    /// Win, block, center, corner, anything
    Medium,
    /// Full minimax search
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

// ============================================================================
// BOT
// ============================================================================

/// Computer player bound to one symbol and one difficulty
#[derive(Clone, Debug)]
pub struct Bot {
    symbol: Symbol,
    difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl Bot {
    pub fn new(symbol: Symbol, difficulty: Difficulty) -> Self {
        Self {
            symbol,
            difficulty,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(symbol: Symbol, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            symbol,
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Rebind the bot to `symbol`, keeping its difficulty and RNG stream
    pub fn seat(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    /// Pick a move on `board` for this bot's symbol.
    ///
    /// Works on a scratch copy; `board` itself is never touched.
    pub fn choose_move(&mut self, board: &Board) -> Result<Position, SearchError> {
        let mut scratch = *board;
        match self.difficulty {
            Difficulty::Easy => self.easy_move(&scratch),
            Difficulty::Medium => self.medium_move(&mut scratch),
            Difficulty::Hard => Minimax::new(self.symbol).best_move(&mut scratch),
        }
    }

    fn easy_move(&mut self, board: &Board) -> Result<Position, SearchError> {
        let moves = board.valid_moves();
        if moves.is_empty() {
            return Err(SearchError::NoMovesAvailable);
        }
        let pos = self.pick_random(&moves);
        tracing::debug!("Easy bot {} picked {} at random", self.symbol, pos);
        Ok(pos)
    }

    fn medium_move(&mut self, board: &mut Board) -> Result<Position, SearchError> {
        let moves = board.valid_moves();
        if moves.is_empty() {
            return Err(SearchError::NoMovesAvailable);
        }

        if let Some(pos) = find_winning_move(board, &moves, self.symbol) {
            tracing::debug!("Medium bot {} wins at {}", self.symbol, pos);
            return Ok(pos);
        }

        if let Some(pos) = find_winning_move(board, &moves, self.symbol.opponent()) {
            tracing::debug!("Medium bot {} blocks at {}", self.symbol, pos);
            return Ok(pos);
        }

        if board.cell(CENTER) == Some(Cell::Empty) {
            tracing::debug!("Medium bot {} takes the center", self.symbol);
            return Ok(CENTER);
        }

        let corners: Vec<Position> = moves
            .iter()
            .filter(|pos| CORNERS.contains(*pos))
            .copied()
            .collect();
        if !corners.is_empty() {
            let pos = self.pick_random(&corners);
            tracing::debug!("Medium bot {} takes corner {}", self.symbol, pos);
            return Ok(pos);
        }

        let pos = self.pick_random(&moves);
        tracing::debug!("Medium bot {} falls back to {}", self.symbol, pos);
        Ok(pos)
    }

    /// Uniform pick by index into `moves`, which must be non-empty
    fn pick_random(&mut self, moves: &[Position]) -> Position {
        moves[self.rng.gen_range(0..moves.len())]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(moves: &[(usize, usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(row, col, symbol) in moves {
            board.apply_move(Position::new(row, col), symbol).unwrap();
        }
        board
    }

    fn full_board() -> Board {
        Board::from_cells([
            [Cell::X, Cell::O, Cell::X],
            [Cell::X, Cell::O, Cell::O],
            [Cell::O, Cell::X, Cell::X],
        ])
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("2".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("4".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_easy_move_is_empty_cell() {
        let board = board_with(&[(0, 0, Symbol::X), (1, 1, Symbol::O)]);
        for seed in 0..20 {
            let mut bot = Bot::with_seed(Symbol::X, Difficulty::Easy, seed);
            let pos = bot.choose_move(&board).unwrap();
            assert!(board.valid_moves().contains(&pos));
        }
    }

    #[test]
    fn test_seeded_bots_agree() {
        let board = Board::new();
        let mut a = Bot::with_seed(Symbol::X, Difficulty::Easy, 7);
        let mut b = Bot::with_seed(Symbol::X, Difficulty::Easy, 7);
        for _ in 0..5 {
            assert_eq!(a.choose_move(&board), b.choose_move(&board));
        }
    }

    #[test]
    fn test_medium_takes_own_win() {
        // X X .
        // O O .
        // . . .
        let board = board_with(&[
            (0, 0, Symbol::X),
            (1, 0, Symbol::O),
            (0, 1, Symbol::X),
            (1, 1, Symbol::O),
        ]);
        let mut bot = Bot::with_seed(Symbol::X, Difficulty::Medium, 1);
        assert_eq!(bot.choose_move(&board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_medium_prefers_win_over_block() {
        // O to move can win at (1, 2) or must otherwise block (0, 2).
        let board = board_with(&[
            (0, 0, Symbol::X),
            (1, 0, Symbol::O),
            (0, 1, Symbol::X),
            (1, 1, Symbol::O),
        ]);
        let mut bot = Bot::with_seed(Symbol::O, Difficulty::Medium, 1);
        assert_eq!(bot.choose_move(&board), Ok(Position::new(1, 2)));
    }

    #[test]
    fn test_medium_blocks() {
        let board = board_with(&[(0, 0, Symbol::X), (2, 2, Symbol::O), (0, 1, Symbol::X)]);
        let mut bot = Bot::with_seed(Symbol::O, Difficulty::Medium, 1);
        assert_eq!(bot.choose_move(&board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_medium_takes_center() {
        let board = board_with(&[(0, 0, Symbol::X)]);
        let mut bot = Bot::with_seed(Symbol::O, Difficulty::Medium, 1);
        assert_eq!(bot.choose_move(&board), Ok(CENTER));
    }

    #[test]
    fn test_medium_takes_corner() {
        let board = board_with(&[(1, 1, Symbol::X)]);
        for seed in 0..20 {
            let mut bot = Bot::with_seed(Symbol::O, Difficulty::Medium, seed);
            let pos = bot.choose_move(&board).unwrap();
            assert!(CORNERS.contains(&pos), "seed {} picked {}", seed, pos);
        }
    }

    #[test]
    fn test_medium_falls_back_to_edges() {
        // X O X
        // . X .
        // O X O
        let board = Board::from_cells([
            [Cell::X, Cell::O, Cell::X],
            [Cell::Empty, Cell::X, Cell::Empty],
            [Cell::O, Cell::X, Cell::O],
        ]);
        for seed in 0..20 {
            let mut bot = Bot::with_seed(Symbol::O, Difficulty::Medium, seed);
            let pos = bot.choose_move(&board).unwrap();
            assert!(pos == Position::new(1, 0) || pos == Position::new(1, 2));
        }
    }

    #[test]
    fn test_hard_blocks() {
        let board = board_with(&[(0, 0, Symbol::X), (1, 1, Symbol::O), (0, 1, Symbol::X)]);
        let mut bot = Bot::new(Symbol::O, Difficulty::Hard);
        assert_eq!(bot.choose_move(&board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_choose_move_leaves_board_untouched() {
        let board = board_with(&[(0, 0, Symbol::X)]);
        let before = board;
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut bot = Bot::with_seed(Symbol::O, difficulty, 3);
            bot.choose_move(&board).unwrap();
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_full_board_is_an_error() {
        let board = full_board();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut bot = Bot::with_seed(Symbol::O, difficulty, 3);
            assert_eq!(bot.choose_move(&board), Err(SearchError::NoMovesAvailable));
        }
    }
}
