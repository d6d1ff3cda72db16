//! Exhaustive minimax search with alpha-beta pruning
//!
//! Scores are from the searching side's point of view. The whole game tree
//! of a 3x3 board is small enough to search to the end, so there is no depth
//! limit, no evaluation heuristic and no transposition table.

use crate::board::{Board, Position, Symbol};
use crate::error::SearchError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Searching side has a completed line
pub const WIN_SCORE: i32 = 1;

/// Board filled without a winner
pub const DRAW_SCORE: i32 = 0;

/// Opponent has a completed line
pub const LOSS_SCORE: i32 = -1;

// ============================================================================
// MINIMAX SEARCH
// ============================================================================

/// Perfect-play search for one side
#[derive(Clone, Debug)]
pub struct Minimax {
    symbol: Symbol,
    nodes: u64,
}

impl Minimax {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol, nodes: 0 }
    }

    /// Side this search plays for
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Positions visited by the most recent search
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Best move for `self.symbol` on `board`.
    ///
    /// Candidates are tried in scan order and only a strictly better score
    /// replaces the current choice, so ties go to the earliest cell. The
    /// search stops at the first winning candidate. `board` is restored
    /// before returning.
    pub fn best_move(&mut self, board: &mut Board) -> Result<Position, SearchError> {
        let moves = board.valid_moves();
        if moves.is_empty() {
            return Err(SearchError::NoMovesAvailable);
        }

        self.nodes = 0;
        let mut best_move = moves[0];
        let mut best_score = i32::MIN;

        for pos in moves {
            let score = {
                let mut child = board.speculate(pos, self.symbol);
                self.minimax(&mut child, self.symbol.opponent(), i32::MIN, i32::MAX)
            };

            if score > best_score {
                best_score = score;
                best_move = pos;
                if score == WIN_SCORE {
                    break;
                }
            }
        }

        tracing::debug!(
            "Minimax for {} chose {} (score={}, nodes={})",
            self.symbol,
            best_move,
            best_score,
            self.nodes
        );

        Ok(best_move)
    }

    /// Game-theoretic value of `board` with `to_move` on turn
    pub fn evaluate(&mut self, board: &mut Board, to_move: Symbol) -> i32 {
        self.nodes = 0;
        self.minimax(board, to_move, i32::MIN, i32::MAX)
    }

    fn minimax(&mut self, board: &mut Board, to_move: Symbol, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if board.is_winner(self.symbol) {
            return WIN_SCORE;
        }
        if board.is_winner(self.symbol.opponent()) {
            return LOSS_SCORE;
        }
        if board.is_full() {
            return DRAW_SCORE;
        }

        if to_move == self.symbol {
            let mut best = i32::MIN;
            for pos in board.valid_moves() {
                let score = {
                    let mut child = board.speculate(pos, to_move);
                    self.minimax(&mut child, to_move.opponent(), alpha, beta)
                };
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for pos in board.valid_moves() {
                let score = {
                    let mut child = board.speculate(pos, to_move);
                    self.minimax(&mut child, to_move.opponent(), alpha, beta)
                };
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
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

    #[test]
    fn test_takes_immediate_win() {
        // O O .
        // X X .
        // X . .
        let mut board = board_with(&[
            (1, 0, Symbol::X),
            (0, 0, Symbol::O),
            (1, 1, Symbol::X),
            (0, 1, Symbol::O),
            (2, 0, Symbol::X),
        ]);
        let mut search = Minimax::new(Symbol::O);
        assert_eq!(search.best_move(&mut board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_blocks_open_row() {
        let mut board = board_with(&[(0, 0, Symbol::X), (1, 1, Symbol::O), (0, 1, Symbol::X)]);
        let mut search = Minimax::new(Symbol::O);
        assert_eq!(search.best_move(&mut board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_earliest_winning_move_is_chosen() {
        // O O .
        // O X X
        // . X .
        let mut board = board_with(&[
            (1, 1, Symbol::X),
            (0, 0, Symbol::O),
            (1, 2, Symbol::X),
            (0, 1, Symbol::O),
            (2, 1, Symbol::X),
            (1, 0, Symbol::O),
        ]);
        let mut search = Minimax::new(Symbol::O);
        assert_eq!(search.best_move(&mut board), Ok(Position::new(0, 2)));
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut board = board_with(&[
            (0, 0, Symbol::X),
            (0, 1, Symbol::O),
            (0, 2, Symbol::X),
            (1, 0, Symbol::X),
            (1, 1, Symbol::O),
            (1, 2, Symbol::O),
            (2, 0, Symbol::O),
            (2, 1, Symbol::X),
            (2, 2, Symbol::X),
        ]);
        let mut search = Minimax::new(Symbol::X);
        assert_eq!(search.best_move(&mut board), Err(SearchError::NoMovesAvailable));
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = board_with(&[(1, 1, Symbol::X)]);
        let before = board;
        let mut search = Minimax::new(Symbol::O);
        search.best_move(&mut board).unwrap();
        assert_eq!(board, before);
        assert!(search.nodes_searched() > 0);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut board = Board::new();
        let mut search = Minimax::new(Symbol::X);
        assert_eq!(search.evaluate(&mut board, Symbol::X), DRAW_SCORE);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_center_reply_does_not_lose() {
        // X opened in the center; every non-losing reply for O is a corner.
        let mut board = board_with(&[(1, 1, Symbol::X)]);
        let mut search = Minimax::new(Symbol::O);
        let reply = search.best_move(&mut board).unwrap();
        assert_eq!(reply, Position::new(0, 0));

        board.apply_move(reply, Symbol::O).unwrap();
        assert_eq!(search.evaluate(&mut board, Symbol::X), DRAW_SCORE);
    }

    #[test]
    fn test_detects_forced_loss() {
        // X . X
        // . O .
        // O . X
        // X threatens (0, 1) and (1, 2); O can only block one.
        let mut board = board_with(&[
            (0, 0, Symbol::X),
            (1, 1, Symbol::O),
            (2, 2, Symbol::X),
            (2, 0, Symbol::O),
            (0, 2, Symbol::X),
        ]);
        let mut search = Minimax::new(Symbol::O);
        assert_eq!(search.evaluate(&mut board, Symbol::O), LOSS_SCORE);
    }
}
