//! One-move win search used by the easy and medium bots

use crate::board::{Board, Cell, Position, Symbol};

/// First candidate, in the order given, that completes a line for `symbol`.
///
/// Each candidate is placed speculatively and cleared again before the next
/// one is tried, so `board` is unchanged on return. Candidates that are off
/// the board or already occupied are skipped.
pub fn find_winning_move(
    board: &mut Board,
    candidates: &[Position],
    symbol: Symbol,
) -> Option<Position> {
    for &pos in candidates {
        if board.cell(pos) != Some(Cell::Empty) {
            continue;
        }
        let won = board.speculate(pos, symbol).is_winner(symbol);
        if won {
            return Some(pos);
        }
    }
    None
}
