//! Plain-text board rendering

use tictactoe_core::{Board, Cell};

const ROW_SEPARATOR: &str = "--+---+--";

fn cell_char(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => ".",
        Cell::X => "X",
        Cell::O => "O",
    }
}

/// Render `board` as three ` | `-joined rows with separator lines between
pub fn render_board(board: &Board) -> String {
    board
        .rows()
        .iter()
        .map(|row| row.iter().map(|&c| cell_char(c)).collect::<Vec<_>>().join(" | "))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", ROW_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{Position, Symbol};

    #[test]
    fn test_render_empty_board() {
        let expected = ". | . | .\n--+---+--\n. | . | .\n--+---+--\n. | . | .";
        assert_eq!(render_board(&Board::new()), expected);
    }

    #[test]
    fn test_render_marks() {
        let mut board = Board::new();
        board.apply_move(Position::new(0, 0), Symbol::X).unwrap();
        board.apply_move(Position::new(2, 1), Symbol::O).unwrap();
        let rendered = render_board(&board);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "X | . | .");
        assert_eq!(lines[4], ". | O | .");
    }
}
