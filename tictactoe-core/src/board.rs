//! 3x3 board, move validation and win detection

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::{MoveError, StateError};

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Center cell
pub const CENTER: Position = Position::new(1, 1);

/// Corner cells in scan order
pub const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 2),
    Position::new(2, 0),
    Position::new(2, 2),
];

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
    [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
    [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)],
    // Columns
    [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
    [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
    [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)],
    // Diagonals
    [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
    [Position::new(2, 0), Position::new(1, 1), Position::new(0, 2)],
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// Contents of one cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Symbol::X),
            Cell::O => Some(Symbol::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

/// Board coordinates. Out-of-range values are representable so that
/// untrusted input can reach `apply_move` and be rejected there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// A 3x3 grid. Exactly `moves_made` cells are occupied at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    moves_made: u8,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a grid, counting the occupied cells
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let moves_made = cells.iter().flatten().filter(|c| !c.is_empty()).count() as u8;
        Self { cells, moves_made }
    }

    /// Read-only view of the grid, row by row
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at `pos`, or `None` when off the board
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if pos.is_valid() {
            Some(self.cells[pos.row][pos.col])
        } else {
            None
        }
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made as usize
    }

    /// Place `symbol` at `pos` if the cell is on the board and empty.
    ///
    /// Only validates and records the placement; turn order and win
    /// detection belong to the caller.
    pub fn apply_move(&mut self, pos: Position, symbol: Symbol) -> Result<(), MoveError> {
        if !pos.is_valid() {
            return Err(MoveError::OutOfBounds { row: pos.row, col: pos.col });
        }
        if let Some(by) = self.cells[pos.row][pos.col].symbol() {
            return Err(MoveError::Occupied { row: pos.row, col: pos.col, by });
        }
        self.place(pos, symbol);
        Ok(())
    }

    /// True iff some row, column or diagonal is filled with `symbol`
    pub fn is_winner(&self, symbol: Symbol) -> bool {
        self.winning_line(symbol).is_some()
    }

    /// The first completed line of `symbol`, in `LINES` order
    pub fn winning_line(&self, symbol: Symbol) -> Option<[Position; 3]> {
        let target = Cell::from(symbol);
        LINES
            .iter()
            .find(|line| line.iter().all(|p| self.cells[p.row][p.col] == target))
            .copied()
    }

    /// All empty cells in row-major order
    pub fn valid_moves(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(CELL_COUNT - self.moves_made());
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.moves_made() == CELL_COUNT
    }

    /// Tentatively place `symbol` at an empty, on-board `pos`.
    ///
    /// The returned guard derefs to the board and clears the cell again
    /// when dropped, on every exit path.
    pub fn speculate(&mut self, pos: Position, symbol: Symbol) -> Speculation<'_> {
        debug_assert!(self.cell(pos) == Some(Cell::Empty));
        self.place(pos, symbol);
        Speculation { board: self, pos }
    }

    fn place(&mut self, pos: Position, symbol: Symbol) {
        self.cells[pos.row][pos.col] = symbol.into();
        self.moves_made += 1;
    }

    fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = Cell::Empty;
        self.moves_made -= 1;
    }
}

/// Wire form of [`Board`], checked before it becomes one
#[derive(Deserialize)]
struct BoardData {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    moves_made: u8,
}

impl TryFrom<BoardData> for Board {
    type Error = StateError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let board = Board::from_cells(data.cells);
        if board.moves_made != data.moves_made {
            return Err(StateError::MoveCountMismatch {
                recorded: data.moves_made as usize,
                actual: board.moves_made(),
            });
        }
        Ok(board)
    }
}

/// Scoped speculative placement, see [`Board::speculate`]
pub struct Speculation<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}
