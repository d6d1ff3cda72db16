//! Line-based console I/O and the human move source built on it

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tictactoe_core::{GameState, HumanInput, MoveError, Position};

use crate::render::render_board;

/// What a coordinate prompt produced
enum Coordinate {
    Value(usize),
    NotANumber,
    Closed,
}

/// Prompts on `writer`, answers from `reader`
pub struct Console<R, W> {
    reader: R,
    writer: W,
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            error: None,
        }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// I/O failure hit while serving move requests, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn ask_coordinate(&mut self, prompt: &str) -> io::Result<Coordinate> {
        let Some(line) = self.ask(prompt)? else {
            return Ok(Coordinate::Closed);
        };
        // Negative numbers are integers too; they fail the bounds check later
        Ok(match line.parse::<i64>() {
            Ok(n) => Coordinate::Value(usize::try_from(n).unwrap_or(usize::MAX)),
            Err(_) => Coordinate::NotANumber,
        })
    }

    fn prompt_move(&mut self, state: &GameState) -> io::Result<Option<Position>> {
        loop {
            self.say(format!("Player {}, please make your move", state.current_symbol()))?;
            self.say(render_board(state.board()))?;

            let row = match self.ask_coordinate("Enter Row: ")? {
                Coordinate::Value(row) => row,
                Coordinate::NotANumber => {
                    self.say("Please enter integers only")?;
                    continue;
                }
                Coordinate::Closed => return Ok(None),
            };
            let col = match self.ask_coordinate("Enter Col: ")? {
                Coordinate::Value(col) => col,
                Coordinate::NotANumber => {
                    self.say("Please enter integers only")?;
                    continue;
                }
                Coordinate::Closed => return Ok(None),
            };
            return Ok(Some(Position::new(row, col)));
        }
    }
}

impl<R: BufRead, W: Write> HumanInput for Console<R, W> {
    fn request_move(&mut self, state: &GameState) -> Option<Position> {
        match self.prompt_move(state) {
            Ok(pos) => pos,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn move_rejected(&mut self, _state: &GameState, pos: Position, error: &MoveError) {
        tracing::debug!("Rejected {}: {}", pos, error);
        if let Err(e) = self.say("Invalid move, please try again") {
            self.error = Some(e);
        }
    }
}
