//! Game state and the turn-driving controller

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, Symbol};
use crate::error::{MoveError, Result, StateError};
use crate::player::{HumanInput, Player};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Final result of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Symbol),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Symbol> {
        match self {
            Outcome::Winner(symbol) => Some(symbol),
            Outcome::Draw => None,
        }
    }
}

/// Game status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Over(Outcome),
}

/// Result of one controller turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Move placed; `status` is the state after it
    Accepted {
        position: Position,
        symbol: Symbol,
        status: GameStatus,
    },
    /// Move refused; the same symbol is still on turn
    Rejected { position: Position, error: MoveError },
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board plus turn bookkeeping. Changes once per accepted move and is
/// frozen once the game is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateData")]
pub struct GameState {
    board: Board,
    current: Symbol,
    status: GameStatus,
    history: Vec<(Position, Symbol)>,
}

impl GameState {
    pub fn new(starting: Symbol) -> Self {
        Self {
            board: Board::new(),
            current: starting,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Symbol on turn (the last mover once the game is over)
    pub fn current_symbol(&self) -> Symbol {
        self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Over(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }

    /// Winner, or `None` for a draw or an unfinished game
    pub fn winner(&self) -> Option<Symbol> {
        self.outcome().and_then(Outcome::winner)
    }

    pub fn moves_made(&self) -> usize {
        self.board.moves_made()
    }

    /// Accepted moves in play order
    pub fn history(&self) -> &[(Position, Symbol)] {
        &self.history
    }

    /// Play `pos` for the symbol on turn.
    ///
    /// On refusal nothing changes and the same symbol stays on turn.
    pub fn apply_move(&mut self, pos: Position) -> std::result::Result<GameStatus, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let symbol = self.current;
        self.board.apply_move(pos, symbol)?;
        self.history.push((pos, symbol));

        // Only the mover can have completed a line
        if self.board.is_winner(symbol) {
            self.status = GameStatus::Over(Outcome::Winner(symbol));
        } else if self.board.is_full() {
            self.status = GameStatus::Over(Outcome::Draw);
        } else {
            self.current = symbol.opponent();
        }

        Ok(self.status)
    }
}

/// Wire form of [`GameState`]. Accepted only if replaying `history`
/// reproduces the board, turn and status.
#[derive(Deserialize)]
struct GameStateData {
    board: Board,
    current: Symbol,
    status: GameStatus,
    history: Vec<(Position, Symbol)>,
}

impl TryFrom<GameStateData> for GameState {
    type Error = StateError;

    fn try_from(data: GameStateData) -> std::result::Result<Self, Self::Error> {
        let starting = data.history.first().map_or(data.current, |&(_, symbol)| symbol);
        let mut replay = GameState::new(starting);

        for (index, &(pos, symbol)) in data.history.iter().enumerate() {
            if symbol != replay.current {
                return Err(StateError::OutOfTurn { index });
            }
            replay
                .apply_move(pos)
                .map_err(|source| StateError::IllegalMove { index, source })?;
        }

        if replay.board != data.board || replay.current != data.current || replay.status != data.status {
            return Err(StateError::Inconsistent);
        }
        Ok(replay)
    }
}

// ============================================================================
// GAME CONTROLLER
// ============================================================================

/// Two players and the state they play on
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    x: Player,
    o: Player,
}

impl Game {
    /// Seat `x` and `o`; bots are rebound to the side they sit on
    pub fn new(mut x: Player, mut o: Player, starting: Symbol) -> Self {
        x.seat(Symbol::X);
        o.seat(Symbol::O);
        Self {
            state: GameState::new(starting),
            x,
            o,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self, symbol: Symbol) -> &Player {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    /// Ask the player on turn for one move and apply it
    pub fn play_turn<I>(&mut self, input: &mut I) -> Result<Turn>
    where
        I: HumanInput + ?Sized,
    {
        if self.state.is_over() {
            return Err(MoveError::GameOver.into());
        }

        let symbol = self.state.current_symbol();
        let player = match symbol {
            Symbol::X => &mut self.x,
            Symbol::O => &mut self.o,
        };
        let position = player.next_move(&self.state, input)?;

        match self.state.apply_move(position) {
            Ok(status) => {
                tracing::debug!("{} played {} -> {:?}", symbol, position, status);
                Ok(Turn::Accepted { position, symbol, status })
            }
            Err(error) => {
                tracing::debug!("{} move {} rejected: {}", symbol, position, error);
                input.move_rejected(&self.state, position, &error);
                Ok(Turn::Rejected { position, error })
            }
        }
    }

    /// Drive turns until the game ends
    pub fn play<I>(&mut self, input: &mut I) -> Result<Outcome>
    where
        I: HumanInput + ?Sized,
    {
        loop {
            if let Turn::Accepted { status: GameStatus::Over(outcome), .. } = self.play_turn(input)? {
                return Ok(outcome);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
