//! Play command - console rounds with a running score
//!
//! ## Architecture
//!
//! - run(): wires stdin/stdout into a session
//! - run_session(): opponent choice, rounds, replay prompt, final score
//! - play_round(): one game, announcing bot moves and the result

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tictactoe_core::{Difficulty, Error, Game, Outcome, Player, PlayerKind, Symbol, Turn};

use crate::console::Console;
use crate::render::render_board;
use crate::score::Score;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StartSymbol {
    X,
    O,
}

impl From<StartSymbol> for Symbol {
    fn from(start: StartSymbol) -> Self {
        match start {
            StartSymbol::X => Symbol::X,
            StartSymbol::O => Symbol::O,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Who plays O: human, easy, medium, hard (or 1-3). Asked when omitted
    #[arg(long, value_name = "KIND")]
    pub opponent: Option<PlayerKind>,

    /// Symbol that moves first in the first round; later rounds alternate
    #[arg(long, value_enum, default_value = "x")]
    pub start: StartSymbol,

    /// Stop after this many rounds instead of asking to play again
    #[arg(long)]
    pub rounds: Option<usize>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run play command on the process's stdin and stdout
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let score = run_session(&args, seed, &mut console)?;
    tracing::info!("Session finished after {} games", score.games());
    Ok(())
}

/// Play rounds until the user stops, then print the tally
pub fn run_session<R: BufRead, W: Write>(
    args: &PlayArgs,
    seed: Option<u64>,
    console: &mut Console<R, W>,
) -> Result<Score> {
    let mut score = Score::default();
    let mut starting = Symbol::from(args.start);
    let mut round: usize = 0;

    loop {
        let opponent = match args.opponent {
            Some(kind) => kind,
            None => match ask_opponent(console)? {
                Some(kind) => kind,
                None => break,
            },
        };

        round += 1;
        let round_seed = seed.map(|s| s.wrapping_add(round as u64));
        match play_round(console, opponent, starting, round_seed)? {
            Some(outcome) => score.record(outcome),
            None => break,
        }
        starting = starting.opponent();

        let again = match args.rounds {
            Some(limit) => round < limit,
            None => console
                .ask("Would you like to play again: type Y ")?
                .is_some_and(|answer| answer.eq_ignore_ascii_case("y")),
        };
        if !again {
            break;
        }
    }

    console.say(format!("Final score: {}", score))?;
    Ok(score)
}

// ============================================================================
// STEPS
// ============================================================================

/// Ask whether to face a bot and which one. `None` at end of input
fn ask_opponent<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<PlayerKind>> {
    let Some(answer) = console.ask("Would you like to play a bot: ")? else {
        return Ok(None);
    };
    if !answer.eq_ignore_ascii_case("y") {
        return Ok(Some(PlayerKind::Human));
    }

    loop {
        let Some(level) = console.ask("What level bot would you like to play: ")? else {
            return Ok(None);
        };
        match level.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(Some(PlayerKind::Bot(difficulty))),
            Err(e) => console.say(e)?,
        }
    }
}

/// Play one game with a human as X. `None` when input ran out mid-game
fn play_round<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    opponent: PlayerKind,
    starting: Symbol,
    seed: Option<u64>,
) -> Result<Option<Outcome>> {
    let mut game = Game::new(
        Player::Human,
        Player::from_kind(opponent, Symbol::O, seed),
        starting,
    );
    tracing::debug!("New round: X human vs O {}, {} starts", opponent, starting);

    let outcome = loop {
        if let Some(outcome) = game.state().outcome() {
            break outcome;
        }

        let turn = match game.play_turn(console) {
            Ok(turn) => turn,
            Err(Error::InputClosed) => {
                if let Some(e) = console.take_error() {
                    return Err(e).context("Failed to talk to the console");
                }
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if let Turn::Accepted { position, symbol, .. } = turn {
            if !game.player(symbol).is_human() {
                console.say(format!("{} plays {}", symbol, position))?;
            }
        }
    };

    console.say(render_board(game.state().board()))?;
    console.say(outcome_message(outcome))?;
    Ok(Some(outcome))
}

fn outcome_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(symbol) => format!("Player {} wins!", symbol),
        Outcome::Draw => "No moves remaining, game is a draw!".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
