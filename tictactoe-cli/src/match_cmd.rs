//! Match command - series of bot-versus-bot games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use tictactoe_core::{Difficulty, Game, Outcome, Player, PlayerKind, Position, ScriptedInput, Symbol};

use crate::config::MatchConfig;
use crate::score::Score;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// JSON match config; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Difficulty of the X bot
    #[arg(long)]
    pub x: Option<Difficulty>,

    /// Difficulty of the O bot
    #[arg(long)]
    pub o: Option<Difficulty>,

    /// Number of games to play
    #[arg(long)]
    pub games: Option<usize>,

    /// Run games one after another
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    starting: Symbol,
    outcome: Outcome,
    moves: Vec<Position>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    score: Score,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Resolve the configuration (file, then flags, then seed)
/// 2. Play the series
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = resolve_config(&args, seed)?;

    tracing::info!(
        "Starting match: X {} vs O {} ({} games)",
        config.x,
        config.o,
        config.games
    );

    let results = play_match(&config)?;

    report_results(&results, &config, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &MatchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    if let Some(x) = args.x {
        config.x = x;
    }
    if let Some(o) = args.o {
        config.o = o;
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

/// Play all games in the match
fn play_match(config: &MatchConfig) -> Result<MatchResults> {
    let base_seed = config.seed.unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());

    let play = |index: usize| play_single_game(config, index, base_seed.wrapping_add(2 * index as u64));

    let games = if config.parallel {
        (0..config.games).into_par_iter().map(play).collect::<Result<Vec<_>>>()?
    } else {
        (0..config.games).map(play).collect::<Result<Vec<_>>>()?
    };

    for record in &games {
        tracing::info!(
            "Game {}: {:?} in {} moves ({} started)",
            record.game_number,
            record.outcome,
            record.moves.len(),
            record.starting
        );
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, config: &MatchConfig, json: bool) {
    if json {
        print_json_results(results, config);
    } else {
        print_text_results(results, config);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one bot-versus-bot game
fn play_single_game(config: &MatchConfig, index: usize, seed: u64) -> Result<GameRecord> {
    let starting = if config.alternate_start && index % 2 == 1 {
        Symbol::O
    } else {
        Symbol::X
    };

    let mut game = Game::new(
        Player::from_kind(PlayerKind::Bot(config.x), Symbol::X, Some(seed)),
        Player::from_kind(PlayerKind::Bot(config.o), Symbol::O, Some(seed.wrapping_add(1))),
        starting,
    );
    let outcome = game.play(&mut ScriptedInput::default())?;

    Ok(GameRecord {
        game_number: index + 1,
        starting,
        outcome,
        moves: game.state().history().iter().map(|&(pos, _)| pos).collect(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let mut score = Score::default();
    for game in &games {
        score.record(game.outcome);
    }

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        score,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(symbol) => format!("{} wins", symbol),
        Outcome::Draw => "draw".to_string(),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, config: &MatchConfig) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        starting: Symbol,
        result: String,
        moves: Vec<Position>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        config: &'a MatchConfig,
        total_games: usize,
        score: Score,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        config,
        total_games: results.score.games(),
        score: results.score,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                starting: g.starting,
                result: outcome_label(g.outcome),
                moves: g.moves.clone(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, config: &MatchConfig) {
    let score = &results.score;

    println!("\n=== Match Results: X {} vs O {} ===", config.x, config.o);
    println!("Total games: {}", score.games());
    println!("X wins:      {} ({:.1}%)", score.x_wins, score.rate(score.x_wins) * 100.0);
    println!("O wins:      {} ({:.1}%)", score.o_wins, score.rate(score.o_wins) * 100.0);
    println!("Draws:       {} ({:.1}%)", score.draws, score.rate(score.draws) * 100.0);
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} moves ({} started)",
            game.game_number,
            outcome_label(game.outcome),
            game.moves.len(),
            game.starting
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
