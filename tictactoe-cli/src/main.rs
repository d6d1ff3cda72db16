//! Tic-Tac-Toe CLI - Command-line interface
//!
//! Commands:
//! - play: Console games against a human or a bot, with a running score
//! - match: Bot-versus-bot series with aggregate statistics

mod config;
mod console;
mod match_cmd;
mod play_cmd;
mod render;
mod score;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against humans or bots")]
struct Cli {
    /// Random seed for reproducible bots
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log engine decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds in the console
    Play(play_cmd::PlayArgs),
    /// Play a series of bot-versus-bot games
    Match(match_cmd::MatchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
