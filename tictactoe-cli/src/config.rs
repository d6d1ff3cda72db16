//! Match configuration, loadable from JSON

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tictactoe_core::Difficulty;

/// Settings for a bot-versus-bot series. Missing JSON fields take defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Difficulty of the bot playing X
    pub x: Difficulty,
    /// Difficulty of the bot playing O
    pub o: Difficulty,
    /// Number of games in the series
    pub games: usize,
    /// Let O move first in every other game
    pub alternate_start: bool,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed for the bots (None = random)
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            x: Difficulty::Medium,
            o: Difficulty::Hard,
            games: 10,
            alternate_start: true,
            parallel: true,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid match config: {}", path.display()))
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
