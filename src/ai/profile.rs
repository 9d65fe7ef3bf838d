use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseDifficultyError};
use crate::game::{COLS, ROWS};

/// Hard ceiling on search depth: a game never lasts more plies than cells.
pub const MAX_SEARCH_DEPTH: u32 = (ROWS * COLS) as u32;

/// Pattern weights used by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub win: i32,
    pub three_in_row: i32,
    pub two_in_row: i32,
    pub block_opponent_win: i32,
    pub block_opponent_three: i32,
}

/// Everything that controls engine strength. Passed by reference into every
/// search call; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub max_depth: u32,
    pub beam_width: usize,
    pub weights: HeuristicWeights,
    pub time_budget_seconds: f64,
    pub column_weights: [i32; COLS],
}

impl DifficultyProfile {
    /// Wall-clock budget, or `None` when it is too large to represent.
    ///
    /// A zero, negative or NaN budget is an already-expired `Duration::ZERO`.
    pub fn time_budget(&self) -> Option<Duration> {
        let secs = self.time_budget_seconds;
        if secs.is_nan() || secs <= 0.0 {
            return Some(Duration::ZERO);
        }
        Duration::try_from_secs_f64(secs).ok()
    }

    /// Same profile with the time budget lifted.
    pub fn unlimited(&self) -> Self {
        DifficultyProfile {
            time_budget_seconds: f64::INFINITY,
            ..self.clone()
        }
    }

    /// Check the profile's invariants. `name` prefixes error messages.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "{name}.max_depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.beam_width == 0 {
            return Err(ConfigError::Validation(format!(
                "{name}.beam_width must be >= 1"
            )));
        }
        if self.time_budget_seconds.is_nan() || self.time_budget_seconds <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name}.time_budget_seconds must be > 0"
            )));
        }
        let w = &self.weights;
        let all_weights = [
            w.win,
            w.three_in_row,
            w.two_in_row,
            w.block_opponent_win,
            w.block_opponent_three,
        ];
        if all_weights.iter().any(|&v| v < 0) {
            return Err(ConfigError::Validation(format!(
                "{name}.weights must be >= 0"
            )));
        }
        Ok(())
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Medium.profile()
    }
}

/// The three named tiers shipped with the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Built-in parameters for this tier.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            // Easy and Medium share parameters in the shipped table.
            Difficulty::Easy | Difficulty::Medium => DifficultyProfile {
                max_depth: 5,
                beam_width: 4,
                weights: HeuristicWeights {
                    win: 10_000,
                    three_in_row: 100,
                    two_in_row: 50,
                    block_opponent_win: 100,
                    block_opponent_three: 45,
                },
                time_budget_seconds: 1.0,
                column_weights: [3, 4, 5, 5, 5, 4, 3],
            },
            Difficulty::Hard => DifficultyProfile {
                max_depth: 7,
                beam_width: 6,
                weights: HeuristicWeights {
                    win: 10_000,
                    three_in_row: 200,
                    two_in_row: 100,
                    block_opponent_win: 210,
                    block_opponent_three: 100,
                },
                time_budget_seconds: 1.2,
                column_weights: [6, 8, 10, 14, 10, 8, 6],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
