use std::path::PathBuf;

use crate::game::{Player, COLS};

/// A column that cannot receive a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("column {column} is out of range (0..{})", COLS)]
    OutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors raised while advancing a [`GameState`](crate::game::GameState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move: {0}")]
    Invalid(#[from] InvalidMove),

    #[error("game is already over")]
    GameOver,

    #[error("{} had no move on a live board", .player.name())]
    NoMove { player: Player },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Unknown difficulty tier name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or 1-3)")]
pub struct ParseDifficultyError(pub String);
