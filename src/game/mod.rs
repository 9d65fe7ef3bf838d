//! Core Connect Four game logic: the immutable board with its rules, the two
//! sides, and a game state machine with immutable transitions.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Window, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState};
