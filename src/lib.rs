//! # Connect Four AI
//!
//! A Connect Four engine built around a depth-bounded minimax search with
//! alpha-beta pruning, time-bounded iterative deepening, heuristic leaf
//! evaluation, dynamic move ordering and beam-width forward pruning.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board and rules, player, state machine
//! - [`ai`] — Difficulty profiles, evaluator, move ordering, search engine, agents
//! - [`arena`] — Headless engine-vs-engine games
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types
//!
//! The main entry point is [`ai::select_move`]:
//!
//! ```
//! use connect_four_ai::ai::{select_move, Difficulty};
//! use connect_four_ai::game::Board;
//!
//! let board = Board::from_moves(&[3, 3, 2]).unwrap();
//! let column = select_move(&board, &Difficulty::Easy.profile());
//! assert!(column.is_some());
//! ```

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
