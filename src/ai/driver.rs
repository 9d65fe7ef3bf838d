//! Iterative deepening under a wall-clock budget.
//!
//! Rounds run at depth 1, 2, ... up to the profile's `max_depth`. Within a
//! round every root candidate is scored by one bounded alpha-beta call. The
//! clock is read only between root candidates, so a single deep call may run
//! past the budget before the driver notices.

use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use crate::game::{Board, Player};

use super::profile::{DifficultyProfile, MAX_SEARCH_DEPTH};
use super::search::SearchEngine;

/// Side the free [`select_move`] plays.
pub const AI_PLAYER: Player = Player::Yellow;

/// Outcome of one move search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Chosen column, `None` when there is nothing to play or the budget ran
    /// out before any candidate was scored.
    pub best_move: Option<usize>,
    /// Minimax value of `best_move` at the depth it was chosen.
    pub score: Option<i32>,
    /// Deepest round that scored every root candidate.
    pub completed_depth: u32,
    pub nodes: u64,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub timed_out: bool,
}

/// Serialise a `Duration` as fractional seconds.
pub(crate) fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Best root move found in one round.
#[derive(Debug, Clone, Copy)]
struct RoundBest {
    column: usize,
    score: i32,
}

impl<'p> SearchEngine<'p> {
    /// Iterative-deepening search within the profile's time budget.
    pub fn search(&mut self, board: &Board) -> SearchReport {
        let start = Instant::now();
        let budget = self.profile().time_budget();
        let max_depth = self.profile().max_depth.min(MAX_SEARCH_DEPTH);
        let nodes_before = self.nodes();

        // Root ordering depends only on the board, so one list serves every round.
        let root_moves = self.candidates(board, self.ai());
        if root_moves.is_empty() {
            return SearchReport {
                best_move: None,
                score: None,
                completed_depth: 0,
                nodes: 0,
                elapsed: start.elapsed(),
                timed_out: false,
            };
        }

        let mut completed: Option<RoundBest> = None;
        let mut completed_depth = 0;
        let mut timed_out = false;

        'rounds: for depth in 1..=max_depth {
            let mut round: Option<RoundBest> = None;

            for &col in &root_moves {
                if budget.is_some_and(|limit| start.elapsed() > limit) {
                    timed_out = true;
                    info!(
                        "time budget exhausted in round {depth} after {:.3}s",
                        start.elapsed().as_secs_f64()
                    );
                    // Nothing finished yet: fall back to the partial first round.
                    if completed.is_none() {
                        completed = round;
                    }
                    break 'rounds;
                }

                let Ok(next) = board.drop(col, self.ai()) else {
                    continue;
                };
                let score = self.alpha_beta(&next, false, i32::MIN, i32::MAX, 1, depth);
                if round.map_or(true, |best| score > best.score) {
                    round = Some(RoundBest { column: col, score });
                }
            }

            completed = round;
            completed_depth = depth;
            debug!(
                "depth {depth}: best {:?} score {:?} nodes {} ({:.3}s)",
                round.map(|r| r.column),
                round.map(|r| r.score),
                self.nodes() - nodes_before,
                start.elapsed().as_secs_f64()
            );
        }

        SearchReport {
            best_move: completed.map(|r| r.column),
            score: completed.map(|r| r.score),
            completed_depth,
            nodes: self.nodes() - nodes_before,
            elapsed: start.elapsed(),
            timed_out,
        }
    }

    /// One round at exactly `depth`, ignoring the clock.
    pub fn search_fixed_depth(&mut self, board: &Board, depth: u32) -> SearchReport {
        let start = Instant::now();
        let nodes_before = self.nodes();
        let depth = depth.clamp(1, MAX_SEARCH_DEPTH);

        let mut best: Option<RoundBest> = None;
        for col in self.candidates(board, self.ai()) {
            let Ok(next) = board.drop(col, self.ai()) else {
                continue;
            };
            let score = self.alpha_beta(&next, false, i32::MIN, i32::MAX, 1, depth);
            if best.map_or(true, |b| score > b.score) {
                best = Some(RoundBest { column: col, score });
            }
        }

        SearchReport {
            best_move: best.map(|r| r.column),
            score: best.map(|r| r.score),
            completed_depth: depth,
            nodes: self.nodes() - nodes_before,
            elapsed: start.elapsed(),
            timed_out: false,
        }
    }
}

/// Choose a column for [`AI_PLAYER`]. `None` means there is no move to make.
pub fn select_move(board: &Board, profile: &DifficultyProfile) -> Option<usize> {
    SearchEngine::new(profile, AI_PLAYER).search(board).best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::profile::Difficulty;
    use crate::game::COLS;
    use pretty_assertions::assert_eq;

    fn full_width(mut profile: DifficultyProfile) -> DifficultyProfile {
        profile.beam_width = COLS;
        profile
    }

    #[test]
    fn full_board_has_no_move() {
        let pattern = [
            0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5, 4,
            5, 4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6,
        ];
        let board = Board::from_moves(&pattern).unwrap();
        assert_eq!(select_move(&board, &Difficulty::Hard.profile()), None);
    }

    #[test]
    fn takes_horizontal_win() {
        // Yellow holds bottom row 0,1,2; Red stacked on column 6
        let board = Board::from_moves(&[6, 0, 6, 1, 5, 2]).unwrap();
        let profile = full_width(Difficulty::Medium.profile()).unlimited();
        assert_eq!(select_move(&board, &profile), Some(3));
    }

    #[test]
    fn takes_win_with_default_beam() {
        let board = Board::from_moves(&[6, 0, 6, 1, 5, 2]).unwrap();
        assert_eq!(
            select_move(&board, &Difficulty::Hard.profile().unlimited()),
            Some(3)
        );
    }

    #[test]
    fn blocks_opponent_win() {
        // Red holds bottom row 0,1,2; Yellow has two in column 6 and must block
        let board = [
            (0, Player::Red),
            (6, Player::Yellow),
            (1, Player::Red),
            (6, Player::Yellow),
            (2, Player::Red),
        ]
        .iter()
        .fold(Board::new(), |b, &(col, side)| b.drop(col, side).unwrap());
        let profile = full_width(Difficulty::Medium.profile()).unlimited();
        assert_eq!(select_move(&board, &profile), Some(3));
    }

    #[test]
    fn unlimited_budget_matches_fixed_depth() {
        let positions: [&[usize]; 4] = [&[], &[3], &[3, 3, 2, 4], &[0, 6, 1, 5, 3, 3, 2]];
        for moves in positions {
            let board = Board::from_moves(moves).unwrap();
            for tier in [Difficulty::Medium, Difficulty::Hard] {
                let mut profile = tier.profile().unlimited();
                profile.max_depth = 4;

                let iterative = SearchEngine::new(&profile, AI_PLAYER).search(&board);
                let fixed = SearchEngine::new(&profile, AI_PLAYER).search_fixed_depth(&board, 4);

                assert_eq!(iterative.best_move, fixed.best_move, "moves {moves:?}, {tier}");
                assert_eq!(iterative.score, fixed.score);
                assert_eq!(iterative.completed_depth, 4);
                assert!(!iterative.timed_out);
            }
        }
    }

    #[test]
    fn expired_budget_before_first_candidate_is_no_move() {
        let mut profile = Difficulty::Hard.profile();
        profile.time_budget_seconds = 1e-9;
        let report = SearchEngine::new(&profile, AI_PLAYER).search(&Board::new());
        assert!(report.timed_out);
        assert_eq!(report.best_move, None);
        assert_eq!(report.completed_depth, 0);
    }

    #[test]
    fn tight_budget_still_returns_legal_move() {
        let mut profile = Difficulty::Hard.profile();
        profile.max_depth = MAX_SEARCH_DEPTH;
        profile.beam_width = COLS;
        profile.time_budget_seconds = 0.05;
        let board = Board::from_moves(&[3, 3]).unwrap();

        let report = SearchEngine::new(&profile, AI_PLAYER).search(&board);
        assert!(report.timed_out);
        assert!(report.completed_depth >= 1);
        let col = report.best_move.expect("depth 1 completes well within 50ms");
        assert!(board.valid_moves().contains(&col));
    }

    #[test]
    fn timeout_reports_last_completed_depth() {
        let board = Board::from_moves(&[3, 3]).unwrap();
        for budget in [0.005, 0.02, 0.05] {
            let mut profile = full_width(Difficulty::Hard.profile());
            profile.max_depth = MAX_SEARCH_DEPTH;
            profile.time_budget_seconds = budget;

            let report = SearchEngine::new(&profile, AI_PLAYER).search(&board);
            assert!(report.timed_out, "budget {budget}");
            if report.completed_depth == 0 {
                continue;
            }
            // The interrupted round must not leak into the result.
            let fixed = SearchEngine::new(&profile, AI_PLAYER)
                .search_fixed_depth(&board, report.completed_depth);
            assert_eq!(report.best_move, fixed.best_move, "budget {budget}");
            assert_eq!(report.score, fixed.score, "budget {budget}");
        }
    }

    #[test]
    fn negative_or_nan_budget_times_out() {
        for secs in [-1.0, f64::NAN] {
            let mut profile = Difficulty::Hard.profile();
            profile.time_budget_seconds = secs;
            let report = SearchEngine::new(&profile, AI_PLAYER).search(&Board::new());
            assert!(report.timed_out, "budget {secs}");
            assert_eq!(report.best_move, None);
            assert_eq!(report.completed_depth, 0);
        }
    }

    #[test]
    fn zero_beam_still_plays() {
        let mut profile = Difficulty::Medium.profile().unlimited();
        profile.beam_width = 0;
        profile.max_depth = 3;
        assert_eq!(select_move(&Board::new(), &profile), Some(2));
    }

    #[test]
    fn report_serialises_elapsed_as_seconds() {
        let report = SearchReport {
            best_move: Some(3),
            score: Some(5),
            completed_depth: 2,
            nodes: 10,
            elapsed: Duration::from_millis(250),
            timed_out: false,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsed"], serde_json::json!(0.25));
        assert_eq!(json["best_move"], serde_json::json!(3));
    }

    #[test]
    fn search_is_deterministic() {
        let profile = Difficulty::Medium.profile().unlimited();
        let board = Board::from_moves(&[3, 2, 4]).unwrap();
        let a = SearchEngine::new(&profile, AI_PLAYER).search(&board);
        let b = SearchEngine::new(&profile, AI_PLAYER).search(&board);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn engine_plays_either_side() {
        // Red to move with three on the bottom row
        let board = Board::from_moves(&[0, 0, 1, 1, 2, 2]).unwrap();
        let profile = Difficulty::Medium.profile().unlimited();
        let report = SearchEngine::new(&profile, Player::Red).search(&board);
        assert_eq!(report.best_move, Some(3));
    }
}
