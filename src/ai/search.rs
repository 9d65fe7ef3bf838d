//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The engine plays one fixed side (`ai`). Maximizing nodes are the AI's
//! turns, minimizing nodes the opponent's. Leaf positions are always scored
//! from the AI's perspective, whichever side is to move at the leaf.

use crate::game::{Board, Player};

use super::evaluator;
use super::ordering::{order_moves, truncate_to_beam};
use super::profile::DifficultyProfile;

/// Value of a decided game. Not adjusted for distance to the win.
pub const WIN_SCORE: i32 = 10_000;

/// Bounded alpha-beta search for one side under one profile.
pub struct SearchEngine<'p> {
    profile: &'p DifficultyProfile,
    ai: Player,
    nodes: u64,
}

impl<'p> SearchEngine<'p> {
    pub fn new(profile: &'p DifficultyProfile, ai: Player) -> Self {
        SearchEngine {
            profile,
            ai,
            nodes: 0,
        }
    }

    pub fn profile(&self) -> &'p DifficultyProfile {
        self.profile
    }

    pub fn ai(&self) -> Player {
        self.ai
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Terminal or horizon value of `board`, if the node is a leaf.
    fn leaf_value(&self, board: &Board, depth: u32, max_depth: u32) -> Option<i32> {
        leaf_value(board, self.ai, depth, max_depth, self.profile)
    }

    /// Root candidates for `side`: legal moves, ordered, then beam-truncated.
    /// A beam of zero is treated as one so a live board always has a move.
    pub fn candidates(&self, board: &Board, side: Player) -> Vec<usize> {
        let ordered = order_moves(
            board,
            &board.valid_moves(),
            side,
            &self.profile.weights,
            &self.profile.column_weights,
        );
        truncate_to_beam(ordered, self.profile.beam_width.max(1))
    }

    /// Minimax value of `board` with the AI to move iff `maximizing`.
    ///
    /// `depth` counts plies already played below the root; the search stops
    /// at `depth == max_depth`. Iteration over a node's children stops once
    /// `alpha >= beta`.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        depth: u32,
        max_depth: u32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(value) = self.leaf_value(board, depth, max_depth) {
            return value;
        }

        let mover = if maximizing { self.ai } else { self.ai.other() };
        let moves = self.candidates(board, mover);

        if maximizing {
            let mut best = i32::MIN;
            for col in moves {
                let Ok(next) = board.drop(col, mover) else {
                    continue;
                };
                let value = self.alpha_beta(&next, false, alpha, beta, depth + 1, max_depth);
                best = best.max(value);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for col in moves {
                let Ok(next) = board.drop(col, mover) else {
                    continue;
                };
                let value = self.alpha_beta(&next, true, alpha, beta, depth + 1, max_depth);
                best = best.min(value);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}

fn leaf_value(
    board: &Board,
    ai: Player,
    depth: u32,
    max_depth: u32,
    profile: &DifficultyProfile,
) -> Option<i32> {
    if board.is_win(ai.other()) {
        return Some(-WIN_SCORE);
    }
    if board.is_win(ai) {
        return Some(WIN_SCORE);
    }
    if board.is_full() {
        return Some(0);
    }
    if depth >= max_depth {
        return Some(evaluator::score(
            board,
            ai,
            &profile.weights,
            &profile.column_weights,
        ));
    }
    None
}

/// Plain minimax over every legal move in column order: no ordering, no beam,
/// no pruning. Exponentially slower than [`SearchEngine::alpha_beta`]; used to
/// check that pruning never changes a value.
pub fn exhaustive_minimax(
    board: &Board,
    ai: Player,
    maximizing: bool,
    depth: u32,
    max_depth: u32,
    profile: &DifficultyProfile,
) -> i32 {
    if let Some(value) = leaf_value(board, ai, depth, max_depth, profile) {
        return value;
    }

    let mover = if maximizing { ai } else { ai.other() };
    let values = board.valid_moves().into_iter().filter_map(|col| {
        let next = board.drop(col, mover).ok()?;
        Some(exhaustive_minimax(
            &next,
            ai,
            !maximizing,
            depth + 1,
            max_depth,
            profile,
        ))
    });

    if maximizing {
        values.max().unwrap_or(i32::MIN)
    } else {
        values.min().unwrap_or(i32::MAX)
    }
}
