//! Move ordering and beam truncation.
//!
//! This is the approximate stage of the search. Ordering alone never changes
//! a minimax value, but truncating to the beam discards candidates outright,
//! so a beam narrower than the number of legal moves can miss the best line.

use std::cmp::Reverse;

use crate::game::{Board, Player, COLS};

use super::evaluator;
use super::profile::HeuristicWeights;

/// Rank `candidates` best-first for `side`, scoring each resulting position
/// from `side`'s perspective. Equal scores keep their input order.
pub fn order_moves(
    board: &Board,
    candidates: &[usize],
    side: Player,
    weights: &HeuristicWeights,
    column_weights: &[i32; COLS],
) -> Vec<usize> {
    let mut scored: Vec<(i32, usize)> = candidates
        .iter()
        .filter_map(|&col| {
            let next = board.drop(col, side).ok()?;
            Some((evaluator::score(&next, side, weights, column_weights), col))
        })
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|&(score, _)| Reverse(score));
    scored.into_iter().map(|(_, col)| col).collect()
}

/// Keep only the first `beam_width` moves.
pub fn truncate_to_beam(mut moves: Vec<usize>, beam_width: usize) -> Vec<usize> {
    moves.truncate(beam_width);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::profile::Difficulty;

    #[test]
    fn center_first_on_empty_board() {
        let profile = Difficulty::Medium.profile();
        let board = Board::new();
        let ordered = order_moves(
            &board,
            &board.valid_moves(),
            Player::Yellow,
            &profile.weights,
            &profile.column_weights,
        );
        // Column weights [3,4,5,5,5,4,3]; ties resolve in ascending order.
        assert_eq!(ordered, vec![2, 3, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn ties_keep_ascending_order() {
        let profile = Difficulty::Medium.profile();
        let flat = [0; COLS];
        let board = Board::new();
        let ordered = order_moves(
            &board,
            &board.valid_moves(),
            Player::Red,
            &profile.weights,
            &flat,
        );
        assert_eq!(ordered, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn completing_a_line_ranks_first() {
        let profile = Difficulty::Medium.profile();
        // Yellow holds bottom row 4,5,6; Red stacked on column 0
        let board = Board::from_moves(&[0, 4, 0, 5, 0, 6]).unwrap();
        let ordered = order_moves(
            &board,
            &board.valid_moves(),
            Player::Yellow,
            &profile.weights,
            &profile.column_weights,
        );
        assert_eq!(ordered[0], 3);
    }

    #[test]
    fn output_is_a_permutation_of_candidates() {
        let profile = Difficulty::Hard.profile();
        let board = Board::from_moves(&[3, 3, 3, 2, 4]).unwrap();
        let candidates = vec![6, 1, 3];
        let mut ordered = order_moves(
            &board,
            &candidates,
            Player::Yellow,
            &profile.weights,
            &profile.column_weights,
        );
        ordered.sort_unstable();
        assert_eq!(ordered, vec![1, 3, 6]);
    }

    #[test]
    fn beam_truncates() {
        assert_eq!(truncate_to_beam(vec![3, 2, 4, 1], 2), vec![3, 2]);
        assert_eq!(truncate_to_beam(vec![3, 2], 7), vec![3, 2]);
    }
}
