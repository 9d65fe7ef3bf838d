//! Heuristic position scoring.
//!
//! A position is worth the sum of a column-control term (each of the side's
//! pieces multiplied by its column weight) and a pattern term over every
//! four-cell window. Scores are relative to the side being evaluated and are
//! not antisymmetric: evaluating the opponent is a separate computation, not a
//! negation.

use crate::game::{Board, Cell, Player, COLS};

use super::profile::HeuristicWeights;

/// Contribution of one window given exact counts of own, opponent and empty
/// cells. Compositions not listed score zero.
pub fn window_score(own: usize, opp: usize, empty: usize, weights: &HeuristicWeights) -> i32 {
    match (own, opp, empty) {
        (4, 0, 0) => weights.win,
        (3, 0, 1) => weights.three_in_row,
        (2, 0, 2) => weights.two_in_row,
        (0, 3, 1) => -weights.block_opponent_win,
        (0, 2, 2) => -weights.block_opponent_three,
        _ => 0,
    }
}

/// Score `board` from `side`'s point of view.
pub fn score(
    board: &Board,
    side: Player,
    weights: &HeuristicWeights,
    column_weights: &[i32; COLS],
) -> i32 {
    let own_cell = side.to_cell();
    let opp_cell = side.other().to_cell();

    let column_term: i32 = (0..COLS)
        .map(|col| board.column_count(col, side) as i32 * column_weights[col])
        .sum();

    let window_term: i32 = Board::windows()
        .iter()
        .map(|window| {
            let mut own = 0;
            let mut opp = 0;
            let mut empty = 0;
            for &(row, col) in window {
                match board.get(row, col) {
                    c if c == own_cell => own += 1,
                    c if c == opp_cell => opp += 1,
                    Cell::Empty => empty += 1,
                    _ => unreachable!("cell is own, opponent or empty"),
                }
            }
            window_score(own, opp, empty, weights)
        })
        .sum();

    column_term + window_term
}
