//! Distance estimates to the goal board.

use crate::board::{Board, SIDE};

/// Goal row and column of a non-blank tile.
fn goal_position(tile: u8) -> (usize, usize) {
    let index = usize::from(tile) - 1;
    (index / SIDE, index % SIDE)
}

/// Sum of Manhattan distances of every non-blank tile from its goal cell.
///
/// Each move shifts exactly one tile by one cell, so this never
/// overestimates the remaining number of moves and changes by exactly one
/// per move.
pub fn manhattan_distance(board: &Board) -> u32 {
    let mut distance = 0;
    for (index, &tile) in board.tiles().iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let (goal_row, goal_col) = goal_position(tile);
        let (row, col) = (index / SIDE, index % SIDE);
        distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
    }
    distance as u32
}

/// Number of non-blank tiles not on their goal cell.
///
/// Diagnostic only; the solver always ranks by [`manhattan_distance`].
pub fn misplaced_tiles(board: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(index, &tile)| tile != 0 && usize::from(tile) != index + 1)
        .count() as u32
}
