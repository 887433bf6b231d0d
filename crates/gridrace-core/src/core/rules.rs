//! Row, column and box uniqueness rules.
//!
//! Everything here is a pure function of the grid. The search engine calls
//! [`is_safe`] on every tentative assignment; the remaining helpers are built on it.

use crate::core::models::grid::{BOX, EMPTY, Grid, N};
use itertools::iproduct;

/// Checks whether `num` can be placed at `(row, col)`.
///
/// # Arguments
///
/// * `grid` - The grid to inspect.
/// * `row`, `col` - The target cell.
/// * `num` - The value to place, assumed to be in `1..=9`.
///
/// # Return
///
/// Returns `false` if `num` already occurs in `row`, in `col`, or in the 3x3 box
/// containing the cell; `true` otherwise. The target cell itself is not skipped, so a
/// filled cell holding `num` makes the check fail.
pub fn is_safe(grid: &Grid, row: usize, col: usize, num: u8) -> bool {
    for x in 0..N {
        if grid.get(row, x) == num || grid.get(x, col) == num {
            return false;
        }
    }
    let start_row = row - row % BOX;
    let start_col = col - col % BOX;
    !iproduct!(start_row..start_row + BOX, start_col..start_col + BOX)
        .any(|(r, c)| grid.get(r, c) == num)
}

/// Returns the values that pass [`is_safe`] at `(row, col)`, in ascending order.
pub fn candidates(grid: &Grid, row: usize, col: usize) -> Vec<u8> {
    (1..=N as u8)
        .filter(|&num| is_safe(grid, row, col, num))
        .collect()
}

/// Checks that no two givens conflict.
///
/// Each filled cell is cleared on a scratch copy, re-checked against the rest of the
/// grid, and restored.
pub fn has_consistent_clues(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    for (row, col) in iproduct!(0..N, 0..N) {
        let value = scratch.get(row, col);
        if value == EMPTY {
            continue;
        }
        scratch.clear(row, col);
        let safe = is_safe(&scratch, row, col, value);
        scratch.set(row, col, value);
        if !safe {
            return false;
        }
    }
    true
}

/// Returns `true` for a full grid that satisfies every uniqueness rule.
pub fn is_complete_solution(grid: &Grid) -> bool {
    grid.is_filled() && has_consistent_clues(grid)
}

pub fn has_minimum_clues(grid: &Grid, min_clues: usize) -> bool {
    grid.clue_count() >= min_clues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DUPLICATE_IN_ROW, UNIQUE_30, UNIQUE_30_SOLUTION, grid};

    fn occurs_in_unit(grid: &Grid, row: usize, col: usize, num: u8) -> bool {
        let in_row = (0..N).any(|c| grid.get(row, c) == num);
        let in_col = (0..N).any(|r| grid.get(r, col) == num);
        let in_box = (0..N).any(|i| {
            let r = (row / BOX) * BOX + i / BOX;
            let c = (col / BOX) * BOX + i % BOX;
            grid.get(r, c) == num
        });
        in_row || in_col || in_box
    }

    #[test]
    fn is_safe_is_false_exactly_when_value_occurs_in_a_unit() {
        for puzzle in [grid(UNIQUE_30), grid(DUPLICATE_IN_ROW), Grid::empty()] {
            for (row, col, num) in iproduct!(0..N, 0..N, 1..=N as u8) {
                assert_eq!(
                    is_safe(&puzzle, row, col, num),
                    !occurs_in_unit(&puzzle, row, col, num),
                    "mismatch at ({row}, {col}) for {num}"
                );
            }
        }
    }

    #[test]
    fn is_safe_detects_box_conflicts_outside_row_and_column() {
        let mut g = Grid::empty();
        g.set(1, 1, 7);
        assert!(!is_safe(&g, 0, 0, 7));
        assert!(is_safe(&g, 0, 3, 7));
    }

    #[test]
    fn candidates_are_ascending_and_feasible() {
        let puzzle = grid(UNIQUE_30);
        let values = candidates(&puzzle, 0, 2);
        assert_eq!(values, vec![1, 2, 4]);
        assert!(candidates(&Grid::empty(), 4, 4).len() == N);
    }

    #[test]
    fn consistent_clues_accepts_valid_puzzles_and_rejects_duplicates() {
        assert!(has_consistent_clues(&grid(UNIQUE_30)));
        assert!(has_consistent_clues(&Grid::empty()));
        assert!(!has_consistent_clues(&grid(DUPLICATE_IN_ROW)));
    }

    #[test]
    fn complete_solution_requires_full_and_consistent_grid() {
        assert!(is_complete_solution(&grid(UNIQUE_30_SOLUTION)));
        assert!(!is_complete_solution(&grid(UNIQUE_30)));

        let mut broken = grid(UNIQUE_30_SOLUTION);
        let (a, b) = (broken.get(0, 0), broken.get(0, 1));
        broken.set(0, 0, b);
        broken.set(0, 1, a);
        assert!(!is_complete_solution(&broken));
    }

    #[test]
    fn minimum_clue_threshold() {
        let puzzle = grid(UNIQUE_30);
        assert!(has_minimum_clues(&puzzle, 17));
        assert!(has_minimum_clues(&puzzle, 30));
        assert!(!has_minimum_clues(&puzzle, 31));
        assert!(has_minimum_clues(&Grid::empty(), 0));
    }
}
