//! Sequential depth-first backtracking.
//!
//! Cells are visited in row-major order and candidates are tried in ascending order,
//! so the same input always produces the same output. The first completion found is
//! kept; it is not necessarily the only one.

use crate::core::models::grid::{Grid, N};
use crate::core::rules::is_safe;

/// Solves `grid` in place starting from the top-left cell.
///
/// Returns `true` with the grid completed, or `false` with the grid unchanged.
pub fn solve(grid: &mut Grid) -> bool {
    solve_from(grid, 0, 0)
}

/// Solves `grid` in place, treating every cell before `(row, col)` as already decided.
///
/// A `col` equal to 9 wraps to the start of the next row and a `row` equal to 9 means
/// the cursor is past the last cell. On failure every tentative assignment has been
/// undone. Recursion depth is bounded by the 81 cells plus one wrap per row.
pub fn solve_from(grid: &mut Grid, row: usize, col: usize) -> bool {
    if row == N {
        return true;
    }
    if col == N {
        return solve_from(grid, row + 1, 0);
    }
    if !grid.is_empty_at(row, col) {
        return solve_from(grid, row, col + 1);
    }

    for num in 1..=N as u8 {
        if is_safe(grid, row, col, num) {
            grid.set(row, col, num);
            if solve_from(grid, row, col + 1) {
                return true;
            }
            grid.clear(row, col);
        }
    }
    false
}
