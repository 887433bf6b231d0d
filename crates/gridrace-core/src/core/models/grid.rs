use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side length of the grid.
pub const N: usize = 9;
/// Side length of one box.
pub const BOX: usize = 3;
/// Total number of cells in a grid.
pub const CELL_COUNT: usize = N * N;
/// The value stored in an empty cell.
pub const EMPTY: u8 = 0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error("Cell ({row}, {col}) holds {value}, expected a value in 0..={max}", max = N)]
    InvalidValue { row: usize, col: usize, value: u8 },

    #[error("Expected {expected} cells, found {found}", expected = CELL_COUNT)]
    WrongCellCount { found: usize },

    #[error("Invalid cell character '{0}'")]
    InvalidCharacter(char),
}

/// A 9x9 puzzle grid where `0` marks an empty cell.
///
/// `Clone` but not `Copy`, so every copy taken by a search branch is visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; N]; N],
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid from its rows.
    ///
    /// # Arguments
    ///
    /// * `rows` - The cell values in row-major order, `0` meaning empty.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidValue`] if any cell holds a value greater than 9.
    pub fn from_rows(rows: [[u8; N]; N]) -> Result<Self, GridError> {
        for (row, col) in iproduct!(0..N, 0..N) {
            let value = rows[row][col];
            if value as usize > N {
                return Err(GridError::InvalidValue { row, col, value });
            }
        }
        Ok(Self { cells: rows })
    }

    /// Builds a grid from a flat slice of exactly 81 cell values.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::WrongCellCount`] if the slice length is not 81, or
    /// [`GridError::InvalidValue`] for an out-of-range value.
    pub fn from_cells(cells: &[u8]) -> Result<Self, GridError> {
        if cells.len() != CELL_COUNT {
            return Err(GridError::WrongCellCount { found: cells.len() });
        }
        let mut rows = [[EMPTY; N]; N];
        for (i, &value) in cells.iter().enumerate() {
            rows[i / N][i % N] = value;
        }
        Self::from_rows(rows)
    }

    /// Returns the value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Writes `value` into `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(value as usize <= N);
        self.cells[row][col] = value;
    }

    /// Resets `(row, col)` to empty.
    #[inline]
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = EMPTY;
    }

    #[inline]
    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == EMPTY
    }

    /// Returns a copy of this grid with `value` written into `(row, col)`.
    ///
    /// This is how root branches are forked: the source grid is left untouched.
    pub fn with_value(&self, row: usize, col: usize, value: u8) -> Self {
        let mut branch = self.clone();
        branch.set(row, col, value);
        branch
    }

    /// Finds the first empty cell in row-major order.
    ///
    /// # Return
    ///
    /// Returns `Some((row, col))` of the first empty cell, or `None` if the grid is full.
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        iproduct!(0..N, 0..N).find(|&(row, col)| self.is_empty_at(row, col))
    }

    /// Counts the pre-filled cells.
    pub fn clue_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != EMPTY).count()
    }

    /// Returns `true` when no cell is empty. Says nothing about validity.
    pub fn is_filled(&self) -> bool {
        self.first_empty().is_none()
    }

    pub fn rows(&self) -> &[[u8; N]; N] {
        &self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the compact 81-character form (`.` or `0` for empty); whitespace is ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' => Ok(EMPTY),
                '0'..='9' => Ok(c as u8 - b'0'),
                other => Err(GridError::InvalidCharacter(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str = "
        53..7....
        6..195...
        .98....6.
        8...6...3
        4..8.3..1
        7...2...6
        .6....28.
        ...419..5
        ....8..79";

    #[test]
    fn from_str_parses_compact_rows() {
        let grid: Grid = PUZZLE.parse().unwrap();
        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(0, 2), EMPTY);
        assert_eq!(grid.get(8, 8), 9);
        assert_eq!(grid.clue_count(), 30);
    }

    #[test]
    fn from_str_rejects_wrong_length_and_bad_characters() {
        assert_eq!(
            "123".parse::<Grid>(),
            Err(GridError::WrongCellCount { found: 3 })
        );
        let bad = format!("x{}", ".".repeat(80));
        assert_eq!(bad.parse::<Grid>(), Err(GridError::InvalidCharacter('x')));
    }

    #[test]
    fn from_rows_rejects_out_of_range_values() {
        let mut rows = [[0u8; N]; N];
        rows[4][7] = 10;
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridError::InvalidValue {
                row: 4,
                col: 7,
                value: 10
            })
        );
    }

    #[test]
    fn first_empty_scans_in_row_major_order() {
        let grid: Grid = PUZZLE.parse().unwrap();
        assert_eq!(grid.first_empty(), Some((0, 2)));
        assert_eq!(Grid::empty().first_empty(), Some((0, 0)));
    }

    #[test]
    fn with_value_leaves_the_source_untouched() {
        let grid = Grid::empty();
        let branch = grid.with_value(0, 0, 4);
        assert_eq!(branch.get(0, 0), 4);
        assert!(grid.is_empty_at(0, 0));
    }

    #[test]
    fn display_writes_space_separated_rows() {
        let grid: Grid = PUZZLE.parse().unwrap();
        let text = grid.to_string();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "5 3 0 0 7 0 0 0 0");
        assert_eq!(text.lines().count(), N);
    }
}
