use crate::core::models::grid::Grid;

/// 30 givens, unique solution.
pub const UNIQUE_30: &str = "
    53..7....
    6..195...
    .98....6.
    8...6...3
    4..8.3..1
    7...2...6
    .6....28.
    ...419..5
    ....8..79";

pub const UNIQUE_30_SOLUTION: &str = "
    534678912
    672195348
    198342567
    859761423
    426853791
    713924856
    961537284
    287419635
    345286179";

/// 32 givens.
pub const CLASSIC_32: &str = "
    3.65.84..
    52.......
    .87....31
    ..3.1..8.
    9..863..5
    .5..9.6..
    13....25.
    .......74
    ..52.63..";

/// `UNIQUE_30` with a second 5 written into the first row.
pub const DUPLICATE_IN_ROW: &str = "
    535.7....
    6..195...
    .98....6.
    8...6...3
    4..8.3..1
    7...2...6
    .6....28.
    ...419..5
    ....8..79";

pub fn grid(text: &str) -> Grid {
    text.parse().expect("fixture grids are well formed")
}

/// Blanks every cell of the unique solution whose row-major index is not a multiple of
/// `keep_every`. The result always has at least one completion.
pub fn thinned_solution(keep_every: usize) -> Grid {
    let solution = grid(UNIQUE_30_SOLUTION);
    let mut puzzle = solution.clone();
    for index in 0..81 {
        if index % keep_every != 0 {
            puzzle.clear(index / 9, index % 9);
        }
    }
    puzzle
}
