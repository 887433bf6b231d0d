//! # gridrace
//!
//! A two-level parallel Sudoku solver.
//!
//! A scheduler hands whole puzzles, or the root branches of a single puzzle, to worker
//! threads one at a time over message channels. Inside each worker a branch racer can
//! fan the first open cell's candidates out over a private thread pool and keep the
//! first completed grid.
//!
//! ## Architecture
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** The `Grid` model, the pure placement rules and the
//!   puzzle file formats.
//!
//! - **[`engine`]: The Logic Core.** Sequential backtracking, the branch racer, the
//!   scheduler and worker agents, configuration, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** `solve`, `branches` and `benchmark` runs built on
//!   the engine.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
