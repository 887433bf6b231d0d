//! Puzzle sources: reading grids from files and directories, and writing them back.
//!
//! Two text formats are supported. [`plain::PlainGridFile`] holds one puzzle as 81
//! whitespace-separated cells. [`collection::GridCollectionFile`] holds many puzzles,
//! each introduced by a `Grid <n>:` (or `Grille <n>:`) header line. [`source::load_puzzles`]
//! picks the right one and also accepts a directory of `.txt` files.

pub mod collection;
pub mod error;
pub mod plain;
pub mod source;
pub mod traits;
