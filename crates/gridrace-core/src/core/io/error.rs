use crate::core::models::grid::GridError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PuzzleSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("Grid {grid} ends after {rows} of 9 rows")]
    IncompleteGrid { grid: usize, rows: usize },

    #[error("No puzzles found in '{path}'", path = path.display())]
    Empty { path: PathBuf },

    #[error("Failed to load '{path}': {source}", path = path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<PuzzleSourceError>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Invalid cell '{token}' (expected 0-9 or '.')")]
    InvalidCell { token: String },

    #[error("Row has {found} cells, expected 9")]
    WrongRowLength { found: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}
