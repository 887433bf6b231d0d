use super::collection::{GridCollectionFile, is_header};
use super::error::PuzzleSourceError;
use super::plain::PlainGridFile;
use super::traits::PuzzleFile;
use crate::core::models::grid::Grid;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PUZZLE_EXTENSION: &str = "txt";

/// Loads the ordered puzzle set from a file or a directory.
///
/// A file with at least one header line is read as a [`GridCollectionFile`], any
/// other file as a single [`PlainGridFile`]. A directory contributes every `*.txt`
/// file it contains, sorted by file name, each loaded the same way.
///
/// # Errors
///
/// Any unreadable or malformed file aborts the whole load, and an empty result is
/// reported as [`PuzzleSourceError::Empty`]. A partial puzzle set is never returned.
pub fn load_puzzles(path: &Path) -> Result<Vec<Grid>, PuzzleSourceError> {
    let puzzles = if path.is_dir() {
        let files = puzzle_files_in(path)?;
        debug!(count = files.len(), "Found puzzle files in {:?}", path);
        let mut puzzles = Vec::new();
        for file in files {
            puzzles.extend(load_file(&file)?);
        }
        puzzles
    } else {
        load_file(path)?
    };

    if puzzles.is_empty() {
        return Err(PuzzleSourceError::Empty {
            path: path.to_path_buf(),
        });
    }
    info!(count = puzzles.len(), "Loaded puzzles from {:?}", path);
    Ok(puzzles)
}

fn puzzle_files_in(dir: &Path) -> Result<Vec<PathBuf>, PuzzleSourceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == PUZZLE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<Vec<Grid>, PuzzleSourceError> {
    let wrap = |source: PuzzleSourceError| PuzzleSourceError::File {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let content = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let grids = if content.lines().any(is_header) {
        GridCollectionFile::read_from(&mut content.as_bytes())
    } else {
        PlainGridFile::read_from(&mut content.as_bytes())
    };
    grids.map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CLASSIC_32, UNIQUE_30, grid};
    use tempfile::tempdir;

    fn write_plain(path: &Path, text: &str) {
        PlainGridFile::write_to_path(&[grid(text)], path).expect("write plain grid");
    }

    #[test]
    fn loads_a_single_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.txt");
        write_plain(&path, UNIQUE_30);

        let puzzles = load_puzzles(&path).unwrap();
        assert_eq!(puzzles, vec![grid(UNIQUE_30)]);
    }

    #[test]
    fn detects_collection_files_by_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("many.txt");
        GridCollectionFile::write_to_path(&[grid(UNIQUE_30), grid(CLASSIC_32)], &path).unwrap();

        let puzzles = load_puzzles(&path).unwrap();
        assert_eq!(puzzles.len(), 2);
        assert_eq!(puzzles[1], grid(CLASSIC_32));
    }

    #[test]
    fn directory_is_loaded_in_file_name_order_and_skips_other_extensions() {
        let dir = tempdir().unwrap();
        write_plain(&dir.path().join("b.txt"), CLASSIC_32);
        write_plain(&dir.path().join("a.txt"), UNIQUE_30);
        fs::write(dir.path().join("notes.md"), "not a puzzle").unwrap();

        let puzzles = load_puzzles(dir.path()).unwrap();
        assert_eq!(puzzles, vec![grid(UNIQUE_30), grid(CLASSIC_32)]);
    }

    #[test]
    fn malformed_file_aborts_the_whole_directory() {
        let dir = tempdir().unwrap();
        write_plain(&dir.path().join("a.txt"), UNIQUE_30);
        fs::write(dir.path().join("b.txt"), "1 2 3").unwrap();

        let err = load_puzzles(dir.path()).unwrap_err();
        match err {
            PuzzleSourceError::File { path, .. } => assert!(path.ends_with("b.txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_directory_and_missing_path_are_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_puzzles(dir.path()),
            Err(PuzzleSourceError::Empty { .. })
        ));
        assert!(load_puzzles(&dir.path().join("missing.txt")).is_err());
    }
}
