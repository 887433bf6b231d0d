pub mod bench;
pub mod branches;
pub mod solve;

use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use gridrace::core::io::collection::GridCollectionFile;
use gridrace::core::io::error::PuzzleSourceError;
use gridrace::core::io::source::load_puzzles;
use gridrace::core::io::traits::PuzzleFile;
use gridrace::core::models::grid::Grid;
use gridrace::engine::progress::ProgressReporter;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

fn load(input: &Path) -> Result<Vec<Grid>> {
    info!("Loading puzzles from {:?}", input);
    let puzzles = load_puzzles(input)?;
    info!("Loaded {} puzzle(s).", puzzles.len());
    Ok(puzzles)
}

fn reporter(handler: &CliProgressHandler) -> ProgressReporter<'static> {
    ProgressReporter::with_callback(handler.get_callback())
}

/// Writes grids in collection format to `output`, or to stdout when no path is given.
fn write_grids(grids: &[Grid], output: Option<&Path>) -> Result<()> {
    let to_cli_error = |path: &Path, source: PuzzleSourceError| CliError::FileWriting {
        path: path.to_path_buf(),
        source,
    };
    match output {
        Some(path) => {
            GridCollectionFile::write_to_path(grids, path).map_err(|e| to_cli_error(path, e))?;
            info!("Wrote {} grid(s) to {:?}", grids.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            GridCollectionFile::write_to(grids, &mut lock)
                .map_err(|e| to_cli_error(Path::new("<stdout>"), e))?;
            lock.flush()?;
        }
    }
    Ok(())
}
