use crate::core::models::grid::Grid;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing puzzle file formats.
///
/// Implementors handle format-specific parsing and serialization; the provided
/// methods add file-path convenience on top.
pub trait PuzzleFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every puzzle from a buffered reader, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Grid>, Self::Error>;

    /// Writes the grids to a writer, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(grids: &[Grid], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads every puzzle from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Grid>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the grids to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(grids: &[Grid], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(grids, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
