use super::error::{ParseErrorKind, PuzzleSourceError};
use super::traits::PuzzleFile;
use crate::core::models::grid::{EMPTY, Grid};
use std::io::{BufRead, Write};

/// Splits a text line into cell values.
///
/// Every non-whitespace character is one cell, so both `3 0 6 5` and `3.65` are
/// accepted. `.` and `0` both mean empty.
pub(crate) fn parse_cells(line: &str, line_num: usize) -> Result<Vec<u8>, PuzzleSourceError> {
    let mut cells = Vec::new();
    for token in line.split_whitespace() {
        for c in token.chars() {
            let value = match c {
                '.' => EMPTY,
                '0'..='9' => c as u8 - b'0',
                _ => {
                    return Err(PuzzleSourceError::Parse {
                        line: line_num,
                        kind: ParseErrorKind::InvalidCell {
                            token: token.to_string(),
                        },
                    });
                }
            };
            cells.push(value);
        }
    }
    Ok(cells)
}

/// A single puzzle stored as 81 cells spread over any number of lines.
pub struct PlainGridFile;

impl PuzzleFile for PlainGridFile {
    type Error = PuzzleSourceError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Grid>, Self::Error> {
        let mut cells = Vec::new();
        let mut last_line = 0;
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            last_line = line_num + 1;
            cells.extend(parse_cells(&line, last_line)?);
        }
        let grid = Grid::from_cells(&cells).map_err(|e| PuzzleSourceError::Parse {
            line: last_line,
            kind: ParseErrorKind::Grid(e),
        })?;
        Ok(vec![grid])
    }

    fn write_to(grids: &[Grid], writer: &mut impl Write) -> Result<(), Self::Error> {
        for (i, grid) in grids.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            write!(writer, "{}", grid)?;
        }
        Ok(())
    }
}
