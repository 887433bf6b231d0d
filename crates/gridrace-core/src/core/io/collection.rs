use super::error::{ParseErrorKind, PuzzleSourceError};
use super::plain::parse_cells;
use super::traits::PuzzleFile;
use crate::core::models::grid::{Grid, N};
use std::io::{BufRead, Write};

const HEADER_MARKERS: [&str; 2] = ["Grid", "Grille"];

pub(crate) fn is_header(line: &str) -> bool {
    HEADER_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Many puzzles in one file, each a header line followed by nine rows.
///
/// ```text
/// Grid 1:
/// 5 3 . . 7 . . . .
/// ...
/// ```
///
/// Lines outside a block are ignored.
pub struct GridCollectionFile;

impl PuzzleFile for GridCollectionFile {
    type Error = PuzzleSourceError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Grid>, Self::Error> {
        let mut grids = Vec::new();
        let mut lines = reader.lines().enumerate();

        while let Some((line_num, line_res)) = lines.next() {
            let line = line_res?;
            if !is_header(&line) {
                continue;
            }

            let mut cells = Vec::with_capacity(N * N);
            let mut last_line = line_num + 1;
            for rows_read in 0..N {
                let Some((row_num, row_res)) = lines.next() else {
                    return Err(PuzzleSourceError::IncompleteGrid {
                        grid: grids.len() + 1,
                        rows: rows_read,
                    });
                };
                let row_line = row_res?;
                last_line = row_num + 1;
                let row = parse_cells(&row_line, last_line)?;
                if row.len() != N {
                    return Err(PuzzleSourceError::Parse {
                        line: last_line,
                        kind: ParseErrorKind::WrongRowLength { found: row.len() },
                    });
                }
                cells.extend(row);
            }

            let grid = Grid::from_cells(&cells).map_err(|e| PuzzleSourceError::Parse {
                line: last_line,
                kind: ParseErrorKind::Grid(e),
            })?;
            grids.push(grid);
        }

        Ok(grids)
    }

    fn write_to(grids: &[Grid], writer: &mut impl Write) -> Result<(), Self::Error> {
        for (i, grid) in grids.iter().enumerate() {
            writeln!(writer, "Grid {}:", i + 1)?;
            for row in grid.rows() {
                let line = row
                    .iter()
                    .map(|&v| if v == 0 { ".".to_string() } else { v.to_string() })
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(writer, "{}", line)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CLASSIC_32, UNIQUE_30, grid};

    const TWO_GRIDS: &str = "\
Grille 1:
5 3 . . 7 . . . .
6 . . 1 9 5 . . .
. 9 8 . . . . 6 .
8 . . . 6 . . . 3
4 . . 8 . 3 . . 1
7 . . . 2 . . . 6
. 6 . . . . 2 8 .
. . . 4 1 9 . . 5
. . . . 8 . . 7 9

Grille 2:
3 . 6 5 . 8 4 . .
5 2 . . . . . . .
. 8 7 . . . . 3 1
. . 3 . 1 . . 8 .
9 . . 8 6 3 . . 5
. 5 . . 9 . 6 . .
1 3 . . . . 2 5 .
. . . . . . . 7 4
. . 5 2 . 6 3 . .
";

    #[test]
    fn reads_every_block_in_order() {
        let grids = GridCollectionFile::read_from(&mut TWO_GRIDS.as_bytes()).unwrap();
        assert_eq!(grids, vec![grid(UNIQUE_30), grid(CLASSIC_32)]);
    }

    #[test]
    fn file_without_headers_yields_no_grids() {
        let grids = GridCollectionFile::read_from(&mut "\n\n1 2 3\n".as_bytes()).unwrap();
        assert!(grids.is_empty());
    }

    #[test]
    fn truncated_block_is_an_error() {
        let truncated: String = TWO_GRIDS.lines().take(16).collect::<Vec<_>>().join("\n");
        let err = GridCollectionFile::read_from(&mut truncated.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PuzzleSourceError::IncompleteGrid { grid: 2, rows: 4 }
        ));
    }

    #[test]
    fn short_row_reports_its_line() {
        let text = TWO_GRIDS.replacen("6 . . 1 9 5 . . .", "6 . . 1 9 5", 1);
        let err = GridCollectionFile::read_from(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PuzzleSourceError::Parse {
                line: 3,
                kind: ParseErrorKind::WrongRowLength { found: 6 }
            }
        ));
    }

    #[test]
    fn written_collection_reads_back() {
        let grids = vec![grid(UNIQUE_30), grid(CLASSIC_32)];
        let mut buffer = Vec::new();
        GridCollectionFile::write_to(&grids, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Grid 1:\n5 3 . . 7"));
        let back = GridCollectionFile::read_from(&mut text.as_bytes()).unwrap();
        assert_eq!(back, grids);
    }
}
