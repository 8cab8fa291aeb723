//! Entropy-density averaging: size the grid from the first event, sum every event into it,
//! divide by the event count and export.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result, Stage};
use crate::grid::Grid;
use crate::text;

/// Determine `(rows, cols)` of a density file. Every row must hold the same number of values.
pub fn measure_grid(path: &Path) -> Result<(usize, usize)> {
    let reader = text::open(Stage::Sizing, path)?;

    let mut widths = Vec::new();
    for line in text::numbered_lines(reader, Stage::Sizing, path) {
        let (line_no, line) = line?;
        widths.push(text::parse_row(Stage::Sizing, path, line_no, &line)?.len());
    }

    let rows = widths.len();
    let mut distinct = widths;
    distinct.sort_unstable();
    distinct.dedup();
    match distinct.as_slice() {
        [] => Err(Error::EmptyGrid {
            path: path.to_path_buf(),
        }),
        [cols] => Ok((rows, *cols)),
        _ => Err(Error::RaggedGrid {
            path: path.to_path_buf(),
            widths: distinct,
        }),
    }
}

/// Add one event's density file into `sum`, cell by cell.
///
/// The file must have exactly the shape of `sum`; nothing is added past a mismatch,
/// and the run is expected to abort on the error.
pub fn accumulate(sum: &mut Grid<f64>, path: &Path, event: u64) -> Result<()> {
    let reader = text::open(Stage::Density, path)?;
    let expected = sum.shape();

    let mut row = 0;
    for line in text::numbered_lines(reader, Stage::Density, path) {
        let (line_no, line) = line?;
        let values = text::parse_row(Stage::Density, path, line_no, &line)?;
        if row >= sum.rows {
            return Err(Error::ShapeMismatch {
                event,
                expected,
                found: format!("more than {} rows", sum.rows),
            });
        }
        if values.len() != sum.cols {
            return Err(Error::ShapeMismatch {
                event,
                expected,
                found: format!("{} values in row {}", values.len(), row + 1),
            });
        }
        for (col, v) in values.into_iter().enumerate() {
            sum.add(row, col, v);
        }
        row += 1;
    }

    if row != sum.rows {
        return Err(Error::ShapeMismatch {
            event,
            expected,
            found: format!("{row} rows"),
        });
    }
    Ok(())
}

/// Turn the running sum into the event average.
pub fn normalize(sum: &mut Grid<f64>, event_count: u64) {
    sum.scale_down(event_count as f64);
}

/// One line per row, each value followed by a single space.
pub fn write_grid<W: Write>(out: &mut W, grid: &Grid<f64>) -> std::io::Result<()> {
    for row in grid.rows_iter() {
        for &v in row {
            write!(out, "{} ", text::format_general(v))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn export(grid: &Grid<f64>, path: &Path) -> Result<()> {
    let mut out = text::create(Stage::DensityExport, path)?;
    write_grid(&mut out, grid)
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(Stage::DensityExport, path, e))
}
