//! CSV ingestion and dumps for point/value matrices.
//!
//! The files are plain comma-separated float matrices with a single header
//! line (e.g. `lon,lat` for coordinates, `pm25` for values).

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SubsampleError};

/// Read a CSV float matrix, skipping the header line.
///
/// Returns the values as a row-major buffer together with the column count.
/// Every data row must have the same number of columns.
pub fn read_csv_matrix(path: impl AsRef<Path>) -> Result<(Vec<f32>, usize)> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut data = Vec::new();
    let mut width = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            // Header line
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut cols = 0;
        for field in trimmed.split(',') {
            let value: f32 = field.trim().parse().map_err(|_| SubsampleError::Csv {
                line: idx + 1,
                message: format!("not a float: '{}'", field.trim()),
            })?;
            data.push(value);
            cols += 1;
        }

        if width == 0 {
            width = cols;
        } else if cols != width {
            return Err(SubsampleError::Csv {
                line: idx + 1,
                message: format!("expected {} columns, got {}", width, cols),
            });
        }
    }

    Ok((data, width))
}

/// Write a row-major float matrix as CSV with the given header line.
pub fn write_csv_matrix(
    path: impl AsRef<Path>,
    header: &str,
    data: &[f32],
    width: usize,
) -> Result<()> {
    debug_assert!(width > 0 && data.len() % width == 0);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", header)?;
    for row in data.chunks(width) {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    writer.flush()?;

    Ok(())
}
