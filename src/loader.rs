//! Delimited-text matrix loading.
//!
//! Instance files are headerless CSV: `n` rows of `n` non-negative
//! numeric fields. Unreadable sources surface as [`Error::Io`],
//! malformed content as [`Error::Format`]; both are fatal for the
//! run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{CostModel, SquareMatrix};

/// Reads an `n × n` matrix from a headerless delimited file.
pub fn read_matrix(path: &Path, n: usize) -> Result<SquareMatrix> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| match err.into_kind() {
            csv::ErrorKind::Io(source) => Error::Io {
                path: path.to_path_buf(),
                source,
            },
            other => Error::format(format!("row {index}: {other:?}")),
        })?;

        if record.len() != n {
            return Err(Error::format(format!(
                "row {index} has {} fields, expected {n}",
                record.len()
            )));
        }

        let mut row = Vec::with_capacity(n);
        for (column, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| {
                Error::format(format!(
                    "row {index}, column {column}: '{field}' is not a number"
                ))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::format(format!(
                    "row {index}, column {column}: entries must be finite and non-negative, got {value}"
                )));
            }
            row.push(value);
        }
        rows.push(row);
    }

    if rows.len() != n {
        return Err(Error::format(format!(
            "expected {n} rows, found {}",
            rows.len()
        )));
    }

    SquareMatrix::from_rows(rows)
}

/// Loads distance and flow matrices and assembles a validated
/// [`CostModel`].
pub fn read_model(distance_path: &Path, flow_path: &Path, n: usize, alpha: f64) -> Result<CostModel> {
    let distance = read_matrix(distance_path, n)?;
    let flow = read_matrix(flow_path, n)?;
    CostModel::new(distance, flow, alpha)
}
