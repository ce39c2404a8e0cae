//! Dense square matrix with contiguous row-major storage.

use crate::error::{Error, Result};

/// An `n × n` matrix of `f64` backed by a single contiguous buffer.
///
/// The cost evaluation loop reads this matrix O(n²) times per
/// candidate, so entries are stored row-major in one allocation and
/// accessed through an inlined index computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// Builds a matrix from row vectors.
    ///
    /// Fails with [`Error::Format`] when the rows do not form a square
    /// matrix (ragged row, or row count differing from row length).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::format(format!(
                    "row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            data.extend_from_slice(&row);
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix where every entry is `value`.
    pub fn filled(n: usize, value: f64) -> Self {
        Self {
            n,
            data: vec![value; n * n],
        }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Entry at row `i`, column `j`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Mutable entry at row `i`, column `j`.
    #[inline(always)]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[i * self.n + j]
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
