//! Dense cost matrix views
//!
//! The solver never owns caller data: a [`CostMatrix`] borrows a row-major
//! slice for the duration of one call and validates its shape and entries
//! up front, so later stages can index without re-checking.

use crate::algorithm::traits::AssignmentError;

/// Cost value type
pub type Cost = f64;

/// Borrowed, validated, row-major R×C cost matrix
#[derive(Debug, Clone, Copy)]
pub struct CostMatrix<'a> {
    data: &'a [Cost],
    rows: usize,
    cols: usize,
}

impl<'a> CostMatrix<'a> {
    /// Wraps `data` as a `rows`×`cols` matrix.
    ///
    /// Rejects zero dimensions, a slice whose length is not `rows * cols`,
    /// and NaN or infinite entries.
    pub fn new(data: &'a [Cost], rows: usize, cols: usize) -> Result<Self, AssignmentError> {
        if rows == 0 || cols == 0 {
            return Err(AssignmentError::InvalidDimensions { rows, cols });
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(AssignmentError::InvalidDimensions { rows, cols })?;
        if data.len() != expected {
            return Err(AssignmentError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        if let Some(position) = data.iter().position(|value| !value.is_finite()) {
            return Err(AssignmentError::InvalidCost {
                row: position / cols,
                col: position % cols,
                value: data[position],
            });
        }

        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Side of the square problem after extension, `max(rows, cols)`
    #[inline]
    pub fn dimension(&self) -> usize {
        self.rows.max(self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cost {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &'a [Cost] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &'a [Cost] {
        self.data
    }

    /// Largest entry in the matrix
    pub fn max_cost(&self) -> Cost {
        self.data.iter().copied().fold(Cost::NEG_INFINITY, Cost::max)
    }
}

/// Flattens nested rows into a row-major buffer suitable for [`CostMatrix::new`].
///
/// Returns the buffer together with its `(rows, cols)` shape. Ragged input
/// is rejected with [`AssignmentError::DataLength`].
pub fn flatten_rows(nested: &[Vec<Cost>]) -> Result<(Vec<Cost>, usize, usize), AssignmentError> {
    let rows = nested.len();
    let cols = nested.first().map_or(0, Vec::len);

    let mut data = Vec::new();
    data.try_reserve_exact(rows * cols)?;
    for row in nested {
        if row.len() != cols {
            return Err(AssignmentError::DataLength {
                expected: cols,
                actual: row.len(),
            });
        }
        data.extend_from_slice(row);
    }

    Ok((data, rows, cols))
}
