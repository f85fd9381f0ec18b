//! Matrix normalization
//!
//! Turns an R×C [`CostMatrix`] into the square matrix the augmenting-path
//! solver expects. Square input is borrowed as-is; rectangular input is
//! copied into a padded buffer. The caller's data is never mutated.
//!
//! # Padding
//! Added cells hold a single sentinel strictly greater than every real cost
//! and every finite cost limit. Each complete assignment of the padded
//! matrix uses the same number of padded cells, so the sentinel shifts the
//! objective by a constant and never changes which real pairs are optimal.

use std::borrow::Cow;

use log::trace;

use crate::algorithm::assignment::config::{LimitStrategy, SolverConfig};
use crate::algorithm::assignment::matrix::{Cost, CostMatrix};
use crate::algorithm::traits::AssignmentError;

/// Row-major N×N matrix, borrowed when no extension was needed
#[derive(Debug, Clone)]
pub(crate) struct SquareMatrix<'a> {
    data: Cow<'a, [Cost]>,
    dimension: usize,
}

impl<'a> SquareMatrix<'a> {
    #[inline]
    pub(crate) fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub(crate) fn row(&self, row: usize) -> &[Cost] {
        let start = row * self.dimension;
        &self.data[start..start + self.dimension]
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> Cost {
        self.data[row * self.dimension + col]
    }

    #[cfg(test)]
    pub(crate) fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }
}

/// Produces the square problem for `cost` under `config`.
pub(crate) fn normalize<'a>(
    cost: &CostMatrix<'a>,
    config: &SolverConfig,
) -> Result<SquareMatrix<'a>, AssignmentError> {
    if !cost.is_square() && !config.extend_cost {
        return Err(AssignmentError::NonSquare {
            rows: cost.rows(),
            cols: cost.cols(),
        });
    }

    if config.limit_strategy == LimitStrategy::Augmented && config.has_cost_limit() {
        return augment_with_limit(cost, config.cost_limit);
    }

    if cost.is_square() {
        return Ok(SquareMatrix {
            data: Cow::Borrowed(cost.as_slice()),
            dimension: cost.rows(),
        });
    }

    pad_to_square(cost, padding_value(cost, config.cost_limit))
}

/// Sentinel used for padded cells.
pub(crate) fn padding_value(cost: &CostMatrix<'_>, cost_limit: Cost) -> Cost {
    let mut reference = cost.max_cost();
    if cost_limit.is_finite() {
        reference = reference.max(cost_limit);
    }
    let padded = reference.abs() * 2.0 + 1.0;
    if padded.is_finite() {
        padded
    } else {
        Cost::MAX
    }
}

fn square_buffer(dimension: usize) -> Result<Vec<Cost>, AssignmentError> {
    let cells = dimension
        .checked_mul(dimension)
        .ok_or(AssignmentError::InvalidDimensions {
            rows: dimension,
            cols: dimension,
        })?;
    let mut data = Vec::new();
    data.try_reserve_exact(cells)?;
    Ok(data)
}

fn pad_to_square<'a>(cost: &CostMatrix<'_>, padding: Cost) -> Result<SquareMatrix<'a>, AssignmentError> {
    let dimension = cost.dimension();
    let mut data = square_buffer(dimension)?;

    for row in 0..cost.rows() {
        data.extend_from_slice(cost.row(row));
        data.resize(data.len() + dimension - cost.cols(), padding);
    }
    data.resize(dimension * dimension, padding);

    trace!(
        "padded {}x{} cost matrix to {}x{} with sentinel {}",
        cost.rows(),
        cost.cols(),
        dimension,
        dimension,
        padding
    );

    Ok(SquareMatrix {
        data: Cow::Owned(data),
        dimension,
    })
}

/// (R+C)×(R+C) extension: real block top-left, `limit / 2` in both
/// off-diagonal blocks, zeros bottom-right.
fn augment_with_limit<'a>(cost: &CostMatrix<'_>, cost_limit: Cost) -> Result<SquareMatrix<'a>, AssignmentError> {
    let (rows, cols) = (cost.rows(), cost.cols());
    let dimension = rows + cols;
    let half = cost_limit / 2.0;
    let mut data = square_buffer(dimension)?;

    for row in 0..rows {
        data.extend_from_slice(cost.row(row));
        data.resize(data.len() + rows, half);
    }
    for _ in 0..cols {
        data.resize(data.len() + cols, half);
        data.resize(data.len() + rows, 0.0);
    }

    trace!(
        "extended {}x{} cost matrix to {}x{} around cost limit {}",
        rows,
        cols,
        dimension,
        dimension,
        cost_limit
    );

    Ok(SquareMatrix {
        data: Cow::Owned(data),
        dimension,
    })
}
