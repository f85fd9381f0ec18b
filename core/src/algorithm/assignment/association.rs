//! Track/detection association
//!
//! The frame-to-frame association step of a tracker: given a finished cost
//! matrix (rows are tracks, columns are detections, or the other way round)
//! and a gating threshold, return the accepted pairs together with the
//! rows and columns left open. Empty inputs are a normal frame, not an error.

use serde::{Serialize, Deserialize};

use crate::algorithm::assignment::config::SolverConfig;
use crate::algorithm::assignment::matrix::{Cost, CostMatrix};
use crate::algorithm::assignment::solver::LapJv;
use crate::algorithm::traits::AssignmentError;

/// Result of one association step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Accepted `(row, col)` pairs in ascending row order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

impl Association {
    fn unmatched(rows: usize, cols: usize) -> Self {
        Self {
            matches: Vec::new(),
            unmatched_rows: (0..rows).collect(),
            unmatched_cols: (0..cols).collect(),
        }
    }
}

/// Associates rows with columns, rejecting pairs costing more than `threshold`.
pub fn linear_assignment(
    data: &[Cost],
    rows: usize,
    cols: usize,
    threshold: Cost,
) -> Result<Association, AssignmentError> {
    let mut solver = LapJv::new();
    associate(&mut solver, data, rows, cols, threshold)
}

/// [`linear_assignment`] reusing `solver`'s scratch.
///
/// The solver's own configuration is left untouched; extension is always
/// on and the limit is `threshold`.
pub fn associate(
    solver: &mut LapJv,
    data: &[Cost],
    rows: usize,
    cols: usize,
    threshold: Cost,
) -> Result<Association, AssignmentError> {
    if rows == 0 || cols == 0 {
        if !data.is_empty() {
            return Err(AssignmentError::DataLength {
                expected: 0,
                actual: data.len(),
            });
        }
        return Ok(Association::unmatched(rows, cols));
    }

    let cost = CostMatrix::new(data, rows, cols)?;
    let gated = SolverConfig {
        extend_cost: true,
        cost_limit: threshold,
        ..solver.config().clone()
    };
    let previous = std::mem::replace(solver.config_mut(), gated);
    let outcome = solver.solve(&cost);
    *solver.config_mut() = previous;
    let assignment = outcome?;

    Ok(Association {
        matches: assignment.pairs().collect(),
        unmatched_rows: assignment.unmatched_rows(),
        unmatched_cols: assignment.unmatched_cols(),
    })
}
