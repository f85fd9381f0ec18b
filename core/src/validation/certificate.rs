//! Optimality certificates
//!
//! Linear programming duality gives a cheap proof that a permutation is
//! optimal: if the potentials are dual feasible and every matched pair is
//! tight, the primal objective equals the dual objective and no other
//! permutation can do better.

use serde::{Serialize, Deserialize};

use crate::algorithm::assignment::jonker_volgenant::DualVariables;
use crate::algorithm::assignment::matrix::Cost;
use crate::algorithm::assignment::normalizer::SquareMatrix;

/// Mathematical optimality certificate for the square problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalityCertificate {
    /// Sum of the matched costs over the square matrix, padding included
    pub primal_objective: Cost,
    /// `Σu + Σv`
    pub dual_objective: Cost,
    pub duality_gap: Cost,
    /// Every matched pair has zero reduced cost
    pub complementary_slackness: bool,
    /// No pair has negative reduced cost
    pub dual_feasible: bool,
    /// Tolerance the two checks above were evaluated with
    pub tolerance: Cost,
    pub dimension: usize,
}

impl OptimalityCertificate {
    pub(crate) fn compute(
        matrix: &SquareMatrix<'_>,
        row_to_col: &[usize],
        duals: &DualVariables,
    ) -> Self {
        let dimension = matrix.dimension();

        let mut scale: Cost = 1.0;
        let mut primal_objective = 0.0;
        for (row, &col) in row_to_col.iter().enumerate() {
            primal_objective += matrix.get(row, col);
        }
        for row in 0..dimension {
            scale = matrix.row(row).iter().fold(scale, |acc, value| acc.max(value.abs()));
        }
        let tolerance = scale * 1e-9;

        let dual_objective = duals.u.iter().sum::<Cost>() + duals.v.iter().sum::<Cost>();

        let mut complementary_slackness = true;
        let mut dual_feasible = true;
        for row in 0..dimension {
            let costs = matrix.row(row);
            for col in 0..dimension {
                let reduced = costs[col] - duals.u[row] - duals.v[col];
                if reduced < -tolerance {
                    dual_feasible = false;
                }
                if row_to_col[row] == col && reduced.abs() > tolerance {
                    complementary_slackness = false;
                }
            }
        }

        Self {
            primal_objective,
            dual_objective,
            duality_gap: (primal_objective - dual_objective).abs(),
            complementary_slackness,
            dual_feasible,
            tolerance,
            dimension,
        }
    }

    /// Both conditions hold and the gap is within one tolerance per row.
    pub fn is_optimal(&self) -> bool {
        let gap_bound = self.tolerance * self.dimension.max(1) as Cost;
        self.complementary_slackness && self.dual_feasible && self.duality_gap <= gap_bound
    }
}
