//! Exhaustive reference solver
//!
//! Enumerates every injective row→column mapping of a small matrix. Used to
//! cross-check the augmenting-path solver; exponential, so the input size is
//! capped.

use crate::algorithm::assignment::matrix::{Cost, CostMatrix};
use crate::algorithm::traits::AssignmentError;

/// Largest `cols` accepted by [`brute_force_minimum`]
pub const MAX_EXHAUSTIVE_DIMENSION: usize = 10;

/// Minimum total cost over all mappings giving every row a distinct column.
///
/// Requires `rows <= cols <= MAX_EXHAUSTIVE_DIMENSION`. Returns the optimum
/// together with one minimizing mapping, preferring the lexicographically
/// smallest column sequence on ties.
pub fn brute_force_minimum(cost: &CostMatrix<'_>) -> Result<(Cost, Vec<usize>), AssignmentError> {
    if cost.rows() > cost.cols() {
        return Err(AssignmentError::invalid_parameter(
            "rows",
            format!("{} rows exceed {} columns; transpose the matrix", cost.rows(), cost.cols()),
        ));
    }
    if cost.cols() > MAX_EXHAUSTIVE_DIMENSION {
        return Err(AssignmentError::invalid_parameter(
            "cols",
            format!("{} exceeds the exhaustive limit of {}", cost.cols(), MAX_EXHAUSTIVE_DIMENSION),
        ));
    }

    let mut search = Search {
        cost,
        used: vec![false; cost.cols()],
        current: Vec::with_capacity(cost.rows()),
        best_cost: Cost::INFINITY,
        best: Vec::new(),
    };
    search.descend(0, 0.0);

    Ok((search.best_cost, search.best))
}

struct Search<'m, 'a> {
    cost: &'m CostMatrix<'a>,
    used: Vec<bool>,
    current: Vec<usize>,
    best_cost: Cost,
    best: Vec<usize>,
}

impl Search<'_, '_> {
    fn descend(&mut self, row: usize, partial: Cost) {
        if row == self.cost.rows() {
            if partial < self.best_cost {
                self.best_cost = partial;
                self.best = self.current.clone();
            }
            return;
        }

        for col in 0..self.cost.cols() {
            if self.used[col] {
                continue;
            }
            self.used[col] = true;
            self.current.push(col);
            self.descend(row + 1, partial + self.cost.get(row, col));
            self.current.pop();
            self.used[col] = false;
        }
    }
}
