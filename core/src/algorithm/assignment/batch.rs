//! Parallel solving of independent matrices
//!
//! A tracker with several cameras or object classes produces one cost
//! matrix per group each frame. The matrices share nothing, so each rayon
//! worker gets its own [`LapJv`] handle and reuses its scratch across the
//! matrices it picks up. The solver itself stays single-threaded.

use rayon::prelude::*;

use crate::algorithm::assignment::config::SolverConfig;
use crate::algorithm::assignment::extractor::Assignment;
use crate::algorithm::assignment::matrix::CostMatrix;
use crate::algorithm::assignment::solver::LapJv;
use crate::algorithm::traits::AssignmentError;

/// Solves every matrix under `config`; results keep the input order.
pub fn solve_batch(
    matrices: &[CostMatrix<'_>],
    config: &SolverConfig,
) -> Vec<Result<Assignment, AssignmentError>> {
    matrices
        .par_iter()
        .map_init(
            || LapJv::with_config(config.clone()),
            |solver, matrix| solver.solve(matrix),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::assignment::matrix::Cost;
    use crate::algorithm::assignment::solver::solve;

    fn pseudo_random_matrix(seed: u64, rows: usize, cols: usize) -> Vec<Cost> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (0..rows * cols)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 1000) as Cost / 10.0
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let shapes = [(4, 4), (3, 7), (9, 5), (12, 12), (1, 6), (6, 1)];
        let buffers: Vec<_> = shapes
            .iter()
            .enumerate()
            .map(|(seed, &(rows, cols))| (pseudo_random_matrix(seed as u64, rows, cols), rows, cols))
            .collect();
        let matrices: Vec<_> = buffers
            .iter()
            .map(|(data, rows, cols)| CostMatrix::new(data, *rows, *cols).unwrap())
            .collect();
        let config = SolverConfig::new().with_extend_cost(true);

        let parallel = solve_batch(&matrices, &config);
        assert_eq!(parallel.len(), matrices.len());

        for (matrix, result) in matrices.iter().zip(parallel) {
            let batched = result.unwrap();
            let sequential = solve(matrix, &config).unwrap();
            assert_eq!(batched.row_to_col, sequential.row_to_col);
            assert_eq!(batched.col_to_row, sequential.col_to_row);
            assert_eq!(batched.total_cost, sequential.total_cost);
        }
    }

    #[test]
    fn test_batch_reports_errors_per_matrix() {
        let square = [1.0, 2.0, 2.0, 1.0];
        let wide = [1.0, 2.0, 3.0];
        let matrices = [
            CostMatrix::new(&square, 2, 2).unwrap(),
            CostMatrix::new(&wide, 1, 3).unwrap(),
        ];

        let results = solve_batch(&matrices, &SolverConfig::default());
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AssignmentError::NonSquare { rows: 1, cols: 3 })));
    }
}
