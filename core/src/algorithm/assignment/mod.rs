//! Rectangular linear assignment with the Jonker-Volgenant algorithm
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>
//!
//! Three stages run in sequence for every call:
//!
//! 1. [`normalizer`] pads an R×C matrix to square when extension is enabled
//! 2. [`jonker_volgenant`] finds the optimal permutation by shortest
//!    augmenting paths over reduced costs
//! 3. [`extractor`] maps the permutation back to R×C and applies the cost
//!    limit

pub mod association;
pub mod batch;
pub mod config;
pub mod extractor;
pub(crate) mod jonker_volgenant;
pub mod matrix;
pub(crate) mod normalizer;
pub mod solver;

pub use self::association::{associate, linear_assignment, Association};
pub use self::batch::solve_batch;
pub use self::config::{DualInitialization, LimitStrategy, SolverConfig};
pub use self::extractor::{Assignment, UNASSIGNED};
pub use self::matrix::{flatten_rows, Cost, CostMatrix};
pub use self::solver::{solve, LapJv};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::exhaustive::brute_force_minimum;
    use proptest::prelude::*;

    fn square_matrix(max_dimension: usize) -> impl Strategy<Value = (Vec<Cost>, usize)> {
        (1..=max_dimension).prop_flat_map(|n| {
            (prop::collection::vec((0u32..100).prop_map(Cost::from), n * n), Just(n))
        })
    }

    fn wide_matrix(max_dimension: usize) -> impl Strategy<Value = (Vec<Cost>, usize, usize)> {
        (1..=max_dimension)
            .prop_flat_map(move |cols| (1..=cols, Just(cols)))
            .prop_flat_map(|(rows, cols)| {
                (
                    prop::collection::vec((-50i32..50).prop_map(Cost::from), rows * cols),
                    Just(rows),
                    Just(cols),
                )
            })
    }

    fn assert_bijection(assignment: &Assignment) {
        for (row, col) in assignment.row_to_col.iter().enumerate() {
            if let Some(col) = col {
                assert_eq!(assignment.col_to_row[*col], Some(row));
            }
        }
        for (col, row) in assignment.col_to_row.iter().enumerate() {
            if let Some(row) = row {
                assert_eq!(assignment.row_to_col[*row], Some(col));
            }
        }
    }

    #[test]
    fn test_two_by_two_scenario() {
        let data = [1.0, 2.0, 2.0, 1.0];
        let cost = CostMatrix::new(&data, 2, 2).unwrap();
        let result = solve(&cost, &SolverConfig::default()).unwrap();

        let (x, y) = result.to_sentinel_arrays();
        assert_eq!(x, vec![0, 1]);
        assert_eq!(y, vec![0, 1]);
        assert_eq!(result.total_cost, 2.0);
    }

    #[test]
    fn test_nested_input() {
        let nested = vec![vec![8.0, 4.0, 7.0], vec![5.0, 2.0, 3.0], vec![9.0, 4.0, 8.0]];
        let (data, rows, cols) = flatten_rows(&nested).unwrap();
        let cost = CostMatrix::new(&data, rows, cols).unwrap();
        let result = solve(&cost, &SolverConfig::default()).unwrap();

        assert_eq!(result.total_cost, 15.0);
        assert_eq!(result.row_to_col, vec![Some(0), Some(2), Some(1)]);
    }

    proptest! {
        #[test]
        fn prop_square_optimality((data, n) in square_matrix(7)) {
            let cost = CostMatrix::new(&data, n, n).unwrap();
            let (optimum, _) = brute_force_minimum(&cost).unwrap();

            for initialization in [DualInitialization::Zero, DualInitialization::RowReduction] {
                let config = SolverConfig::new().with_initialization(initialization).with_verify(true);
                let result = solve(&cost, &config).unwrap();

                prop_assert_eq!(result.total_cost, optimum);
                prop_assert_eq!(result.matched_count(), n);
                prop_assert!(result.certificate.as_ref().map_or(false, |c| c.is_optimal()));
                assert_bijection(&result);
            }
        }

        #[test]
        fn prop_wide_coverage_and_optimality((data, rows, cols) in wide_matrix(7)) {
            let cost = CostMatrix::new(&data, rows, cols).unwrap();
            let result = solve(&cost, &SolverConfig::new().with_extend_cost(true)).unwrap();
            let (optimum, _) = brute_force_minimum(&cost).unwrap();

            prop_assert!(result.row_to_col.iter().all(Option::is_some));
            prop_assert_eq!(result.unmatched_cols().len(), cols - rows);
            prop_assert_eq!(result.total_cost, optimum);
            assert_bijection(&result);
        }

        #[test]
        fn prop_tall_matches_transposed((data, rows, cols) in wide_matrix(6)) {
            // Transpose the wide matrix and check the tall solve agrees.
            let mut transposed = vec![0.0; data.len()];
            for row in 0..rows {
                for col in 0..cols {
                    transposed[col * rows + row] = data[row * cols + col];
                }
            }
            let wide = CostMatrix::new(&data, rows, cols).unwrap();
            let tall = CostMatrix::new(&transposed, cols, rows).unwrap();
            let config = SolverConfig::new().with_extend_cost(true);

            let wide_result = solve(&wide, &config).unwrap();
            let tall_result = solve(&tall, &config).unwrap();

            prop_assert_eq!(tall_result.total_cost, wide_result.total_cost);
            prop_assert_eq!(tall_result.matched_count(), rows);
            prop_assert_eq!(tall_result.unmatched_rows().len(), cols - rows);
            assert_bijection(&tall_result);
        }

        #[test]
        fn prop_cost_limit_never_exceeded((data, n) in square_matrix(6), limit in 0u32..100) {
            let cost = CostMatrix::new(&data, n, n).unwrap();
            let limit = Cost::from(limit);

            for strategy in [LimitStrategy::PostFilter, LimitStrategy::Augmented] {
                let config = SolverConfig::new().with_cost_limit(limit).with_limit_strategy(strategy);
                let result = solve(&cost, &config).unwrap();

                for (row, col) in result.pairs() {
                    prop_assert!(cost.get(row, col) <= limit);
                }
                let expected: Cost = result.pairs().map(|(row, col)| cost.get(row, col)).sum();
                prop_assert_eq!(result.total_cost, expected);
                assert_bijection(&result);
            }
        }

        #[test]
        fn prop_deterministic((data, n) in square_matrix(8)) {
            let cost = CostMatrix::new(&data, n, n).unwrap();
            let mut solver = LapJv::new();

            let first = solver.solve(&cost).unwrap();
            let second = solver.solve(&cost).unwrap();
            let fresh = solve(&cost, &SolverConfig::default()).unwrap();

            prop_assert_eq!(&first.row_to_col, &second.row_to_col);
            prop_assert_eq!(&first.row_to_col, &fresh.row_to_col);
            prop_assert_eq!(first.total_cost, second.total_cost);
        }
    }
}
