//! Rectangular linear assignment for multi-object tracking
//!
//! Given an R×C cost matrix, finds the row↔column matching of minimum total
//! cost with the Jonker-Volgenant shortest augmenting path algorithm.
//! Rectangular matrices are padded to square on request, and pairs above a
//! cost limit are reported unmatched.
//!
//! ```
//! use lapjv_core::{solve, CostMatrix, SolverConfig};
//!
//! let data = [1.0, 2.0, 2.0, 1.0];
//! let cost = CostMatrix::new(&data, 2, 2)?;
//! let assignment = solve(&cost, &SolverConfig::default())?;
//!
//! assert_eq!(assignment.row_to_col, vec![Some(0), Some(1)]);
//! assert_eq!(assignment.total_cost, 2.0);
//! # Ok::<(), lapjv_core::AssignmentError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod validation;

pub use crate::algorithm::assignment::{
    associate, flatten_rows, linear_assignment, solve, solve_batch, Assignment, Association, Cost,
    CostMatrix, DualInitialization, LapJv, LimitStrategy, SolverConfig, UNASSIGNED,
};
pub use crate::algorithm::traits::{
    AlgorithmComplexity, AlgorithmId, AlgorithmParameter, AssignmentAlgorithm, AssignmentError,
    ParameterType, SolveMetrics,
};
pub use crate::validation::OptimalityCertificate;
