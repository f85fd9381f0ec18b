//! Core trait definitions for the assignment solvers
//!
//! This module establishes the foundational trait system for assignment
//! algorithm implementations: a generic, string-parameterised interface
//! shared by every solver, the error taxonomy reported across the module
//! boundary, and the execution metrics collected per call.
//!
//! # Key Design Principles
//! - Explicit `Result` propagation, never a partial assignment on failure
//! - State isolation between runs
//! - Deterministic behavior for given inputs

use std::collections::TryReserveError;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};

use crate::algorithm::assignment::{Assignment, CostMatrix};

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterType {
    Float,
    Boolean,
    Enum(Vec<String>),
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub allowed_values: Option<Vec<String>>,
}

/// Error types reported by the assignment solvers
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("Invalid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Cost data length mismatch: expected {expected} entries, got {actual}")]
    DataLength { expected: usize, actual: usize },

    #[error("Output buffer `{buffer}` has length {actual}, expected {expected}")]
    BufferLength { buffer: &'static str, expected: usize, actual: usize },

    #[error("Cost matrix is {rows}x{cols}; rectangular input requires extend_cost")]
    NonSquare { rows: usize, cols: usize },

    #[error("Invalid cost {value} at ({row}, {col})")]
    InvalidCost { row: usize, col: usize, value: f64 },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Scratch allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("No augmenting path terminates for row {row}")]
    Infeasible { row: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl AssignmentError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Per-call execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveMetrics {
    /// Side of the square problem actually solved
    pub dimension: usize,
    /// Rows matched by the row-reduction pass before any augmentation
    pub greedy_assignments: usize,
    /// Shortest augmenting paths computed
    pub augmentations: usize,
    /// Columns popped from the shortest-path frontier, summed over all paths
    pub columns_scanned: usize,
    /// Solver pairs dropped by the cost limit
    pub excluded_by_limit: usize,
    pub execution_time: Duration,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub worst_case: String,
}

/// Main assignment algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
/// - Either a complete, injective assignment or an error
pub trait AssignmentAlgorithm: Debug + Send {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's formal description
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AssignmentError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Solves the assignment problem for the given cost matrix
    fn solve(&mut self, cost: &CostMatrix<'_>) -> Result<Assignment, AssignmentError>;
}

/// Metric collection for a single solve
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: SolveMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            metrics: SolveMetrics::default(),
            start_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_dimension(&mut self, dimension: usize) {
        self.metrics.dimension = dimension;
    }

    pub fn record_greedy_assignment(&mut self) {
        self.metrics.greedy_assignments += 1;
    }

    pub fn record_augmentation(&mut self) {
        self.metrics.augmentations += 1;
    }

    pub fn record_column_scan(&mut self) {
        self.metrics.columns_scanned += 1;
    }

    pub fn record_exclusions(&mut self, excluded: usize) {
        self.metrics.excluded_by_limit += excluded;
    }

    pub fn get_metrics(&self) -> SolveMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}
