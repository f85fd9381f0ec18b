//! Solver configuration
//!
//! A typed [`SolverConfig`] that serializes to JSON and doubles as the
//! backing store for the string-keyed parameters exposed through
//! [`AssignmentAlgorithm`](crate::algorithm::traits::AssignmentAlgorithm).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithm::assignment::matrix::Cost;
use crate::algorithm::traits::AssignmentError;

/// Starting point for the dual potentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualInitialization {
    /// `u = v = 0`; every row is augmented from scratch
    Zero,
    /// `u[i]` is the row minimum, then tight columns are claimed greedily
    #[default]
    RowReduction,
}

/// How a finite cost limit takes part in the solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStrategy {
    /// Optimize without the limit, then drop pairs above it
    #[default]
    PostFilter,
    /// Extend to (R+C)×(R+C) so that leaving a row and a column open costs
    /// exactly the limit, letting the optimizer route around expensive pairs
    Augmented,
}

impl DualInitialization {
    pub const VARIANTS: [&'static str; 2] = ["zero", "row_reduction"];
}

impl LimitStrategy {
    pub const VARIANTS: [&'static str; 2] = ["post_filter", "augmented"];
}

impl fmt::Display for DualInitialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("zero"),
            Self::RowReduction => f.write_str("row_reduction"),
        }
    }
}

impl FromStr for DualInitialization {
    type Err = AssignmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "zero" => Ok(Self::Zero),
            "row_reduction" => Ok(Self::RowReduction),
            _ => Err(AssignmentError::invalid_parameter(
                "initialization",
                format!("{value}. Valid options: zero, row_reduction"),
            )),
        }
    }
}

impl fmt::Display for LimitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostFilter => f.write_str("post_filter"),
            Self::Augmented => f.write_str("augmented"),
        }
    }
}

impl FromStr for LimitStrategy {
    type Err = AssignmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "post_filter" => Ok(Self::PostFilter),
            "augmented" => Ok(Self::Augmented),
            _ => Err(AssignmentError::invalid_parameter(
                "limit_strategy",
                format!("{value}. Valid options: post_filter, augmented"),
            )),
        }
    }
}

/// Configuration for a single solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pad rectangular matrices to square instead of rejecting them
    pub extend_cost: bool,

    /// Pairs costing more than this are reported unmatched; `+inf` disables it
    #[serde(with = "unbounded_limit")]
    pub cost_limit: Cost,

    pub initialization: DualInitialization,

    pub limit_strategy: LimitStrategy,

    /// Attach an optimality certificate to every result
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            extend_cost: false,
            cost_limit: Cost::INFINITY,
            initialization: DualInitialization::default(),
            limit_strategy: LimitStrategy::default(),
            verify: false,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extend_cost(mut self, extend_cost: bool) -> Self {
        self.extend_cost = extend_cost;
        self
    }

    pub fn with_cost_limit(mut self, cost_limit: Cost) -> Self {
        self.cost_limit = cost_limit;
        self
    }

    pub fn with_initialization(mut self, initialization: DualInitialization) -> Self {
        self.initialization = initialization;
        self
    }

    pub fn with_limit_strategy(mut self, limit_strategy: LimitStrategy) -> Self {
        self.limit_strategy = limit_strategy;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Parses and validates a JSON configuration; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, AssignmentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, AssignmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), AssignmentError> {
        if self.cost_limit.is_nan() {
            return Err(AssignmentError::invalid_parameter("cost_limit", "must not be NaN"));
        }
        if self.cost_limit == Cost::NEG_INFINITY {
            return Err(AssignmentError::invalid_parameter(
                "cost_limit",
                "must be a finite number or +inf",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn has_cost_limit(&self) -> bool {
        self.cost_limit.is_finite()
    }
}

/// JSON has no infinity; an unbounded limit travels as `null`.
mod unbounded_limit {
    use super::*;

    pub fn serialize<S: Serializer>(limit: &Cost, serializer: S) -> Result<S::Ok, S::Error> {
        if limit.is_finite() {
            serializer.serialize_some(limit)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cost, D::Error> {
        Ok(Option::<Cost>::deserialize(deserializer)?.unwrap_or(Cost::INFINITY))
    }
}
