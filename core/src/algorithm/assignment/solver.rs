//! Jonker-Volgenant solver handle
//!
//! [`LapJv`] owns a configuration and scratch buffers that are reused from
//! one call to the next. A call borrows the handle mutably, so one handle
//! serves one solve at a time; independent handles can run on separate
//! threads. [`solve`] is the stateless entry point with fresh buffers.

use log::{debug, warn};

use crate::algorithm::assignment::config::{DualInitialization, LimitStrategy, SolverConfig};
use crate::algorithm::assignment::extractor::{check_buffer, extract, Assignment};
use crate::algorithm::assignment::jonker_volgenant::{solve_square, Workspace};
use crate::algorithm::assignment::matrix::{Cost, CostMatrix};
use crate::algorithm::assignment::normalizer::normalize;
use crate::algorithm::traits::{
    AlgorithmComplexity, AlgorithmId, AlgorithmParameter, AlgorithmProfiler, AssignmentAlgorithm,
    AssignmentError, ParameterConstraints, ParameterType, SolveMetrics,
};
use crate::validation::certificate::OptimalityCertificate;

/// Solves `cost` under `config` with freshly allocated scratch.
pub fn solve(cost: &CostMatrix<'_>, config: &SolverConfig) -> Result<Assignment, AssignmentError> {
    run(cost, config, &mut Workspace::new())
}

/// Reusable assignment solver
#[derive(Debug, Clone, Default)]
pub struct LapJv {
    config: SolverConfig,
    workspace: Workspace,
    last_metrics: Option<SolveMetrics>,
}

impl LapJv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Pre-sizes scratch for problems up to `dimension`×`dimension`.
    pub fn with_capacity(config: SolverConfig, dimension: usize) -> Result<Self, AssignmentError> {
        Ok(Self {
            config,
            workspace: Workspace::with_capacity(dimension)?,
            last_metrics: None,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Largest square dimension the retained scratch fits without growing
    pub fn capacity(&self) -> usize {
        self.workspace.capacity()
    }

    pub fn last_metrics(&self) -> Option<&SolveMetrics> {
        self.last_metrics.as_ref()
    }

    /// Drops retained scratch; the next call allocates again.
    pub fn release(&mut self) {
        self.workspace.release();
        self.last_metrics = None;
    }

    pub fn solve(&mut self, cost: &CostMatrix<'_>) -> Result<Assignment, AssignmentError> {
        let assignment = run(cost, &self.config, &mut self.workspace)?;
        self.last_metrics = Some(assignment.metrics.clone());
        Ok(assignment)
    }

    /// Solves into caller-owned buffers and returns the total cost.
    ///
    /// `x` must hold `cost.rows()` entries and `y` `cost.cols()`; unmatched
    /// slots receive [`UNASSIGNED`](crate::algorithm::assignment::UNASSIGNED).
    /// Neither buffer is touched when an error is returned.
    pub fn solve_into(
        &mut self,
        cost: &CostMatrix<'_>,
        x: &mut [isize],
        y: &mut [isize],
    ) -> Result<Cost, AssignmentError> {
        check_buffer("x", x.len(), cost.rows())?;
        check_buffer("y", y.len(), cost.cols())?;

        let assignment = self.solve(cost)?;
        assignment.write_into(x, y)
    }
}

fn run(
    cost: &CostMatrix<'_>,
    config: &SolverConfig,
    workspace: &mut Workspace,
) -> Result<Assignment, AssignmentError> {
    config.validate()?;

    let mut profiler = AlgorithmProfiler::new();
    profiler.start();

    let square = normalize(cost, config)?;
    solve_square(&square, config.initialization, workspace, &mut profiler)?;

    let certificate = config
        .verify
        .then(|| OptimalityCertificate::compute(&square, workspace.row_to_col(), workspace.duals()));
    if let Some(certificate) = certificate.as_ref().filter(|certificate| !certificate.is_optimal()) {
        warn!(
            "optimality certificate failed: gap {} (tolerance {})",
            certificate.duality_gap, certificate.tolerance
        );
    }

    let extraction = extract(cost, workspace.row_to_col(), config.cost_limit);
    profiler.record_exclusions(extraction.excluded);
    profiler.stop();
    let metrics = profiler.get_metrics();

    if extraction.excluded > 0 {
        debug!(
            "cost limit {} excluded {} of {} pairs",
            config.cost_limit,
            extraction.excluded,
            cost.rows().min(cost.cols())
        );
    }
    debug!(
        "solved {}x{} assignment as {}x{}: total {} after {} augmentations ({} greedy) in {:?}",
        cost.rows(),
        cost.cols(),
        metrics.dimension,
        metrics.dimension,
        extraction.total_cost,
        metrics.augmentations,
        metrics.greedy_assignments,
        metrics.execution_time
    );

    Ok(Assignment {
        row_to_col: extraction.row_to_col,
        col_to_row: extraction.col_to_row,
        total_cost: extraction.total_cost,
        metrics,
        certificate,
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AssignmentError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AssignmentError::invalid_parameter(
            name,
            format!("{value}. Valid options: true, false"),
        )),
    }
}

impl AssignmentAlgorithm for LapJv {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("lapjv")
    }

    fn name(&self) -> &'static str {
        "Jonker-Volgenant Linear Assignment"
    }

    fn description(&self) -> String {
        "Shortest augmenting path solver for the rectangular linear assignment problem. \
         Maintains row and column potentials, grows the matching one Dijkstra search at a \
         time, pads rectangular input to square and drops pairs above the cost limit."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(n^3)".to_string(),
            space_complexity: "O(n^2)".to_string(),
            best_case: "O(n^2)".to_string(),
            worst_case: "O(n^3)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        let boolean = |name: &str, value: bool| AlgorithmParameter {
            name: name.to_string(),
            value: value.to_string(),
            value_type: ParameterType::Boolean,
            constraints: None,
        };
        let choice = |name: &str, value: String, variants: [&str; 2]| AlgorithmParameter {
            name: name.to_string(),
            value,
            value_type: ParameterType::Enum(variants.iter().map(|v| v.to_string()).collect()),
            constraints: Some(ParameterConstraints {
                min: None,
                max: None,
                allowed_values: Some(variants.iter().map(|v| v.to_string()).collect()),
            }),
        };

        vec![
            boolean("extend_cost", self.config.extend_cost),
            AlgorithmParameter {
                name: "cost_limit".to_string(),
                value: self.config.cost_limit.to_string(),
                value_type: ParameterType::Float,
                constraints: None,
            },
            choice(
                "initialization",
                self.config.initialization.to_string(),
                DualInitialization::VARIANTS,
            ),
            choice(
                "limit_strategy",
                self.config.limit_strategy.to_string(),
                LimitStrategy::VARIANTS,
            ),
            boolean("verify", self.config.verify),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AssignmentError> {
        match name {
            "extend_cost" => self.config.extend_cost = parse_bool(name, value)?,
            "cost_limit" => {
                let limit = match value {
                    "inf" | "+inf" | "none" => Cost::INFINITY,
                    _ => value.parse::<Cost>().map_err(|_| {
                        AssignmentError::invalid_parameter(name, format!("{value} is not a number"))
                    })?,
                };
                let candidate = SolverConfig {
                    cost_limit: limit,
                    ..self.config.clone()
                };
                candidate.validate()?;
                self.config = candidate;
            }
            "initialization" => self.config.initialization = value.parse()?,
            "limit_strategy" => self.config.limit_strategy = value.parse()?,
            "verify" => self.config.verify = parse_bool(name, value)?,
            _ => {
                return Err(AssignmentError::invalid_parameter(
                    name,
                    "unknown parameter. Valid parameters: extend_cost, cost_limit, \
                     initialization, limit_strategy, verify",
                ))
            }
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.value)
    }

    fn solve(&mut self, cost: &CostMatrix<'_>) -> Result<Assignment, AssignmentError> {
        LapJv::solve(self, cost)
    }
}
