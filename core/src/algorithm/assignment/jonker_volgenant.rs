//! Jonker-Volgenant shortest augmenting path solver
//!
//! Solves the square assignment problem by successive shortest paths over
//! reduced costs, keeping row potentials `u` and column potentials `v` such
//! that
//!
//! - `cost[i][j] - u[i] - v[j] >= 0` for every pair, and
//! - `cost[i][j] - u[i] - v[j] == 0` for every matched pair.
//!
//! # Mathematical Foundations
//! Each free row starts a Dijkstra search over columns. A matched column is
//! traversed back to its owning row at zero reduced cost, so a path
//! alternates between unmatched and matched edges and ends at the first free
//! column popped from the frontier. Shifting the potentials by the path
//! slack keeps both conditions above, and flipping the path grows the
//! matching by one. N searches of O(N²) each give O(N³) overall.

use log::trace;

use crate::algorithm::assignment::config::DualInitialization;
use crate::algorithm::assignment::matrix::Cost;
use crate::algorithm::assignment::normalizer::SquareMatrix;
use crate::algorithm::traits::{AlgorithmProfiler, AssignmentError};

/// Index sentinel for an unmatched row or column
pub(crate) const UNMATCHED: usize = usize::MAX;

/// Row and column potentials
#[derive(Debug, Clone, Default)]
pub(crate) struct DualVariables {
    pub(crate) u: Vec<Cost>,
    pub(crate) v: Vec<Cost>,
}

/// Scratch for one augmenting-path search
#[derive(Debug, Clone, Default)]
struct ShortestPathState {
    distance: Vec<Cost>,
    visited: Vec<bool>,
    predecessor: Vec<usize>,
    /// Columns in the order they were popped
    scanned: Vec<usize>,
}

impl ShortestPathState {
    fn reset(&mut self) {
        self.distance.fill(Cost::INFINITY);
        self.visited.fill(false);
        self.predecessor.fill(UNMATCHED);
        self.scanned.clear();
    }
}

/// Reusable buffers sized to the largest problem seen so far
#[derive(Debug, Clone, Default)]
pub(crate) struct Workspace {
    duals: DualVariables,
    path: ShortestPathState,
    row_to_col: Vec<usize>,
    col_to_row: Vec<usize>,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(dimension: usize) -> Result<Self, AssignmentError> {
        let mut workspace = Self::new();
        workspace.reserve(dimension)?;
        Ok(workspace)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.row_to_col.capacity()
    }

    pub(crate) fn release(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn row_to_col(&self) -> &[usize] {
        &self.row_to_col
    }

    #[cfg(test)]
    pub(crate) fn col_to_row(&self) -> &[usize] {
        &self.col_to_row
    }

    pub(crate) fn duals(&self) -> &DualVariables {
        &self.duals
    }

    fn reserve(&mut self, dimension: usize) -> Result<(), AssignmentError> {
        fn grow<T>(buffer: &mut Vec<T>, dimension: usize) -> Result<(), AssignmentError> {
            buffer.clear();
            buffer.try_reserve_exact(dimension)?;
            Ok(())
        }

        grow(&mut self.duals.u, dimension)?;
        grow(&mut self.duals.v, dimension)?;
        grow(&mut self.path.distance, dimension)?;
        grow(&mut self.path.visited, dimension)?;
        grow(&mut self.path.predecessor, dimension)?;
        grow(&mut self.path.scanned, dimension)?;
        grow(&mut self.row_to_col, dimension)?;
        grow(&mut self.col_to_row, dimension)?;
        Ok(())
    }

    /// Sizes every buffer to `dimension` and clears all state.
    fn prepare(&mut self, dimension: usize) -> Result<(), AssignmentError> {
        self.reserve(dimension)?;
        self.duals.u.resize(dimension, 0.0);
        self.duals.v.resize(dimension, 0.0);
        self.path.distance.resize(dimension, Cost::INFINITY);
        self.path.visited.resize(dimension, false);
        self.path.predecessor.resize(dimension, UNMATCHED);
        self.row_to_col.resize(dimension, UNMATCHED);
        self.col_to_row.resize(dimension, UNMATCHED);
        Ok(())
    }
}

/// Solves `matrix`, leaving the permutation and potentials in `workspace`.
pub(crate) fn solve_square(
    matrix: &SquareMatrix<'_>,
    initialization: DualInitialization,
    workspace: &mut Workspace,
    profiler: &mut AlgorithmProfiler,
) -> Result<(), AssignmentError> {
    let dimension = matrix.dimension();
    workspace.prepare(dimension)?;
    profiler.record_dimension(dimension);

    if initialization == DualInitialization::RowReduction {
        reduce_rows(matrix, workspace, profiler);
    }

    for row in 0..dimension {
        if workspace.row_to_col[row] == UNMATCHED {
            augment(matrix, row, workspace, profiler)?;
        }
    }

    Ok(())
}

/// `u[i] = min_j cost[i][j]`, then each row claims its lowest-index tight
/// column if that column is still free.
fn reduce_rows(matrix: &SquareMatrix<'_>, workspace: &mut Workspace, profiler: &mut AlgorithmProfiler) {
    for row in 0..matrix.dimension() {
        let costs = matrix.row(row);
        let minimum = costs.iter().copied().fold(Cost::INFINITY, Cost::min);
        workspace.duals.u[row] = minimum;

        let tight = costs
            .iter()
            .enumerate()
            .find(|&(col, &value)| value == minimum && workspace.col_to_row[col] == UNMATCHED)
            .map(|(col, _)| col);

        if let Some(col) = tight {
            workspace.row_to_col[row] = col;
            workspace.col_to_row[col] = row;
            profiler.record_greedy_assignment();
        }
    }
}

/// Grows the matching by one, starting from `free_row`.
fn augment(
    matrix: &SquareMatrix<'_>,
    free_row: usize,
    workspace: &mut Workspace,
    profiler: &mut AlgorithmProfiler,
) -> Result<(), AssignmentError> {
    let dimension = matrix.dimension();
    let Workspace {
        duals,
        path,
        row_to_col,
        col_to_row,
    } = workspace;

    path.reset();

    let mut row = free_row;
    let mut shortest: Cost = 0.0;
    let sink = loop {
        let costs = matrix.row(row);
        let u_row = duals.u[row];
        let mut lowest = Cost::INFINITY;
        let mut next = UNMATCHED;

        // Ascending scan with a strict comparison: ties go to the lowest column.
        for col in 0..dimension {
            if path.visited[col] {
                continue;
            }
            let candidate = shortest + costs[col] - u_row - duals.v[col];
            if candidate < path.distance[col] {
                path.distance[col] = candidate;
                path.predecessor[col] = row;
            }
            if path.distance[col] < lowest {
                lowest = path.distance[col];
                next = col;
            }
        }

        if next == UNMATCHED || !lowest.is_finite() {
            return Err(AssignmentError::Infeasible { row: free_row });
        }

        shortest = lowest;
        path.visited[next] = true;
        path.scanned.push(next);
        profiler.record_column_scan();

        match col_to_row[next] {
            UNMATCHED => break next,
            owner => row = owner,
        }
    };

    // Potentials first: the owners below are the pre-augmentation matching.
    duals.u[free_row] += shortest;
    for &col in &path.scanned {
        if col == sink {
            continue;
        }
        let slack = shortest - path.distance[col];
        duals.u[col_to_row[col]] += slack;
        duals.v[col] -= slack;
    }

    let mut col = sink;
    loop {
        let row = path.predecessor[col];
        col_to_row[col] = row;
        let previous = std::mem::replace(&mut row_to_col[row], col);
        if row == free_row {
            break;
        }
        col = previous;
    }

    profiler.record_augmentation();
    trace!(
        "augmented row {} to column {} after scanning {} columns (slack {})",
        free_row,
        row_to_col[free_row],
        path.scanned.len(),
        shortest
    );

    Ok(())
}
