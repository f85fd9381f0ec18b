//! Result extraction
//!
//! Maps the square permutation back into the caller's R×C index space,
//! discarding pairs that touch padded rows or columns and pairs whose cost
//! exceeds the configured limit.

use serde::{Serialize, Deserialize};

use crate::algorithm::assignment::matrix::{Cost, CostMatrix};
use crate::algorithm::traits::{AssignmentError, SolveMetrics};
use crate::validation::certificate::OptimalityCertificate;

/// Sentinel written into caller buffers for an unmatched row or column
pub const UNASSIGNED: isize = -1;

/// Outcome of a successful solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Column matched to each row
    pub row_to_col: Vec<Option<usize>>,
    /// Row matched to each column
    pub col_to_row: Vec<Option<usize>>,
    /// Sum of the costs of all retained pairs
    pub total_cost: Cost,
    pub metrics: SolveMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<OptimalityCertificate>,
}

impl Assignment {
    /// Matched `(row, col)` pairs in ascending row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_to_col
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|col| (row, col)))
    }

    pub fn unmatched_rows(&self) -> Vec<usize> {
        unmatched(&self.row_to_col)
    }

    pub fn unmatched_cols(&self) -> Vec<usize> {
        unmatched(&self.col_to_row)
    }

    pub fn matched_count(&self) -> usize {
        self.row_to_col.iter().flatten().count()
    }

    /// `x`/`y` arrays using [`UNASSIGNED`] for missing partners
    pub fn to_sentinel_arrays(&self) -> (Vec<isize>, Vec<isize>) {
        (to_sentinels(&self.row_to_col), to_sentinels(&self.col_to_row))
    }

    /// Copies the assignment into caller-owned buffers.
    ///
    /// Both lengths are checked before either buffer is written.
    pub fn write_into(&self, x: &mut [isize], y: &mut [isize]) -> Result<Cost, AssignmentError> {
        check_buffer("x", x.len(), self.row_to_col.len())?;
        check_buffer("y", y.len(), self.col_to_row.len())?;

        for (slot, col) in x.iter_mut().zip(&self.row_to_col) {
            *slot = sentinel(*col);
        }
        for (slot, row) in y.iter_mut().zip(&self.col_to_row) {
            *slot = sentinel(*row);
        }
        Ok(self.total_cost)
    }
}

pub(crate) fn check_buffer(buffer: &'static str, actual: usize, expected: usize) -> Result<(), AssignmentError> {
    if actual != expected {
        return Err(AssignmentError::BufferLength {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}

fn unmatched(partners: &[Option<usize>]) -> Vec<usize> {
    partners
        .iter()
        .enumerate()
        .filter(|(_, partner)| partner.is_none())
        .map(|(index, _)| index)
        .collect()
}

#[inline]
fn sentinel(partner: Option<usize>) -> isize {
    partner.map_or(UNASSIGNED, |index| index as isize)
}

fn to_sentinels(partners: &[Option<usize>]) -> Vec<isize> {
    partners.iter().copied().map(sentinel).collect()
}

/// Pairs retained from the square solution
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Extraction {
    pub(crate) row_to_col: Vec<Option<usize>>,
    pub(crate) col_to_row: Vec<Option<usize>>,
    pub(crate) total_cost: Cost,
    /// Real pairs dropped because they cost more than the limit
    pub(crate) excluded: usize,
}

/// Translates `square_row_to_col` back to `cost`'s shape.
pub(crate) fn extract(cost: &CostMatrix<'_>, square_row_to_col: &[usize], cost_limit: Cost) -> Extraction {
    let mut row_to_col = vec![None; cost.rows()];
    let mut col_to_row = vec![None; cost.cols()];
    let mut total_cost = 0.0;
    let mut excluded = 0;

    for (row, &col) in square_row_to_col.iter().enumerate().take(cost.rows()) {
        if col >= cost.cols() {
            continue;
        }
        let value = cost.get(row, col);
        if value > cost_limit {
            excluded += 1;
            continue;
        }
        row_to_col[row] = Some(col);
        col_to_row[col] = Some(row);
        total_cost += value;
    }

    Extraction {
        row_to_col,
        col_to_row,
        total_cost,
        excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(extraction: Extraction) -> Assignment {
        Assignment {
            row_to_col: extraction.row_to_col,
            col_to_row: extraction.col_to_row,
            total_cost: extraction.total_cost,
            metrics: SolveMetrics::default(),
            certificate: None,
        }
    }

    #[test]
    fn test_square_extraction() {
        let data = [1.0, 2.0, 2.0, 1.0];
        let cost = CostMatrix::new(&data, 2, 2).unwrap();
        let extraction = extract(&cost, &[0, 1], Cost::INFINITY);

        assert_eq!(extraction.row_to_col, vec![Some(0), Some(1)]);
        assert_eq!(extraction.col_to_row, vec![Some(0), Some(1)]);
        assert_eq!(extraction.total_cost, 2.0);
        assert_eq!(extraction.excluded, 0);
    }

    #[test]
    fn test_padded_partners_are_dropped() {
        // 2x3 problem solved as 3x3: padded row 2 took column 1.
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let cost = CostMatrix::new(&data, 2, 3).unwrap();
        let extraction = extract(&cost, &[0, 2, 1], Cost::INFINITY);

        assert_eq!(extraction.row_to_col, vec![Some(0), Some(2)]);
        assert_eq!(extraction.col_to_row, vec![Some(0), None, Some(1)]);
        assert_eq!(extraction.total_cost, 7.0);

        // 3x2 problem: row 1 took padded column 2.
        let cost = CostMatrix::new(&data, 3, 2).unwrap();
        let extraction = extract(&cost, &[1, 2, 0], Cost::INFINITY);
        assert_eq!(extraction.row_to_col, vec![Some(1), None, Some(0)]);
        assert_eq!(extraction.col_to_row, vec![Some(2), Some(0)]);
        assert_eq!(extraction.total_cost, 7.0);
    }

    #[test]
    fn test_cost_limit_excludes_pairs() {
        let data = [10.0, 20.0, 20.0, 3.0];
        let cost = CostMatrix::new(&data, 2, 2).unwrap();
        let extraction = extract(&cost, &[0, 1], 5.0);

        assert_eq!(extraction.row_to_col, vec![None, Some(1)]);
        assert_eq!(extraction.col_to_row, vec![None, Some(1)]);
        assert_eq!(extraction.total_cost, 3.0);
        assert_eq!(extraction.excluded, 1);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let data = [5.0];
        let cost = CostMatrix::new(&data, 1, 1).unwrap();
        let extraction = extract(&cost, &[0], 5.0);
        assert_eq!(extraction.row_to_col, vec![Some(0)]);
    }

    #[test]
    fn test_assignment_helpers() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let cost = CostMatrix::new(&data, 2, 3).unwrap();
        let result = assignment(extract(&cost, &[0, 2, 1], Cost::INFINITY));

        assert_eq!(result.pairs().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);
        assert_eq!(result.unmatched_rows(), Vec::<usize>::new());
        assert_eq!(result.unmatched_cols(), vec![1]);
        assert_eq!(result.matched_count(), 2);

        let (x, y) = result.to_sentinel_arrays();
        assert_eq!(x, vec![0, 2]);
        assert_eq!(y, vec![0, UNASSIGNED, 1]);
    }

    #[test]
    fn test_write_into_checks_lengths_first() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let cost = CostMatrix::new(&data, 2, 3).unwrap();
        let result = assignment(extract(&cost, &[0, 2, 1], Cost::INFINITY));

        let mut x = [9; 2];
        let mut y = [9; 2];
        let err = result.write_into(&mut x, &mut y).unwrap_err();
        assert!(matches!(err, AssignmentError::BufferLength { buffer: "y", expected: 3, actual: 2 }));
        assert_eq!(x, [9, 9]);

        let mut y = [9; 3];
        assert_eq!(result.write_into(&mut x, &mut y).unwrap(), 7.0);
        assert_eq!(x, [0, 2]);
        assert_eq!(y, [0, -1, 1]);
    }
}
