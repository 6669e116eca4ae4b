//! Decision table and the cell matrix every stage passes along.
//!
//! A cell is `Option<f64>`: `None` marks a missing value. Reducers over a
//! matrix skip `None` explicitly, so an absent cell never turns into zero.

use std::collections::HashSet;

use idealrank_common::{IdealRankError, Result};
use serde::Serialize;

/// Dense row-major m×n grid of optional reals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Option<f64>>,
}

impl Matrix {
    /// Build from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(IdealRankError::dimension(cols, row.len(), &format!("row {i} length")));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    /// Convenience for fully-populated tables.
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Present values of column `j`, top to bottom.
    pub fn column_present(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).filter_map(move |i| self.get(i, j))
    }

    /// Every present value in row-major order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// New matrix with `f(column, value)` applied to every present cell.
    pub fn map_present<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let cols = self.cols.max(1);
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(k, cell)| cell.map(|v| f(k % cols, v)))
            .collect();
        Self { rows: self.rows, cols: self.cols, cells }
    }
}

/// Candidates × attributes, as loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTable {
    index_name: String,
    candidates: Vec<String>,
    attributes: Vec<String>,
    values: Matrix,
}

impl DecisionTable {
    /// Candidate identifiers and attribute names must be unique, and the
    /// matrix must be `candidates.len()` × `attributes.len()`.
    ///
    /// A duplicate found here reports the line it would have in a CSV with one
    /// record per line; the loader rejects duplicates earlier with the real line.
    pub fn new(
        index_name: impl Into<String>,
        candidates: Vec<String>,
        attributes: Vec<String>,
        values: Matrix,
    ) -> Result<Self> {
        if values.rows() != candidates.len() {
            return Err(IdealRankError::dimension(candidates.len(), values.rows(), "matrix rows"));
        }
        // a matrix without rows cannot tell its width
        if values.rows() > 0 && values.cols() != attributes.len() {
            return Err(IdealRankError::dimension(attributes.len(), values.cols(), "matrix columns"));
        }

        let mut seen = HashSet::new();
        for (i, candidate) in candidates.iter().enumerate() {
            if !seen.insert(candidate.as_str()) {
                return Err(IdealRankError::DuplicateKey {
                    candidate: candidate.clone(),
                    // header is line 1
                    line: i as u64 + 2,
                });
            }
        }

        let mut seen = HashSet::new();
        for attribute in &attributes {
            if !seen.insert(attribute.as_str()) {
                return Err(IdealRankError::format(1, format!("duplicate attribute name '{attribute}'")));
            }
        }

        let values = if values.rows() == 0 {
            Matrix { rows: 0, cols: attributes.len(), cells: Vec::new() }
        } else {
            values
        };

        Ok(Self { index_name: index_name.into(), candidates, attributes, values })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn values(&self) -> &Matrix {
        &self.values
    }

    /// m
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// n
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0)]]).unwrap_err();
        assert!(matches!(err, IdealRankError::DimensionMismatch(_)));
    }

    #[test]
    fn test_reducers_skip_missing() {
        let m = Matrix::from_rows(vec![
            vec![Some(1.0), None],
            vec![Some(3.0), Some(4.0)],
        ])
        .unwrap();
        assert_eq!(m.present().collect::<Vec<_>>(), vec![1.0, 3.0, 4.0]);
        assert_eq!(m.column_present(1).collect::<Vec<_>>(), vec![4.0]);
        assert_eq!(m.missing_count(), 1);
        assert_eq!(m.row(1), &[Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_map_present_passes_column_and_keeps_gaps() {
        let m = Matrix::from_rows(vec![
            vec![Some(1.0), None, Some(1.0)],
            vec![Some(1.0), Some(1.0), None],
        ])
        .unwrap();
        let scaled = m.map_present(|j, v| v * (j as f64 + 1.0));
        assert_eq!(scaled.row(0), &[Some(1.0), None, Some(3.0)]);
        assert_eq!(scaled.row(1), &[Some(1.0), Some(2.0), None]);
    }

    #[test]
    fn test_duplicate_candidate_is_duplicate_key() {
        let values = Matrix::from_dense(&[vec![1.0], vec![2.0]]).unwrap();
        let err = DecisionTable::new("id", names(&["a", "a"]), names(&["x"]), values).unwrap_err();
        match err {
            IdealRankError::DuplicateKey { candidate, line } => {
                assert_eq!(candidate, "a");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_attribute_is_format_error() {
        let values = Matrix::from_dense(&[vec![1.0, 2.0]]).unwrap();
        let err = DecisionTable::new("id", names(&["a"]), names(&["x", "x"]), values).unwrap_err();
        assert!(matches!(err, IdealRankError::Format { line: 1, .. }));
    }

    #[test]
    fn test_shape_must_agree() {
        let values = Matrix::from_dense(&[vec![1.0, 2.0]]).unwrap();
        let err = DecisionTable::new("id", names(&["a", "b"]), names(&["x", "y"]), values).unwrap_err();
        assert!(matches!(err, IdealRankError::DimensionMismatch(_)));
    }
}
