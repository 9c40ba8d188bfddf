//! Row-sparse feature matrices.
//!
//! TF-IDF rows are mostly zeros, so each row stores only its non-zero
//! `(column, value)` pairs in ascending column order.
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use ndarray::{Array1, Array2};

use crate::ScoringError;

/// Non-zero entries of one feature row, sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    entries: Vec<(usize, f64)>,
}

impl SparseRow {
    /// Build a row from entries already sorted by unique column.
    pub(crate) const fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    /// Non-zero entries in column order.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Value stored at `column`, or zero.
    #[must_use]
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(col, _)| col)
            .ok()
            .and_then(|position| self.entries.get(position))
            .map_or(0.0, |&(_, value)| value)
    }

    /// Number of stored entries.
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product with another sparse row.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "dot products accumulate floating-point products"
    )]
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut left, mut right) = (0, 0);
        let mut total = 0.0;
        while let (Some(&(lcol, lval)), Some(&(rcol, rval))) =
            (self.entries.get(left), other.entries.get(right))
        {
            match lcol.cmp(&rcol) {
                Ordering::Less => left += 1,
                Ordering::Greater => right += 1,
                Ordering::Equal => {
                    total += lval * rval;
                    left += 1;
                    right += 1;
                }
            }
        }
        total
    }

    /// Dot product with a dense vector; columns past its end count as zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "dot products accumulate floating-point products"
    )]
    pub fn dot_dense(&self, dense: &Array1<f64>) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(col, value)| dense.get(col).map(|weight| value * weight))
            .sum()
    }
}

/// A matrix of [`SparseRow`]s with a fixed column count.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: usize,
    rows: Vec<SparseRow>,
}

impl FeatureMatrix {
    pub(crate) const fn from_sparse_rows(columns: usize, rows: Vec<SparseRow>) -> Self {
        Self { columns, rows }
    }

    /// Build a matrix from dense rows, dropping zero entries.
    ///
    /// # Errors
    /// Returns [`ScoringError::RaggedMatrix`] when a row's length differs
    /// from `columns`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefscore_scorer::FeatureMatrix;
    ///
    /// # fn main() -> Result<(), prefscore_scorer::ScoringError> {
    /// let matrix = FeatureMatrix::from_dense(2, &[vec![1.0, 0.0], vec![0.0, 3.0]])?;
    /// assert_eq!(matrix.value(1, 1), 3.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_dense(columns: usize, rows: &[Vec<f64>]) -> Result<Self, ScoringError> {
        let sparse = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                if values.len() != columns {
                    return Err(ScoringError::RaggedMatrix {
                        row,
                        expected: columns,
                        found: values.len(),
                    });
                }
                let entries = values
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|&(_, value)| value != 0.0)
                    .collect();
                Ok(SparseRow::from_sorted(entries))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_sparse_rows(columns, sparse))
    }

    /// Number of rows.
    #[must_use]
    pub const fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub const fn n_columns(&self) -> usize {
        self.columns
    }

    /// Report whether the matrix has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, if present.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&SparseRow> {
        self.rows.get(index)
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &SparseRow> {
        self.rows.iter()
    }

    /// Value at `(row, column)`; zero when absent or out of range.
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.rows.get(row).map_or(0.0, |entries| entries.get(column))
    }

    /// Materialise the matrix as a dense array.
    #[must_use]
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.rows.len(), self.columns));
        for (index, row) in self.rows.iter().enumerate() {
            for &(col, value) in row.entries() {
                if let Some(cell) = dense.get_mut((index, col)) {
                    *cell = value;
                }
            }
        }
        dense
    }
}
