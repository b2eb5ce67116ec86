//! Sparse matrix in coordinate form.

use super::{MatrixLike, NameMap};
use crate::error::{ComparisonError, Result};
use std::collections::BTreeMap;

/// A sparse matrix storing only explicitly set entries.
///
/// Entries are keyed by `(col, row)` so that iteration over the stored
/// entries follows column-major order. Unset entries read as `T::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), T>,
    zero: T,
    name: Option<String>,
    row_names: Option<NameMap>,
    column_names: Option<NameMap>,
}

impl<T: Copy + Default> SparseMatrix<T> {
    /// Create an empty `rows` x `cols` sparse matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
            zero: T::default(),
            name: None,
            row_names: None,
            column_names: None,
        }
    }

    /// Build a sparse matrix from `(row, col, value)` triplets.
    ///
    /// Later triplets overwrite earlier ones at the same position.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if a triplet is outside the matrix
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut m = Self::new(rows, cols);
        for (i, j, v) in triplets {
            m.insert(i, j, v)?;
        }
        Ok(m)
    }

    /// Store `value` at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the position is out of range
    pub fn insert(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(ComparisonError::InvalidInput(format!(
                "position ({}, {}) outside a {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }
        self.entries.insert((col, row), value);
        Ok(())
    }

    /// Number of explicitly stored entries.
    pub fn stored_count(&self) -> usize {
        self.entries.len()
    }

    /// Stored entries as `(row, col, value)` in column-major order.
    pub fn stored(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.entries.iter().map(|(&(j, i), &v)| (i, j, v))
    }
}

impl<T> SparseMatrix<T> {
    /// Attach a matrix name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach row names keyed by row position.
    pub fn with_row_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        self.row_names = Some(names.into_iter().map(|(k, v)| (k, v.into())).collect());
        self
    }

    /// Attach column names keyed by column position.
    pub fn with_column_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        self.column_names = Some(names.into_iter().map(|(k, v)| (k, v.into())).collect());
        self
    }
}

impl<T: Copy> MatrixLike<T> for SparseMatrix<T> {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.cols
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self.entries.get(&(col, row)).copied().unwrap_or(self.zero)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn row_names(&self) -> Option<&NameMap> {
        self.row_names.as_ref()
    }

    fn column_names(&self) -> Option<&NameMap> {
        self.column_names.as_ref()
    }
}
