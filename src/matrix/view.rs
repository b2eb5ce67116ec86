//! Read-only views selecting rows and columns of another matrix.

use super::{MatrixLike, NameMap};
use crate::error::{ComparisonError, Result};
use std::marker::PhantomData;

/// A view over selected rows and columns of a parent matrix.
///
/// Entry (`i`, `j`) of the view is entry (`rows[i]`, `cols[j]`) of the parent.
/// Row and column names of the selected positions are carried over and
/// re-keyed by their position in the view; the parent's name is kept.
#[derive(Debug)]
pub struct MatrixView<'a, T, M: ?Sized> {
    parent: &'a M,
    rows: Vec<usize>,
    cols: Vec<usize>,
    row_names: Option<NameMap>,
    column_names: Option<NameMap>,
    _marker: PhantomData<T>,
}

impl<'a, T: Copy, M: MatrixLike<T> + ?Sized> MatrixView<'a, T, M> {
    /// Create a view over the given row and column positions.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if a position is outside the parent
    pub fn new(parent: &'a M, rows: Vec<usize>, cols: Vec<usize>) -> Result<Self> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= parent.row_count()) {
            return Err(ComparisonError::InvalidInput(format!(
                "row {} outside a matrix with {} rows",
                bad,
                parent.row_count()
            )));
        }
        if let Some(&bad) = cols.iter().find(|&&c| c >= parent.column_count()) {
            return Err(ComparisonError::InvalidInput(format!(
                "column {} outside a matrix with {} columns",
                bad,
                parent.column_count()
            )));
        }

        let row_names = parent.row_names().map(|names| select_names(names, &rows));
        let column_names = parent.column_names().map(|names| select_names(names, &cols));

        Ok(Self {
            parent,
            rows,
            cols,
            row_names,
            column_names,
            _marker: PhantomData,
        })
    }

    /// A contiguous block starting at (`first_row`, `first_col`).
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the block does not fit inside the
    ///   parent
    pub fn block(
        parent: &'a M,
        first_row: usize,
        row_count: usize,
        first_col: usize,
        col_count: usize,
    ) -> Result<Self> {
        let rows = span("row", first_row, row_count, parent.row_count())?;
        let cols = span("column", first_col, col_count, parent.column_count())?;
        Self::new(parent, rows.collect(), cols.collect())
    }

    /// A single column as an `n` x 1 view.
    pub fn column(parent: &'a M, col: usize) -> Result<Self> {
        Self::new(parent, (0..parent.row_count()).collect(), vec![col])
    }

    /// A single row as a 1 x `n` view.
    pub fn row(parent: &'a M, row: usize) -> Result<Self> {
        Self::new(parent, vec![row], (0..parent.column_count()).collect())
    }
}

/// `first..first + count`, checked against `limit` before anything is allocated.
fn span(kind: &str, first: usize, count: usize, limit: usize) -> Result<std::ops::Range<usize>> {
    match first.checked_add(count) {
        Some(end) if end <= limit => Ok(first..end),
        _ => Err(ComparisonError::InvalidInput(format!(
            "{} block of {} starting at {} outside a matrix with {} {}s",
            kind, count, first, limit, kind
        ))),
    }
}

fn select_names(names: &NameMap, positions: &[usize]) -> NameMap {
    positions
        .iter()
        .enumerate()
        .filter_map(|(k, p)| names.get(p).map(|n| (k, n.clone())))
        .collect()
}

impl<'a, T: Copy, M: MatrixLike<T> + ?Sized> MatrixLike<T> for MatrixView<'a, T, M> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.cols.len()
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self.parent.entry(self.rows[row], self.cols[col])
    }

    fn name(&self) -> Option<&str> {
        self.parent.name()
    }

    fn row_names(&self) -> Option<&NameMap> {
        self.row_names.as_ref()
    }

    fn column_names(&self) -> Option<&NameMap> {
        self.column_names.as_ref()
    }
}
