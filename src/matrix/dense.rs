//! Dense column-major matrix with optional names.

use super::{MatrixLike, NameMap};
use crate::error::{ComparisonError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A dense matrix stored column after column.
///
/// Carries the optional metadata the comparers check: a matrix name and
/// row/column names keyed by position. Deserialization checks that the
/// entries fill the stated shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDenseMatrix<T>")]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    /// Entries in column-major order
    data: Vec<T>,
    name: Option<String>,
    row_names: Option<NameMap>,
    column_names: Option<NameMap>,
}

/// Serialized form of [`DenseMatrix`], before the shape is checked.
#[derive(Deserialize)]
struct RawDenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
    name: Option<String>,
    row_names: Option<NameMap>,
    column_names: Option<NameMap>,
}

impl<T> TryFrom<RawDenseMatrix<T>> for DenseMatrix<T> {
    type Error = ComparisonError;

    fn try_from(raw: RawDenseMatrix<T>) -> Result<Self> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.data.len()) {
            return Err(ComparisonError::InvalidInput(format!(
                "{} entries cannot fill a {}x{} matrix",
                raw.data.len(),
                raw.rows,
                raw.cols
            )));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
            name: raw.name,
            row_names: raw.row_names,
            column_names: raw.column_names,
        })
    }
}

impl<T: Copy + Default> DenseMatrix<T> {
    /// Create a `rows` x `cols` matrix filled with `T::default()`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
            name: None,
            row_names: None,
            column_names: None,
        }
    }

    /// Create a matrix from entries listed column after column.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if `data.len() != rows * cols`
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(ComparisonError::InvalidInput(format!(
                "{} entries cannot fill a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            data,
            name: None,
            row_names: None,
            column_names: None,
        })
    }

    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the rows have different lengths
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(ComparisonError::InvalidInput(format!(
                "row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        Ok(Self::from_fn(rows.len(), cols, |i, j| rows[i][j]))
    }

    /// Create a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self {
            rows,
            cols,
            data,
            name: None,
            row_names: None,
            column_names: None,
        }
    }

    /// Copy an ndarray matrix.
    pub fn from_ndarray(arr: &Array2<T>) -> Self {
        Self::from_fn(arr.nrows(), arr.ncols(), |i, j| arr[[i, j]])
    }

    /// Copy into an ndarray matrix.
    pub fn to_ndarray(&self) -> Array2<T> {
        Array2::from_shape_fn((self.rows, self.cols), |(i, j)| self.entry(i, j))
    }

    /// Copy a nalgebra matrix.
    #[cfg(feature = "matrix")]
    pub fn from_nalgebra(mat: &nalgebra::DMatrix<T>) -> Self
    where
        T: nalgebra::Scalar,
    {
        // nalgebra is column-major as well
        Self {
            rows: mat.nrows(),
            cols: mat.ncols(),
            data: mat.as_slice().to_vec(),
            name: None,
            row_names: None,
            column_names: None,
        }
    }

    /// Copy into a nalgebra matrix.
    #[cfg(feature = "matrix")]
    pub fn to_nalgebra(&self) -> nalgebra::DMatrix<T>
    where
        T: nalgebra::Scalar,
    {
        nalgebra::DMatrix::from_column_slice(self.rows, self.cols, &self.data)
    }

    /// Set the entry at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the position is out of range
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(ComparisonError::InvalidInput(format!(
                "position ({}, {}) outside a {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }
        self.data[col * self.rows + row] = value;
        Ok(())
    }

    /// Entries in column-major order.
    pub fn as_column_major(&self) -> &[T] {
        &self.data
    }
}

impl<T> DenseMatrix<T> {
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

impl<T: Copy> MatrixLike<T> for DenseMatrix<T> {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.cols
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self.data[col * self.rows + row]
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
