//! # Matrix Comparison
//!
//! This module compares matrix-like values: dense, sparse and view matrices,
//! real or complex, from this crate or from the common linear algebra
//! crates (ndarray, nalgebra, faer).
//!
//! Two matrices are equal when:
//! - their row and column counts match,
//! - their column-major flattened entries are pointwise equal within the
//!   tolerance, and
//! - their optional name, row-name and column-name maps match exactly.
//!
//! ## Example Usage
//!
//! ```rust
//! use numeq_rs::matrix::{check_matrices, DenseMatrix};
//!
//! let expected = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let actual = DenseMatrix::from_column_major(2, 2, vec![1.0, 3.0, 2.0, 4.0 + 1e-12]).unwrap();
//!
//! assert!(check_matrices(Some(&expected), Some(&actual), 1e-10).is_ok());
//! ```

pub mod adapters;
pub mod compare;
pub mod dense;
pub mod sparse;
pub mod view;

use std::collections::BTreeMap;

pub use compare::{check_matrices, check_matrices_tol, check_metadata, check_name_maps, check_values};
pub use dense::DenseMatrix;
pub use sparse::SparseMatrix;
pub use view::MatrixView;

/// Position-keyed names of rows or columns.
pub type NameMap = BTreeMap<usize, String>;

/// Read access to a matrix for comparison purposes.
///
/// Implementors expose their dimensions and entries; metadata accessors
/// default to "no metadata".
pub trait MatrixLike<T: Copy> {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Entry at (`row`, `col`). Callers stay within the dimensions.
    fn entry(&self, row: usize, col: usize) -> T;

    /// Name of the matrix, if any.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Row names keyed by row position, if any.
    fn row_names(&self) -> Option<&NameMap> {
        None
    }

    /// Column names keyed by column position, if any.
    fn column_names(&self) -> Option<&NameMap> {
        None
    }
}

/// Iterate the entries of a matrix column after column.
pub fn column_major<T, M>(matrix: &M) -> impl Iterator<Item = T> + '_
where
    T: Copy,
    M: MatrixLike<T> + ?Sized,
{
    let rows = matrix.row_count();
    (0..matrix.column_count())
        .flat_map(move |col| (0..rows).map(move |row| matrix.entry(row, col)))
}

/// Collect the column-major entries of a matrix.
pub fn to_column_major<T, M>(matrix: &M) -> Vec<T>
where
    T: Copy,
    M: MatrixLike<T> + ?Sized,
{
    column_major(matrix).collect()
}
