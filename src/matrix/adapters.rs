//! [`MatrixLike`] implementations for the linear algebra crates.
//!
//! - ndarray (any 2-D `ArrayBase`: owned arrays and views)
//! - nalgebra (any `Matrix` storage: `DMatrix`, views, fixed-size matrices)
//! - faer (`Mat`)
//!
//! With these in place a result computed with one crate can be checked
//! directly against expectations written with another, without converting.

use super::MatrixLike;
use ndarray::{ArrayBase, Data, Ix2};

impl<T, S> MatrixLike<T> for ArrayBase<S, Ix2>
where
    T: Copy,
    S: Data<Elem = T>,
{
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn column_count(&self) -> usize {
        self.ncols()
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self[[row, col]]
    }
}

#[cfg(feature = "matrix")]
impl<T, R, C, S> MatrixLike<T> for nalgebra::Matrix<T, R, C, S>
where
    T: nalgebra::Scalar + Copy,
    R: nalgebra::Dim,
    C: nalgebra::Dim,
    S: nalgebra::RawStorage<T, R, C>,
{
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn column_count(&self) -> usize {
        self.ncols()
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

#[cfg(feature = "matrix")]
impl<T: Copy> MatrixLike<T> for faer::Mat<T> {
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn column_count(&self) -> usize {
        self.ncols()
    }

    fn entry(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}
