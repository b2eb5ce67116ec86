//! Matrix comparers applied across ndarray, nalgebra, faer and the
//! library's own matrix types.

use crate::test_helpers::init_tracing;
use nalgebra::DMatrix;
use ndarray::{array, Array2};
use numeq_rs::matrix::{check_matrices, check_matrices_tol, DenseMatrix, MatrixView, SparseMatrix};
use numeq_rs::{assert_matrix_eq, ComparisonError, Tolerance};

fn reference() -> Array2<f64> {
    array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]
}

#[test]
fn test_ndarray_vs_nalgebra() {
    init_tracing();
    let e = reference();
    let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0 + 1e-12]);
    assert!(check_matrices(Some(&e), Some(&a), 1e-10).is_ok());

    let off = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.5, 6.0]);
    match check_matrices(Some(&e), Some(&off), 1e-10) {
        Err(ComparisonError::ValueMismatch { location, .. }) => {
            assert_eq!(location, "[3] (row 1, col 1)")
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_ndarray_vs_faer() {
    let e = reference();
    let a = faer::Mat::from_fn(2, 3, |i, j| e[[i, j]]);
    assert_matrix_eq!(e, a);

    let transposed = faer::Mat::from_fn(3, 2, |i, j| e[[j, i]]);
    assert!(matches!(
        check_matrices(Some(&e), Some(&transposed), 1e-10),
        Err(ComparisonError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_nalgebra_roundtrip_through_dense() {
    let m = DMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64 / 7.0);
    let dense = DenseMatrix::from_nalgebra(&m);
    assert_matrix_eq!(m, dense);
    assert_matrix_eq!(dense.to_nalgebra(), m);
    assert_matrix_eq!(dense.to_ndarray(), dense);
}

#[test]
fn test_ndarray_views_and_slices() {
    let e = reference();
    let slice = e.slice(ndarray::s![.., 1..]);
    let expected = array![[2.0, 3.0], [5.0, 6.0]];
    assert!(check_matrices(Some(&expected), Some(&slice), 0.0).is_ok());

    let dense = DenseMatrix::from_ndarray(&e);
    let view = MatrixView::block(&dense, 0, 2, 1, 2).unwrap();
    assert!(check_matrices(Some(&slice), Some(&view), 0.0).is_ok());
}

#[test]
fn test_sparse_against_every_backend() {
    let sparse = SparseMatrix::from_triplets(2, 2, [(0, 0, 1.0), (1, 1, -1.0)]).unwrap();
    let nd = array![[1.0, 0.0], [0.0, -1.0]];
    let na = DMatrix::<f64>::identity(2, 2);
    let fa = faer::Mat::from_fn(2, 2, |i, j| nd[[i, j]]);

    assert_matrix_eq!(nd, sparse);
    assert_matrix_eq!(fa, sparse);
    // nalgebra identity has +1 at (1, 1)
    assert!(check_matrices(Some(&na), Some(&sparse), 1e-10).is_err());
    assert!(check_matrices(Some(&na), Some(&sparse), 2.0).is_ok());
}

#[test]
fn test_metadata_only_on_named_types() {
    let e = DenseMatrix::from_ndarray(&reference())
        .with_name("design")
        .with_column_names([(0, "a"), (1, "b"), (2, "c")]);
    let plain = reference();

    // ndarray carries no names, so the named matrix differs in metadata only
    assert!(matches!(
        check_matrices(Some(&e), Some(&plain), 0.0),
        Err(ComparisonError::NameMismatch { .. })
    ));
    assert!(check_matrices_tol(Some(&e), Some(&plain), &Tolerance::new(0.0), false).is_ok());
}

#[test]
fn test_nan_entries() {
    let e = array![[f64::NAN, 1.0]];
    let a = DMatrix::from_row_slice(1, 2, &[f64::NAN, 1.0]);
    assert!(check_matrices(Some(&e), Some(&a), 0.0).is_ok());

    let strict = Tolerance {
        delta: 0.0,
        nan_equals_nan: false,
    };
    assert!(check_matrices_tol(Some(&e), Some(&a), &strict, true).is_err());
}
