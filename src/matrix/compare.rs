//! Matrix comparers.

use super::{column_major, MatrixLike, NameMap};
use crate::error::{both_present, ComparisonError, Result};
use crate::scalar::{ApproxEq, Tolerance};

/// Check two optional matrices: dimensions, values and metadata.
///
/// # Arguments
///
/// * `expected` - The expected matrix, or `None` for an absent matrix
/// * `actual` - The matrix under test, or `None` for an absent matrix
/// * `delta` - Maximum allowed absolute difference per entry
///
/// # Errors
///
/// * `ComparisonError::NullMismatch` if exactly one side is absent
/// * `ComparisonError::ShapeMismatch` if the dimensions differ
/// * `ComparisonError::ValueMismatch` naming the first differing entry in
///   column-major order
/// * `ComparisonError::NameMismatch` / `NullMismatch` / `LengthMismatch`
///   for metadata differences
pub fn check_matrices<T, A, B>(expected: Option<&A>, actual: Option<&B>, delta: f64) -> Result<()>
where
    T: ApproxEq + Copy,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    check_matrices_tol(expected, actual, &Tolerance::new(delta), true)
}

/// [`check_matrices`] under an explicit tolerance, optionally skipping the
/// metadata checks.
pub fn check_matrices_tol<T, A, B>(
    expected: Option<&A>,
    actual: Option<&B>,
    tol: &Tolerance,
    check_names: bool,
) -> Result<()>
where
    T: ApproxEq + Copy,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    let Some((expected, actual)) = both_present("matrix", expected, actual)? else {
        return Ok(());
    };
    check_values(expected, actual, tol)?;
    if check_names {
        check_metadata(expected, actual)?;
    }
    Ok(())
}

/// Check dimensions and column-major values of two present matrices.
pub fn check_values<T, A, B>(expected: &A, actual: &B, tol: &Tolerance) -> Result<()>
where
    T: ApproxEq + Copy,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    let shape_e = [expected.row_count(), expected.column_count()];
    let shape_a = [actual.row_count(), actual.column_count()];
    if shape_e != shape_a {
        tracing::debug!(?shape_e, ?shape_a, "matrix shape mismatch");
        return Err(ComparisonError::ShapeMismatch {
            kind: "matrix",
            expected: shape_e.to_vec(),
            actual: shape_a.to_vec(),
        });
    }

    let rows = shape_e[0];
    for (k, (e, a)) in column_major(expected).zip(column_major(actual)).enumerate() {
        if !e.approx_eq_tol(&a, tol) {
            let (row, col) = (k % rows, k / rows);
            tracing::debug!(index = k, row, col, ?e, ?a, "matrix entry mismatch");
            return Err(ComparisonError::value_mismatch(
                format!("[{}] (row {}, col {})", k, row, col),
                e,
                a,
                tol.delta,
            ));
        }
    }
    Ok(())
}

/// Check the matrix name and the row/column name maps.
pub fn check_metadata<T, A, B>(expected: &A, actual: &B) -> Result<()>
where
    T: Copy,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    if expected.name() != actual.name() {
        tracing::debug!(expected = ?expected.name(), actual = ?actual.name(), "matrix name mismatch");
        return Err(ComparisonError::NameMismatch {
            what: "matrix names".to_string(),
            expected: expected.name().map(str::to_string),
            actual: actual.name().map(str::to_string),
        });
    }
    check_name_maps("row name map", expected.row_names(), actual.row_names())?;
    check_name_maps("column name map", expected.column_names(), actual.column_names())
}

/// Check two optional position-keyed name maps.
///
/// Both absent is equal; one absent is a failure. Otherwise both maps must
/// have the same number of keys and, for every key of `expected`, `actual`
/// must hold the same string.
pub fn check_name_maps(
    kind: &'static str,
    expected: Option<&NameMap>,
    actual: Option<&NameMap>,
) -> Result<()> {
    let Some((expected, actual)) = both_present(kind, expected, actual)? else {
        return Ok(());
    };
    if expected.len() != actual.len() {
        return Err(ComparisonError::LengthMismatch {
            kind,
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (key, name) in expected {
        let other = actual.get(key);
        if other != Some(name) {
            tracing::debug!(kind, key, ?name, ?other, "name map mismatch");
            return Err(ComparisonError::NameMismatch {
                what: format!("names at position {} of the {}", key, kind),
                expected: Some(name.clone()),
                actual: other.cloned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DenseMatrix, MatrixView, SparseMatrix};
    use ndarray::array;
    use num_complex::Complex;

    #[test]
    fn test_dense_vs_ndarray() {
        let e = array![[1.0, 0.0], [0.0, 2.0]];
        let a = DenseMatrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 2.0 + 1e-12]]).unwrap();
        assert!(check_matrices(Some(&e), Some(&a), 1e-10).is_ok());
    }

    #[test]
    fn test_sparse_vs_dense() {
        let dense = DenseMatrix::from_rows(&[vec![0.0, 3.0], vec![0.0, 0.0]]).unwrap();
        let sparse = SparseMatrix::from_triplets(2, 2, [(0, 1, 3.0)]).unwrap();
        assert!(check_matrices(Some(&dense), Some(&sparse), 0.0).is_ok());
    }

    #[test]
    fn test_reports_row_and_col() {
        let e = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 5.0]]).unwrap();
        let err = check_matrices(Some(&e), Some(&a), 0.5).unwrap_err();
        match err {
            ComparisonError::ValueMismatch { location, .. } => {
                assert_eq!(location, "[3] (row 1, col 1)")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let e = DenseMatrix::<f64>::zeros(2, 3);
        let a = DenseMatrix::<f64>::zeros(3, 2);
        assert!(matches!(
            check_matrices(Some(&e), Some(&a), 1.0),
            Err(ComparisonError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_null_rules() {
        let e = DenseMatrix::<f64>::zeros(1, 1);
        assert!(check_matrices::<f64, DenseMatrix<f64>, DenseMatrix<f64>>(None, None, 0.0).is_ok());
        assert!(matches!(
            check_matrices::<f64, _, DenseMatrix<f64>>(Some(&e), None, 0.0),
            Err(ComparisonError::NullMismatch { kind: "matrix" })
        ));
    }

    #[test]
    fn test_name_checks() {
        let base = DenseMatrix::<f64>::zeros(2, 2);
        let named = base.clone().with_name("m");
        assert!(check_matrices(Some(&named), Some(&base), 0.0).is_err());
        assert!(check_matrices_tol(Some(&named), Some(&base), &Tolerance::new(0.0), false).is_ok());

        let rows_a = base.clone().with_row_names([(0, "a"), (1, "b")]);
        let rows_b = base.clone().with_row_names([(0, "a"), (1, "c")]);
        let err = check_matrices(Some(&rows_a), Some(&rows_b), 0.0).unwrap_err();
        assert!(format!("{}", err).contains("names at position 1 of the row name map"));

        assert!(matches!(
            check_matrices(Some(&rows_a), Some(&base), 0.0),
            Err(ComparisonError::NullMismatch { kind: "row name map" })
        ));

        let fewer = base.clone().with_column_names([(0, "x")]);
        let more = base.with_column_names([(0, "x"), (1, "y")]);
        assert!(matches!(
            check_matrices(Some(&fewer), Some(&more), 0.0),
            Err(ComparisonError::LengthMismatch { kind: "column name map", .. })
        ));
    }

    #[test]
    fn test_view_vs_dense() {
        let parent = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let view = MatrixView::column(&parent, 1).unwrap();
        let expected = DenseMatrix::from_rows(&[vec![2.0], vec![4.0]]).unwrap();
        assert!(check_matrices(Some(&expected), Some(&view), 0.0).is_ok());
    }

    #[test]
    fn test_complex_matrices() {
        let e = DenseMatrix::from_rows(&[vec![Complex::new(1.0, -1.0), Complex::new(0.0, 2.0)]])
            .unwrap();
        let close = DenseMatrix::from_rows(&[vec![Complex::new(1.0, -1.0 + 1e-3), Complex::new(0.0, 2.0)]])
            .unwrap();
        assert!(check_matrices(Some(&e), Some(&close), 1e-2).is_ok());
        assert!(check_matrices(Some(&e), Some(&close), 1e-4).is_err());
    }
}
