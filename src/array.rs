//! Array and collection comparers.
//!
//! Slices are compared element by element with the scalar rule from
//! [`crate::scalar`]. Absent arrays are modelled as `None`: two absent arrays
//! are equal, one absent array is always a failure.

use crate::error::{both_present, ComparisonError, Result};
use crate::scalar::{ApproxEq, Tolerance};
use ndarray::{ArrayBase, Data, Dimension};
use std::fmt::Debug;

/// Check two optional slices element by element within `delta`.
///
/// # Arguments
///
/// * `expected` - The expected elements, or `None` for an absent array
/// * `actual` - The elements under test, or `None` for an absent array
/// * `delta` - Maximum allowed absolute difference per element
///
/// # Errors
///
/// * `ComparisonError::NullMismatch` if exactly one side is absent
/// * `ComparisonError::LengthMismatch` if the lengths differ
/// * `ComparisonError::ValueMismatch` naming the first differing index
pub fn check_slices<T: ApproxEq>(
    expected: Option<&[T]>,
    actual: Option<&[T]>,
    delta: f64,
) -> Result<()> {
    check_slices_tol(expected, actual, &Tolerance::new(delta))
}

/// [`check_slices`] under an explicit [`Tolerance`].
pub fn check_slices_tol<T: ApproxEq>(
    expected: Option<&[T]>,
    actual: Option<&[T]>,
    tol: &Tolerance,
) -> Result<()> {
    let Some((expected, actual)) = both_present("array", expected, actual)? else {
        return Ok(());
    };
    check_lengths("array", expected.len(), actual.len())?;

    for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        if !e.approx_eq_tol(a, tol) {
            tracing::debug!(index = i, ?e, ?a, "array element mismatch");
            return Err(ComparisonError::value_mismatch(format!("[{}]", i), e, a, tol.delta));
        }
    }
    Ok(())
}

/// Check two optional slices for exact equality.
///
/// Used for integer codes, labels and other values with no tolerance.
pub fn check_exact<T: PartialEq + Debug>(expected: Option<&[T]>, actual: Option<&[T]>) -> Result<()> {
    let Some((expected, actual)) = both_present("array", expected, actual)? else {
        return Ok(());
    };
    check_lengths("array", expected.len(), actual.len())?;

    match expected.iter().zip(actual.iter()).position(|(e, a)| e != a) {
        None => Ok(()),
        Some(i) => {
            tracing::debug!(index = i, "array element mismatch");
            Err(ComparisonError::value_mismatch(
                format!("[{}]", i),
                &expected[i],
                &actual[i],
                0.0,
            ))
        }
    }
}

/// Check two jagged arrays (arrays of rows of possibly different lengths).
///
/// The outer lengths are compared first, then every row with
/// [`check_slices`]. A mismatch inside a row is reported as `row r [c]`.
pub fn check_jagged<T: ApproxEq, R: AsRef<[T]>>(
    expected: Option<&[R]>,
    actual: Option<&[R]>,
    delta: f64,
) -> Result<()> {
    let Some((expected, actual)) = both_present("jagged array", expected, actual)? else {
        return Ok(());
    };
    check_lengths("jagged array", expected.len(), actual.len())?;

    for (r, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        let (e, a) = (e.as_ref(), a.as_ref());
        if e.len() != a.len() {
            return Err(ComparisonError::ShapeMismatch {
                kind: "jagged array row",
                expected: vec![r, e.len()],
                actual: vec![r, a.len()],
            });
        }
        check_slices(Some(e), Some(a), delta).map_err(|err| err.within(&format!("row {} ", r)))?;
    }
    Ok(())
}

/// Check two ndarray arrays of any dimension.
///
/// Shapes must match; elements are compared in logical (row-major) order and
/// a mismatch is reported with its multi-dimensional index.
pub fn check_ndarray<S1, S2, D, T>(
    expected: Option<&ArrayBase<S1, D>>,
    actual: Option<&ArrayBase<S2, D>>,
    delta: f64,
) -> Result<()>
where
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D: Dimension,
    T: ApproxEq,
{
    let Some((expected, actual)) = both_present("array", expected, actual)? else {
        return Ok(());
    };
    if expected.shape() != actual.shape() {
        return Err(ComparisonError::ShapeMismatch {
            kind: "array",
            expected: expected.shape().to_vec(),
            actual: actual.shape().to_vec(),
        });
    }

    for ((idx, e), a) in expected.indexed_iter().zip(actual.iter()) {
        if !e.approx_eq(a, delta) {
            let location = format!("{:?}", idx);
            tracing::debug!(%location, ?e, ?a, "ndarray element mismatch");
            return Err(ComparisonError::value_mismatch(location, e, a, delta));
        }
    }
    Ok(())
}

pub(crate) fn check_lengths(kind: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        tracing::debug!(kind, expected, actual, "length mismatch");
        Err(ComparisonError::LengthMismatch {
            kind,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_slices_within_delta() {
        let e = [1.0, 2.0, f64::NAN];
        let a = [1.0 + 1e-12, 2.0 - 1e-12, f64::NAN];
        assert!(check_slices(Some(&e[..]), Some(&a[..]), 1e-10).is_ok());
    }

    #[test]
    fn test_slices_reports_first_index() {
        let e = [1.0, 2.0, 3.0];
        let a = [1.0, 2.5, 3.5];
        let err = check_slices(Some(&e[..]), Some(&a[..]), 0.1).unwrap_err();
        match err {
            ComparisonError::ValueMismatch { location, .. } => assert_eq!(location, "[1]"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_slices_null_rules() {
        assert!(check_slices::<f64>(None, None, 0.0).is_ok());
        let err = check_slices(Some(&[1.0][..]), None, 0.0).unwrap_err();
        assert_eq!(format!("{}", err), "one array is null, the other is not");
    }

    #[test]
    fn test_slices_length() {
        let err = check_slices(Some(&[1.0, 2.0][..]), Some(&[1.0][..]), 0.0).unwrap_err();
        assert!(format!("{}", err).starts_with("arrays have not the same length"));
    }

    #[test]
    fn test_exact() {
        let e = ["a", "b"];
        assert!(check_exact(Some(&e[..]), Some(&["a", "b"][..])).is_ok());
        assert!(check_exact(Some(&e[..]), Some(&["a", "c"][..])).is_err());
    }

    #[test]
    fn test_jagged() {
        let e = vec![vec![1.0], vec![2.0, 3.0]];
        let a = vec![vec![1.0], vec![2.0, 3.2]];
        assert!(check_jagged::<f64, _>(Some(&e[..]), Some(&e[..]), 0.0).is_ok());
        let err = check_jagged::<f64, _>(Some(&e[..]), Some(&a[..]), 0.1).unwrap_err();
        match err {
            ComparisonError::ValueMismatch { location, .. } => assert_eq!(location, "row 1 [1]"),
            other => panic!("unexpected error {other:?}"),
        }

        let short = vec![vec![1.0], vec![2.0]];
        assert!(matches!(
            check_jagged::<f64, _>(Some(&e[..]), Some(&short[..]), 0.1),
            Err(ComparisonError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_ndarray() {
        let e = array![[1.0, 2.0], [3.0, 4.0]];
        let a = array![[1.0, 2.0], [3.0, 4.5]];
        assert!(check_ndarray(Some(&e), Some(&e.view()), 0.0).is_ok());
        let err = check_ndarray(Some(&e), Some(&a), 0.1).unwrap_err();
        match err {
            ComparisonError::ValueMismatch { location, .. } => assert_eq!(location, "(1, 1)"),
            other => panic!("unexpected error {other:?}"),
        }

        let b = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            check_ndarray(Some(&e), Some(&b), 0.1),
            Err(ComparisonError::ShapeMismatch { .. })
        ));
    }
}
