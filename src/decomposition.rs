//! # Decomposition Comparers
//!
//! Singular vectors and multidimensional scaling coordinates are only
//! determined up to the sign of each component, so their comparers accept a
//! per-column sign flip. For MDS configurations, which may also be rotated or
//! reflected as a whole, [`check_same_distances`] compares the pairwise
//! distance matrices instead of the coordinates.

use crate::array::check_ndarray;
use crate::error::{ComparisonError, Result};
use crate::matrix::{check_values, MatrixLike};
use crate::scalar::{ApproxEq, Tolerance};
use ndarray::{Array1, Array2, ArrayView1};

/// Singular value decomposition `A = U diag(s) V^T`.
///
/// The factors are only reachable through [`SvdParts::new`], so their shapes
/// always chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SvdParts {
    /// Left singular vectors as columns (m x k)
    u: Array2<f64>,

    /// Singular values in decreasing order (k)
    s: Array1<f64>,

    /// Right singular vectors as rows (k x n)
    vt: Array2<f64>,
}

impl SvdParts {
    /// Bundle the three factors.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the factor shapes are inconsistent
    pub fn new(u: Array2<f64>, s: Array1<f64>, vt: Array2<f64>) -> Result<Self> {
        let k = s.len();
        if u.ncols() != k || vt.nrows() != k {
            return Err(ComparisonError::InvalidInput(format!(
                "factors of shape {:?}, {}, {:?} do not chain",
                u.shape(),
                k,
                vt.shape()
            )));
        }
        Ok(Self { u, s, vt })
    }

    /// Left singular vectors as columns.
    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    /// Singular values.
    pub fn s(&self) -> &Array1<f64> {
        &self.s
    }

    /// Right singular vectors as rows.
    pub fn vt(&self) -> &Array2<f64> {
        &self.vt
    }

    /// Number of components.
    pub fn rank(&self) -> usize {
        self.s.len()
    }

    /// Take the factors back as `(u, s, vt)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>, Array2<f64>) {
        (self.u, self.s, self.vt)
    }

    /// Rebuild `U diag(s) V^T`.
    pub fn reconstruct(&self) -> Array2<f64> {
        let scaled = &self.u * &self.s.view().insert_axis(ndarray::Axis(0));
        scaled.dot(&self.vt)
    }
}

/// Which sign aligns `actual` with `expected`: `Some(1.0)`, `Some(-1.0)` or
/// `None` if neither does.
fn aligning_sign(expected: ArrayView1<f64>, actual: ArrayView1<f64>, tol: &Tolerance) -> Option<f64> {
    let matches = |sign: f64| {
        expected
            .iter()
            .zip(actual.iter())
            .all(|(e, a)| e.approx_eq_tol(&(sign * a), tol))
    };
    if matches(1.0) {
        Some(1.0)
    } else if matches(-1.0) {
        Some(-1.0)
    } else {
        None
    }
}

/// Check that every column of `actual` equals the matching column of
/// `expected`, or its negation.
///
/// # Errors
///
/// * `ComparisonError::ShapeMismatch` if the dimensions differ
/// * `ComparisonError::ValueMismatch` naming the first column that matches
///   under neither sign
pub fn check_columns_up_to_sign<A, B>(expected: &A, actual: &B, delta: f64) -> Result<()>
where
    A: MatrixLike<f64> + ?Sized,
    B: MatrixLike<f64> + ?Sized,
{
    let e = to_array(expected);
    let a = to_array(actual);
    if e.shape() != a.shape() {
        return Err(ComparisonError::ShapeMismatch {
            kind: "matrix",
            expected: e.shape().to_vec(),
            actual: a.shape().to_vec(),
        });
    }
    let tol = Tolerance::new(delta);
    for (j, (ce, ca)) in e.columns().into_iter().zip(a.columns()).enumerate() {
        if aligning_sign(ce, ca, &tol).is_none() {
            tracing::debug!(column = j, "column differs under both signs");
            return Err(ComparisonError::value_mismatch(
                format!("column {} (up to sign)", j),
                ce.to_vec(),
                ca.to_vec(),
                delta,
            ));
        }
    }
    Ok(())
}

/// Check two SVDs.
///
/// Singular values are compared pointwise. For each component `k`, the sign
/// that aligns column `k` of `U` must also align row `k` of `V^T`.
pub fn check_svd_parts(expected: &SvdParts, actual: &SvdParts, delta: f64) -> Result<()> {
    check_ndarray(Some(&expected.s), Some(&actual.s), delta).map_err(|err| err.within("singular values "))?;
    for (name, e, a) in [("U", &expected.u, &actual.u), ("V^T", &expected.vt, &actual.vt)] {
        if e.shape() != a.shape() {
            return Err(ComparisonError::ShapeMismatch {
                kind: name,
                expected: e.shape().to_vec(),
                actual: a.shape().to_vec(),
            });
        }
    }

    let tol = Tolerance::new(delta);
    for k in 0..expected.s.len() {
        let sign = aligning_sign(expected.u.column(k), actual.u.column(k), &tol).ok_or_else(|| {
            ComparisonError::value_mismatch(
                format!("U column {} (up to sign)", k),
                expected.u.column(k).to_vec(),
                actual.u.column(k).to_vec(),
                delta,
            )
        })?;
        let row_e = expected.vt.row(k);
        let row_a = actual.vt.row(k);
        if let Some(j) = (0..row_e.len()).find(|&j| !row_e[j].approx_eq_tol(&(sign * row_a[j]), &tol)) {
            tracing::debug!(component = k, sign, "right singular vector disagrees with left sign");
            return Err(ComparisonError::value_mismatch(
                format!("V^T [{}, {}] (sign {})", k, j, sign),
                row_e[j],
                sign * row_a[j],
                delta,
            ));
        }
    }
    Ok(())
}

/// Check that `parts` reproduces `original` within `delta`.
pub fn check_reconstruction<M>(original: &M, parts: &SvdParts, delta: f64) -> Result<()>
where
    M: MatrixLike<f64> + ?Sized,
{
    let rebuilt = parts.reconstruct();
    check_values(original, &rebuilt, &Tolerance::new(delta))
}

/// Euclidean distances between the rows of a configuration.
pub fn pairwise_distances<M>(configuration: &M) -> Array2<f64>
where
    M: MatrixLike<f64> + ?Sized,
{
    let points = to_array(configuration);
    let n = points.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| {
        let diff = &points.row(i) - &points.row(j);
        diff.dot(&diff).sqrt()
    })
}

/// Check that two configurations have the same pairwise distances.
///
/// Invariant to rotation, reflection and translation of either
/// configuration.
pub fn check_same_distances<A, B>(expected: &A, actual: &B, delta: f64) -> Result<()>
where
    A: MatrixLike<f64> + ?Sized,
    B: MatrixLike<f64> + ?Sized,
{
    if expected.row_count() != actual.row_count() {
        return Err(ComparisonError::LengthMismatch {
            kind: "configuration",
            expected: expected.row_count(),
            actual: actual.row_count(),
        });
    }
    check_values(
        &pairwise_distances(expected),
        &pairwise_distances(actual),
        &Tolerance::new(delta),
    )
    .map_err(|err| err.within("distance "))
}

fn to_array<M: MatrixLike<f64> + ?Sized>(m: &M) -> Array2<f64> {
    Array2::from_shape_fn((m.row_count(), m.column_count()), |(i, j)| m.entry(i, j))
}
