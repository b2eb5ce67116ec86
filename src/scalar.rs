//! Scalar tolerance rules.
//!
//! Every container comparer in this crate reduces to the rule implemented
//! here: two values are equal if both are NaN, or if their absolute
//! difference does not exceed `delta`. Complex numbers apply the rule to the
//! real and imaginary parts independently.

use crate::error::{ComparisonError, Result};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Absolute tolerance used by the scalar rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Maximum allowed absolute difference. Default: 1e-10
    pub delta: f64,

    /// Whether NaN compares equal to NaN. Default: true
    pub nan_equals_nan: bool,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            delta: 1e-10,
            nan_equals_nan: true,
        }
    }
}

impl Tolerance {
    /// Absolute tolerance `delta` with NaN equal to NaN.
    pub fn new(delta: f64) -> Self {
        Self {
            delta,
            nan_equals_nan: true,
        }
    }

    /// Tolerance requiring bit-for-bit equal values (NaN still equals NaN).
    pub fn exact() -> Self {
        Self::new(0.0)
    }

    /// Compare two reals under this tolerance.
    pub fn reals_match(&self, expected: f64, actual: f64) -> bool {
        if expected.is_nan() || actual.is_nan() {
            return self.nan_equals_nan && expected.is_nan() && actual.is_nan();
        }
        // Same-signed infinities: their difference is NaN.
        if expected == actual {
            return true;
        }
        (expected - actual).abs() <= self.delta
    }
}

/// Types that can be compared under an absolute tolerance.
pub trait ApproxEq: Debug {
    /// Whether `self` (expected) and `other` (actual) match under `tol`.
    fn approx_eq_tol(&self, other: &Self, tol: &Tolerance) -> bool;

    /// Whether `self` and `other` match within `delta`.
    fn approx_eq(&self, other: &Self, delta: f64) -> bool {
        self.approx_eq_tol(other, &Tolerance::new(delta))
    }
}

impl ApproxEq for f64 {
    fn approx_eq_tol(&self, other: &Self, tol: &Tolerance) -> bool {
        tol.reals_match(*self, *other)
    }
}

impl ApproxEq for f32 {
    fn approx_eq_tol(&self, other: &Self, tol: &Tolerance) -> bool {
        tol.reals_match(*self as f64, *other as f64)
    }
}

impl<T: ApproxEq> ApproxEq for Complex<T> {
    fn approx_eq_tol(&self, other: &Self, tol: &Tolerance) -> bool {
        self.re.approx_eq_tol(&other.re, tol) && self.im.approx_eq_tol(&other.im, tol)
    }
}

macro_rules! impl_approx_eq_integer {
    ($($t:ty),*) => {
        $(
            impl ApproxEq for $t {
                // The difference is taken in integer arithmetic: 64-bit values
                // above 2^53 do not survive a cast to f64.
                fn approx_eq_tol(&self, other: &Self, tol: &Tolerance) -> bool {
                    self == other || (self.abs_diff(*other) as f64) <= tol.delta
                }
            }
        )*
    };
}

impl_approx_eq_integer!(i32, i64, u32, u64, usize);

/// Check a single value against its expectation.
///
/// # Arguments
///
/// * `expected` - The expected value
/// * `actual` - The value under test
/// * `delta` - Maximum allowed absolute difference
///
/// # Errors
///
/// * `ComparisonError::ValueMismatch` if the values differ by more than `delta`
pub fn check_scalar<T: ApproxEq>(expected: &T, actual: &T, delta: f64) -> Result<()> {
    check_scalar_tol(expected, actual, &Tolerance::new(delta))
}

/// Check a single value under an explicit [`Tolerance`].
pub fn check_scalar_tol<T: ApproxEq>(expected: &T, actual: &T, tol: &Tolerance) -> Result<()> {
    if expected.approx_eq_tol(actual, tol) {
        Ok(())
    } else {
        tracing::debug!(?expected, ?actual, delta = tol.delta, "scalar mismatch");
        Err(ComparisonError::value_mismatch("scalar", expected, actual, tol.delta))
    }
}
