//! Panicking assertions.
//!
//! Each function here runs the matching `check_*` comparer and panics with
//! the error's message on failure, which is what a `#[test]` needs. The
//! macros wrap the most common ones.

use crate::error::Result;
use crate::inspect::{check_snapshots, StateSnapshot};
use crate::matcher::check_same_items;
use crate::matrix::{check_matrices, MatrixLike};
use crate::partition::{check_partitions, IndexPartition, PartitionMode};
use crate::scalar::{check_scalar, ApproxEq};
use std::fmt::Debug;

/// Panic with the error message if `result` is an error.
#[track_caller]
pub fn assert_ok(result: Result<()>) {
    if let Err(err) = result {
        panic!("{}", err);
    }
}

/// Assert that two scalars are equal within `delta`.
#[track_caller]
pub fn assert_scalar_eq<T: ApproxEq>(expected: &T, actual: &T, delta: f64) {
    assert_ok(check_scalar(expected, actual, delta));
}

/// Assert that two optional slices are equal within `delta`.
#[track_caller]
pub fn assert_slices_eq<T: ApproxEq>(expected: Option<&[T]>, actual: Option<&[T]>, delta: f64) {
    assert_ok(crate::array::check_slices(expected, actual, delta));
}

/// Assert that two optional matrices are equal within `delta`, names included.
#[track_caller]
pub fn assert_matrices_eq<T, A, B>(expected: Option<&A>, actual: Option<&B>, delta: f64)
where
    T: ApproxEq + Copy,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    assert_ok(check_matrices(expected, actual, delta));
}

/// Assert that two slices hold the same items in any order.
#[track_caller]
pub fn assert_same_items<E, A, F>(expected: &[E], actual: &[A], eq: F)
where
    F: FnMut(&E, &A) -> bool,
{
    assert_ok(check_same_items(Some(expected), Some(actual), eq));
}

/// Assert that two optional partitions match under `mode`.
#[track_caller]
pub fn assert_partitions_eq<Id: PartialEq + Clone + Debug>(
    expected: Option<&IndexPartition<Id>>,
    actual: Option<&IndexPartition<Id>>,
    mode: PartitionMode,
) {
    assert_ok(check_partitions(expected, actual, mode));
}

/// Assert that two state snapshots match within `delta`.
#[track_caller]
pub fn assert_snapshots_eq(expected: &StateSnapshot, actual: &StateSnapshot, delta: f64) {
    assert_ok(check_snapshots(expected, actual, delta));
}

/// Assert that two scalars are equal within a tolerance (default `1e-10`).
///
/// ```
/// use numeq_rs::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(1.0, 1.05, 0.1);
/// assert_approx_eq!(f64::NAN, f64::NAN);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_scalar_eq(&$expected, &$actual, 1e-10)
    };
    ($expected:expr, $actual:expr, $delta:expr $(,)?) => {
        $crate::assert::assert_scalar_eq(&$expected, &$actual, $delta)
    };
}

/// Assert that two matrices are equal within a tolerance (default `1e-10`).
#[macro_export]
macro_rules! assert_matrix_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_matrices_eq(Some(&$expected), Some(&$actual), 1e-10)
    };
    ($expected:expr, $actual:expr, $delta:expr $(,)?) => {
        $crate::assert::assert_matrices_eq(Some(&$expected), Some(&$actual), $delta)
    };
}

/// Assert that two collections hold the same items in any order, using `==`
/// or a given predicate.
#[macro_export]
macro_rules! assert_same_items {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_same_items(&$expected[..], &$actual[..], |e, a| e == a)
    };
    ($expected:expr, $actual:expr, $eq:expr $(,)?) => {
        $crate::assert::assert_same_items(&$expected[..], &$actual[..], $eq)
    };
}
