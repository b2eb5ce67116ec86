//! Order-independent collection matching.
//!
//! [`check_same_items`] checks that two collections contain the same items
//! under a caller-supplied equality predicate, regardless of order. Each
//! expected item is greedily matched to the first unused actual item, and
//! matched positions are removed from the candidate pool, so duplicates are
//! matched one-to-one (multiset semantics). The cost is O(n²) predicate calls.

use crate::array::check_lengths;
use crate::error::{both_present, ComparisonError, Result};

/// Check that `expected` and `actual` contain the same items in any order.
///
/// # Arguments
///
/// * `expected` - The expected items, or `None` for an absent collection
/// * `actual` - The items under test, or `None` for an absent collection
/// * `eq` - Equality predicate called as `eq(expected_item, actual_item)`
///
/// # Errors
///
/// * `ComparisonError::NullMismatch` if exactly one side is absent
/// * `ComparisonError::UnmatchedExpected` for the first expected item with no
///   remaining match
/// * `ComparisonError::UnmatchedActual` if actual items are left over
pub fn check_same_items<E, A, F>(expected: Option<&[E]>, actual: Option<&[A]>, mut eq: F) -> Result<()>
where
    F: FnMut(&E, &A) -> bool,
{
    let Some((expected, actual)) = both_present("collection", expected, actual)? else {
        return Ok(());
    };

    let mut unused: Vec<usize> = (0..actual.len()).collect();
    for (i, e) in expected.iter().enumerate() {
        match unused.iter().position(|&j| eq(e, &actual[j])) {
            Some(k) => {
                let j = unused.remove(k);
                tracing::trace!(expected = i, actual = j, "matched item");
            }
            None => {
                tracing::debug!(position = i, "expected item has no match");
                return Err(ComparisonError::UnmatchedExpected { position: i });
            }
        }
    }

    if let Some(&first) = unused.first() {
        tracing::debug!(count = unused.len(), first, "unmatched actual items");
        return Err(ComparisonError::UnmatchedActual {
            count: unused.len(),
            first,
        });
    }
    Ok(())
}

/// Whether two slices contain the same items in any order under `eq`.
pub fn same_items<E, A, F>(expected: &[E], actual: &[A], eq: F) -> bool
where
    F: FnMut(&E, &A) -> bool,
{
    check_same_items(Some(expected), Some(actual), eq).is_ok()
}

/// Check that `expected` and `actual` hold equal items in the same order.
///
/// # Errors
///
/// * `ComparisonError::NullMismatch` if exactly one side is absent
/// * `ComparisonError::LengthMismatch` if the lengths differ
/// * `ComparisonError::UnmatchedExpected` for the first position whose items
///   differ
pub fn check_sequence<E, A, F>(expected: Option<&[E]>, actual: Option<&[A]>, mut eq: F) -> Result<()>
where
    F: FnMut(&E, &A) -> bool,
{
    let Some((expected, actual)) = both_present("collection", expected, actual)? else {
        return Ok(());
    };
    check_lengths("collection", expected.len(), actual.len())?;

    match expected.iter().zip(actual.iter()).position(|(e, a)| !eq(e, a)) {
        None => Ok(()),
        Some(i) => {
            tracing::debug!(position = i, "sequence item mismatch");
            Err(ComparisonError::UnmatchedExpected { position: i })
        }
    }
}
