//! Properties of the order-insensitive matcher and the partition modes,
//! checked over shuffled inputs.

use crate::test_helpers::{seeded_rng, shuffled};
use numeq_rs::matcher::{check_same_items, check_sequence, same_items};
use numeq_rs::partition::{check_partitions, IndexCollection, IndexPartition, PartitionMode};
use numeq_rs::ComparisonError;
use rand::Rng;

fn close(e: &f64, a: &f64) -> bool {
    (e - a).abs() <= 1e-9
}

#[test]
fn test_any_permutation_matches() {
    let mut rng = seeded_rng(7);
    let items: Vec<f64> = (0..50).map(|_| rng.gen_range(-10.0..10.0)).collect();
    for seed in 0..20 {
        let permuted = shuffled(&items, seed);
        assert!(same_items(&items, &permuted, close));
        assert!(same_items(&permuted, &items, close));
    }
}

#[test]
fn test_matching_is_symmetric_for_multisets() {
    let e = vec![1, 1, 2, 3, 3, 3];
    let a = shuffled(&e, 11);
    assert!(same_items(&e, &a, |x, y| x == y));

    let fewer_threes = vec![1, 1, 2, 2, 3, 3];
    assert!(!same_items(&e, &fewer_threes, |x, y| x == y));
    assert!(!same_items(&fewer_threes, &e, |x, y| x == y));
}

#[test]
fn test_leftover_actual_items_are_reported() {
    let e = [1.0, 2.0];
    let a = [2.0, 5.0, 1.0, 6.0];
    match check_same_items(Some(&e[..]), Some(&a[..]), close) {
        Err(ComparisonError::UnmatchedActual { count, first }) => {
            assert_eq!(count, 2);
            assert_eq!(first, 1);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_heterogeneous_items() {
    let labels = ["a", "bb", "ccc"];
    let lengths = [3usize, 1, 2];
    assert!(check_same_items(Some(&labels[..]), Some(&lengths[..]), |s, n| s.len() == *n).is_ok());
    assert!(check_sequence(Some(&labels[..]), Some(&lengths[..]), |s, n| s.len() == *n).is_err());
}

#[test]
fn test_partition_modes_over_relabelling() {
    let labels = ["x", "y", "x", "z", "y", "x"];
    let expected = IndexPartition::from_labels(&labels);

    // Same groups under different identifiers, discovered in another order
    let renamed = ["p", "q", "p", "r", "q", "p"];
    let relabelled = IndexPartition::from_labels(&renamed);
    assert!(check_partitions(Some(&expected), Some(&relabelled), PartitionMode::Ordered).is_err());
    assert!(check_partitions(Some(&expected), Some(&relabelled), PartitionMode::SameItems).is_err());
    assert!(check_partitions(Some(&expected), Some(&relabelled), PartitionMode::SameGroups).is_ok());

    // Same pairs, inserted in another order
    let mut reordered = IndexPartition::new();
    for id in ["z", "x", "y"] {
        let part = expected.get(&id).cloned().unwrap_or_default();
        reordered.insert(id, part).unwrap();
    }
    assert!(check_partitions(Some(&expected), Some(&reordered), PartitionMode::Ordered).is_err());
    assert!(check_partitions(Some(&expected), Some(&reordered), PartitionMode::SameItems).is_ok());
}

#[test]
fn test_ordered_partition_reports_part() {
    let mut e = IndexPartition::new();
    e.insert(0u32, IndexCollection::from_range(0..3)).unwrap();
    e.insert(1u32, IndexCollection::from_range(3..6)).unwrap();

    let mut a = IndexPartition::new();
    a.insert(0u32, IndexCollection::from_range(0..3)).unwrap();
    a.insert(1u32, [3, 4, 7].into_iter().collect()).unwrap();

    match check_partitions(Some(&e), Some(&a), PartitionMode::Ordered) {
        Err(ComparisonError::ValueMismatch { location, .. }) => {
            assert!(location.starts_with("part 1 "), "location was {location}")
        }
        other => panic!("unexpected result {other:?}"),
    }
}
