//! A test suite that keeps its tolerances in a JSON file next to its
//! fixtures and runs every comparison through one [`Comparer`].

use ndarray::array;
use num_complex::Complex;
use numeq_rs::matrix::DenseMatrix;
use numeq_rs::partition::{IndexCollection, IndexPartition, PartitionMode};
use numeq_rs::{Comparer, ComparisonConfig, ComparisonError, StateSnapshot};
use std::path::PathBuf;

fn write_config(name: &str, text: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("numeq-{}-{}.json", std::process::id(), name));
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_config_file_drives_comparer() {
    let path = write_config(
        "loose",
        r#"{
            "delta": 1e-3,
            "nan_equals_nan": false,
            "check_names": false,
            "partition_mode": "SameGroups"
        }"#,
    );
    let config = ComparisonConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.delta, 1e-3);
    assert_eq!(config.significance, ComparisonConfig::default().significance);
    let comparer = Comparer::new(config);

    assert!(comparer.scalars(&1.0, &1.0005).is_ok());
    assert!(comparer.scalars(&Complex::new(1.0, 2.0), &Complex::new(1.0, 2.0005)).is_ok());
    assert!(comparer.scalars(&f64::NAN, &f64::NAN).is_err());
    assert!(comparer.slices(Some(&[1.0, 2.0][..]), Some(&[1.0, 2.002][..])).is_err());

    let named = DenseMatrix::from_ndarray(&array![[1.0, 2.0]]).with_name("weights");
    assert!(comparer.matrices(Some(&named), Some(&array![[1.0, 2.0001]])).is_ok());

    let mut e = IndexPartition::new();
    e.insert('a', IndexCollection::from_range(0..2)).unwrap();
    e.insert('b', IndexCollection::from_range(2..4)).unwrap();
    let mut a = IndexPartition::new();
    a.insert('c', IndexCollection::from_range(2..4)).unwrap();
    a.insert('d', IndexCollection::from_range(0..2)).unwrap();
    assert!(comparer.partitions(Some(&e), Some(&a)).is_ok());

    let strict = Comparer::new(comparer.config().clone().partition_mode(PartitionMode::Ordered));
    assert!(strict.partitions(Some(&e), Some(&a)).is_err());
}

#[test]
fn test_snapshots_and_frequencies() {
    let comparer = Comparer::new(ComparisonConfig::with_delta(1e-6).significance(1e-6));

    let e = StateSnapshot::new().with("mean", 0.5).with("label", "fit");
    let a = StateSnapshot::new().with("mean", 0.500_000_1).with("label", "fit");
    assert!(comparer.snapshots(&e, &a).is_ok());
    let extra = a.clone().with("converged", true);
    assert!(matches!(
        comparer.snapshots(&e, &extra),
        Err(ComparisonError::FieldMismatch { .. })
    ));

    assert!(comparer.frequencies(&[251, 249, 500], &[0.25, 0.25, 0.5]).is_ok());
    assert!(matches!(
        comparer.frequencies(&[500, 0, 500], &[0.25, 0.25, 0.5]),
        Err(ComparisonError::StatisticalRejection { .. })
    ));
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        ComparisonConfig::from_json_file("/no/such/dir/config.json"),
        Err(ComparisonError::IoError(_))
    ));
}
