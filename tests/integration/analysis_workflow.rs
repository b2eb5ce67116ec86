//! Checks a small analysis pipeline end to end: grouping rows by a
//! categorical variable, decomposing a matrix and inspecting the state of
//! the object that did the work.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use numeq_rs::categorical::{check_data_sets, CategoricalDataSet, CategoricalVariable};
use numeq_rs::decomposition::{check_reconstruction, check_same_distances, check_svd_parts, SvdParts};
use numeq_rs::inspect::{check_field, check_fields, snapshot_of, FieldValue};
use numeq_rs::partition::{check_partitions, IndexPartition, PartitionMode};
use numeq_rs::{assert_approx_eq, ComparisonError, Inspect, StateSnapshot};
use serde::Serialize;

fn levels() -> CategoricalVariable {
    CategoricalVariable::new("dose")
        .with_category(0.0, "low")
        .and_then(|v| v.with_category(1.0, "high"))
        .unwrap()
}

fn data_set(labels: &[&str]) -> CategoricalDataSet {
    let mut set = CategoricalDataSet::new("trial", vec![levels()]);
    for label in labels {
        set.push_labels(&[*label]).unwrap();
    }
    set
}

#[test]
fn test_grouping_by_category() {
    let labels = ["low", "high", "high", "low", "high"];
    let set = data_set(&labels);
    let codes: Vec<f64> = set.rows().iter().map(|row| row[0]).collect();
    assert_eq!(codes, vec![0.0, 1.0, 1.0, 0.0, 1.0]);

    let groups = IndexPartition::from_labels(&labels);
    let mut expected = IndexPartition::new();
    expected.insert("high", [1, 2, 4].into_iter().collect()).unwrap();
    expected.insert("low", [0, 3].into_iter().collect()).unwrap();
    assert!(check_partitions(Some(&expected), Some(&groups), PartitionMode::SameItems).is_ok());
    assert!(check_partitions(Some(&expected), Some(&groups), PartitionMode::Ordered).is_err());

    let same = data_set(&labels);
    assert!(check_data_sets(Some(&set), Some(&same), 0.0).is_ok());
    let other = data_set(&["low", "high", "low", "low", "high"]);
    match check_data_sets(Some(&set), Some(&other), 0.0) {
        Err(ComparisonError::ValueMismatch { location, .. }) => assert_eq!(location, "row 2 [0]"),
        result => panic!("unexpected result {result:?}"),
    }
}

fn svd_of(m: &DMatrix<f64>) -> SvdParts {
    let svd = m.clone().svd(true, true);
    let u = svd.u.expect("left singular vectors");
    let vt = svd.v_t.expect("right singular vectors");
    SvdParts::new(
        Array2::from_shape_fn((u.nrows(), u.ncols()), |(i, j)| u[(i, j)]),
        Array1::from_iter(svd.singular_values.iter().copied()),
        Array2::from_shape_fn((vt.nrows(), vt.ncols()), |(i, j)| vt[(i, j)]),
    )
    .unwrap()
}

#[test]
fn test_decomposition_up_to_sign() {
    let m = DMatrix::from_row_slice(3, 2, &[3.0, 1.0, 1.0, 3.0, 0.0, 2.0]);
    let parts = svd_of(&m);
    assert!(check_reconstruction(&m, &parts, 1e-10).is_ok());

    // Flipping one component on both sides describes the same decomposition
    let (mut u, s, mut vt) = parts.clone().into_parts();
    u.column_mut(0).mapv_inplace(|v| -v);
    vt.row_mut(0).mapv_inplace(|v| -v);
    let flipped = SvdParts::new(u, s, vt).unwrap();
    assert!(check_svd_parts(&parts, &flipped, 1e-10).is_ok());
    assert!(check_reconstruction(&m, &flipped, 1e-10).is_ok());

    // Flipping only the left vector does not
    let (mut u, s, vt) = parts.clone().into_parts();
    u.column_mut(0).mapv_inplace(|v| -v);
    let broken = SvdParts::new(u, s, vt).unwrap();
    assert!(check_svd_parts(&parts, &broken, 1e-10).is_err());
    assert!(check_reconstruction(&m, &broken, 1e-10).is_err());
}

#[test]
fn test_scaling_coordinates_up_to_rotation() {
    let points = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 2.0]);
    let angle: f64 = 0.7;
    let rotation = DMatrix::from_row_slice(2, 2, &[angle.cos(), -angle.sin(), angle.sin(), angle.cos()]);
    let moved = (&points * rotation).add_scalar(5.0);
    assert!(check_same_distances(&points, &moved, 1e-10).is_ok());

    let stretched = &points * 2.0;
    assert!(check_same_distances(&points, &stretched, 1e-10).is_err());
}

#[derive(Serialize)]
struct Options {
    max_iterations: u32,
    tolerance: f64,
}

#[derive(Serialize)]
struct Smoother {
    name: String,
    weights: Vec<f64>,
    options: Options,
    #[serde(skip)]
    calls: usize,
}

impl Inspect for Smoother {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new()
            .with("name", self.name.as_str())
            .with("weights", self.weights.clone())
            .with("calls", self.calls as i64)
    }
}

#[test]
fn test_inspecting_private_state() {
    let smoother = Smoother {
        name: "box".to_string(),
        weights: vec![1.0 / 3.0; 3],
        options: Options {
            max_iterations: 10,
            tolerance: 1e-8,
        },
        calls: 2,
    };

    let serialized = snapshot_of(&smoother).unwrap();
    assert!(check_field(&serialized, "options.max_iterations", &FieldValue::Integer(10), 0.0).is_ok());
    assert!(check_field(&serialized, "options.tolerance", &FieldValue::Real(1e-8), 1e-20).is_ok());
    assert!(check_field(&serialized, "weights.1", &FieldValue::Real(0.333_333_333_3), 1e-9).is_ok());
    assert!(serialized.field("calls").is_none());

    let published = smoother.snapshot();
    let expected = StateSnapshot::new().with("calls", 2i64).with("weights", vec![1.0 / 3.0; 3]);
    assert!(check_fields(&expected, &published, 1e-12).is_ok());

    match check_fields(&expected.with("calls", 3i64), &published, 0.0) {
        Err(ComparisonError::FieldMismatch { path, .. }) => assert_eq!(path, "calls"),
        result => panic!("unexpected result {result:?}"),
    }

    assert_approx_eq!(smoother.weights.iter().sum::<f64>(), 1.0);
}
