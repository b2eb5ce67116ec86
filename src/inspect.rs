//! # State Inspection
//!
//! Tests sometimes need to verify internal state that a type does not expose
//! through its public API. Instead of reading private fields at run time,
//! types publish a [`StateSnapshot`]: either by implementing [`Inspect`] by
//! hand, or, for any `serde::Serialize` type, through [`snapshot_of`].
//!
//! Snapshots are ordered maps from field name to [`FieldValue`]. Nested
//! structures become nested snapshots and are addressed with dotted paths
//! such as `"options.max_iterations"` or `"points.2"`.
//!
//! Snapshots can be stored as JSON fixtures. JSON has no NaN or infinity, so
//! non-finite reals are written as the strings `"NaN"`, `"inf"` and `"-inf"`
//! and read back as reals (a text field holding one of these strings reads
//! back as a real too).
//!
//! ## Example Usage
//!
//! ```rust
//! use numeq_rs::inspect::{check_field, snapshot_of, FieldValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Sampler {
//!     seed: u64,
//!     weights: Vec<f64>,
//! }
//!
//! let sampler = Sampler { seed: 42, weights: vec![0.25, 0.75] };
//! let snapshot = snapshot_of(&sampler).unwrap();
//!
//! assert!(check_field(&snapshot, "seed", &FieldValue::Integer(42), 0.0).is_ok());
//! assert!(check_field(&snapshot, "weights", &FieldValue::Reals(vec![0.25, 0.75]), 1e-12).is_ok());
//! ```

mod ser;

use crate::array::check_slices_tol;
use crate::error::{ComparisonError, Result};
use crate::scalar::{ApproxEq, Tolerance};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Value of a single inspected field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value (`None`, null)
    Absent,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// Homogeneous numeric array
    Reals(Vec<f64>),
    /// Array of other values
    List(Vec<FieldValue>),
    Nested(StateSnapshot),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Bool(_) => "bool",
            FieldValue::Integer(_) => "integer",
            FieldValue::Real(_) => "real",
            FieldValue::Text(_) => "text",
            FieldValue::Reals(_) => "reals",
            FieldValue::List(_) => "list",
            FieldValue::Nested(_) => "nested",
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// `Reals` when every item is a number (an empty sequence included),
    /// `List` otherwise.
    fn sequence(items: Vec<FieldValue>) -> Self {
        let reals: Option<Vec<f64>> = items
            .iter()
            .map(|item| match item {
                FieldValue::Real(r) => Some(*r),
                FieldValue::Integer(i) => Some(*i as f64),
                _ => None,
            })
            .collect();
        match reals {
            Some(values) => FieldValue::Reals(values),
            None => FieldValue::List(items),
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                // u64 beyond i64 and floats
                None => FieldValue::Real(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => match non_finite_from_tag(&s) {
                Some(r) => FieldValue::Real(r),
                None => FieldValue::Text(s),
            },
            Value::Array(items) => {
                FieldValue::sequence(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(map) => FieldValue::Nested(StateSnapshot {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json(v)))
                    .collect(),
            }),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Absent => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Real(r) => real_to_json(*r),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Reals(rs) => Value::Array(rs.iter().map(|r| real_to_json(*r)).collect()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Nested(snapshot) => snapshot.to_json(),
        }
    }
}

/// serde_json writes non-finite floats as `null`; these get a string tag.
fn real_to_json(r: f64) -> Value {
    if r.is_nan() {
        Value::String("NaN".to_string())
    } else if r == f64::INFINITY {
        Value::String("inf".to_string())
    } else if r == f64::NEG_INFINITY {
        Value::String("-inf".to_string())
    } else {
        Value::from(r)
    }
}

fn non_finite_from_tag(tag: &str) -> Option<f64> {
    match tag {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Real(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        FieldValue::Reals(v)
    }
}

/// Named field values of an object, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    fields: BTreeMap<String, FieldValue>,
}

impl StateSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Record a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value at a dotted `path`. Numeric segments index into lists and
    /// numeric arrays (the latter yield a `Real`).
    pub fn field(&self, path: &str) -> Option<FieldValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?.clone();
        for segment in segments {
            current = match current {
                FieldValue::Nested(snapshot) => snapshot.fields.get(segment)?.clone(),
                FieldValue::List(items) => items.get(segment.parse::<usize>().ok()?)?.clone(),
                FieldValue::Reals(values) => {
                    FieldValue::Real(*values.get(segment.parse::<usize>().ok()?)?)
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the snapshot has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON representation, for storing snapshots as test fixtures.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Parse a snapshot from a JSON object.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::JsonError` if the text is not valid JSON
    /// * `ComparisonError::InvalidInput` if it is not a JSON object
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        Self::from_field(FieldValue::from_json(value))
    }

    fn from_field(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Nested(snapshot) => Ok(snapshot),
            other => Err(ComparisonError::InvalidInput(format!(
                "a snapshot needs an object, got {}",
                other.kind()
            ))),
        }
    }
}

/// Types that publish their internal state for tests.
pub trait Inspect {
    /// Capture the current state.
    fn snapshot(&self) -> StateSnapshot;
}

/// Capture the state of any serializable value.
///
/// Reals are kept as they are, NaN and infinities included.
///
/// # Errors
///
/// * `ComparisonError::InvalidInput` if serialization fails or the value
///   does not serialize to a map (e.g. a bare number)
pub fn snapshot_of<T: Serialize + ?Sized>(value: &T) -> Result<StateSnapshot> {
    StateSnapshot::from_field(value.serialize(ser::FieldSerializer)?)
}

/// Check one field of a snapshot.
///
/// Reals are compared with the scalar rule; integers and reals compare
/// numerically with each other.
///
/// # Errors
///
/// * `ComparisonError::FieldMismatch` if the field is missing or differs
pub fn check_field(snapshot: &StateSnapshot, path: &str, expected: &FieldValue, delta: f64) -> Result<()> {
    check_field_tol(snapshot, path, expected, &Tolerance::new(delta))
}

/// [`check_field`] under an explicit [`Tolerance`].
pub fn check_field_tol(
    snapshot: &StateSnapshot,
    path: &str,
    expected: &FieldValue,
    tol: &Tolerance,
) -> Result<()> {
    let actual = snapshot.field(path).ok_or_else(|| ComparisonError::FieldMismatch {
        path: path.to_string(),
        message: "field is missing".to_string(),
    })?;
    check_values(path, expected, &actual, tol, true)
}

/// Check that two snapshots have the same fields with matching values.
pub fn check_snapshots(expected: &StateSnapshot, actual: &StateSnapshot, delta: f64) -> Result<()> {
    check_snapshots_tol(expected, actual, &Tolerance::new(delta))
}

/// [`check_snapshots`] under an explicit [`Tolerance`].
pub fn check_snapshots_tol(expected: &StateSnapshot, actual: &StateSnapshot, tol: &Tolerance) -> Result<()> {
    check_snapshot_at("", expected, actual, tol, true)
}

/// Check only the fields present in `expected`, at every nesting level;
/// extra fields of `actual` are ignored.
pub fn check_fields(expected: &StateSnapshot, actual: &StateSnapshot, delta: f64) -> Result<()> {
    check_fields_tol(expected, actual, &Tolerance::new(delta))
}

/// [`check_fields`] under an explicit [`Tolerance`].
pub fn check_fields_tol(expected: &StateSnapshot, actual: &StateSnapshot, tol: &Tolerance) -> Result<()> {
    check_snapshot_at("", expected, actual, tol, false)
}

fn check_snapshot_at(
    prefix: &str,
    expected: &StateSnapshot,
    actual: &StateSnapshot,
    tol: &Tolerance,
    strict: bool,
) -> Result<()> {
    for (name, e) in &expected.fields {
        let path = join(prefix, name);
        match actual.fields.get(name) {
            Some(a) => check_values(&path, e, a, tol, strict)?,
            None => {
                return Err(ComparisonError::FieldMismatch {
                    path,
                    message: "field is missing".to_string(),
                })
            }
        }
    }
    if strict {
        if let Some(extra) = actual.fields.keys().find(|k| !expected.fields.contains_key(*k)) {
            return Err(ComparisonError::FieldMismatch {
                path: join(prefix, extra),
                message: "unexpected field".to_string(),
            });
        }
    }
    Ok(())
}

fn check_values(
    path: &str,
    expected: &FieldValue,
    actual: &FieldValue,
    tol: &Tolerance,
    strict: bool,
) -> Result<()> {
    let mismatch = |message: String| {
        tracing::debug!(path, %message, "state field mismatch");
        Err(ComparisonError::FieldMismatch {
            path: path.to_string(),
            message,
        })
    };

    if let (FieldValue::Integer(e), FieldValue::Integer(a)) = (expected, actual) {
        return if e.approx_eq_tol(a, tol) {
            Ok(())
        } else {
            mismatch(format!("expected {}, actual {} (delta {})", e, a, tol.delta))
        };
    }
    if let (Some(e), Some(a)) = (expected.as_real(), actual.as_real()) {
        return if e.approx_eq_tol(&a, tol) {
            Ok(())
        } else {
            mismatch(format!("expected {}, actual {} (delta {})", e, a, tol.delta))
        };
    }

    match (expected, actual) {
        (FieldValue::Reals(e), FieldValue::Reals(a)) => {
            check_slices_tol(Some(&e[..]), Some(&a[..]), tol).or_else(|err| mismatch(err.to_string()))
        }
        (FieldValue::Reals(r), FieldValue::List(l)) | (FieldValue::List(l), FieldValue::Reals(r))
            if r.is_empty() && l.is_empty() =>
        {
            Ok(())
        }
        (FieldValue::List(e), FieldValue::List(a)) => {
            if e.len() != a.len() {
                return mismatch(format!("expected {} items, actual {}", e.len(), a.len()));
            }
            for (i, (ei, ai)) in e.iter().zip(a).enumerate() {
                check_values(&join(path, &i.to_string()), ei, ai, tol, strict)?;
            }
            Ok(())
        }
        (FieldValue::Nested(e), FieldValue::Nested(a)) => check_snapshot_at(path, e, a, tol, strict),
        (e, a) if e.kind() != a.kind() => {
            mismatch(format!("expected {} value, actual {} value", e.kind(), a.kind()))
        }
        (e, a) if e == a => Ok(()),
        (e, a) => mismatch(format!("expected {:?}, actual {:?}", e, a)),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
