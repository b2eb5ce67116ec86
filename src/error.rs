use thiserror::Error;

/// Error types for the numeq-rs library.
///
/// Every comparer reports a failed comparison through one of these variants.
/// The `Display` text is the assertion message used by the panicking helpers
/// in [`crate::assert`].
#[derive(Error, Debug)]
pub enum ComparisonError {
    /// One side of the comparison is absent, the other is not.
    #[error("one {kind} is null, the other is not")]
    NullMismatch { kind: &'static str },

    /// Collections have different lengths.
    #[error("{kind}s have not the same length: expected {expected}, actual {actual}")]
    LengthMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Matrices or arrays have different shapes.
    #[error("{kind} shapes differ: expected {expected:?}, actual {actual:?}")]
    ShapeMismatch {
        kind: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Two values differ by more than the allowed tolerance.
    #[error("values differ at {location}: expected {expected}, actual {actual} (delta {delta})")]
    ValueMismatch {
        location: String,
        expected: String,
        actual: String,
        delta: f64,
    },

    /// Names, labels or identifiers differ.
    #[error("{what} differ: expected {expected:?}, actual {actual:?}")]
    NameMismatch {
        what: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// An expected item has no counterpart in the actual collection.
    #[error("expected item at position {position} has no matching actual item")]
    UnmatchedExpected { position: usize },

    /// Actual items were left over once every expected item was matched.
    #[error("{count} actual item(s) were not matched, first at position {first}")]
    UnmatchedActual { count: usize, first: usize },

    /// A state field is missing or differs.
    #[error("state field '{path}' differs: {message}")]
    FieldMismatch { path: String, message: String },

    /// A statistical check rejected the sample at the given significance.
    #[error("{test} rejected the sample: statistic {statistic}, p-value {p_value} < {significance}")]
    StatisticalRejection {
        test: &'static str,
        statistic: f64,
        p_value: f64,
        significance: f64,
    },

    /// Invalid input to a comparer.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for numeq-rs operations.
pub type Result<T> = std::result::Result<T, ComparisonError>;

impl ComparisonError {
    /// Build a value mismatch from displayable values.
    pub fn value_mismatch(
        location: impl Into<String>,
        expected: impl std::fmt::Debug,
        actual: impl std::fmt::Debug,
        delta: f64,
    ) -> Self {
        ComparisonError::ValueMismatch {
            location: location.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
            delta,
        }
    }

    /// Prefix the location of a value mismatch, used when a comparer
    /// delegates to a nested one (a row inside a jagged array, a column
    /// inside a matrix).
    pub fn within(self, outer: &str) -> Self {
        match self {
            ComparisonError::ValueMismatch {
                location,
                expected,
                actual,
                delta,
            } => ComparisonError::ValueMismatch {
                location: format!("{}{}", outer, location),
                expected,
                actual,
                delta,
            },
            ComparisonError::FieldMismatch { path, message } => ComparisonError::FieldMismatch {
                path: format!("{}{}", outer, path),
                message,
            },
            other => other,
        }
    }
}

impl serde::ser::Error for ComparisonError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ComparisonError::InvalidInput(msg.to_string())
    }
}

/// Check the absent/present invariant shared by all comparers.
///
/// Returns `Ok(None)` when both sides are absent, `Ok(Some(..))` with both
/// values when both are present, and an error otherwise.
pub fn both_present<'a, A: ?Sized, B: ?Sized>(
    kind: &'static str,
    expected: Option<&'a A>,
    actual: Option<&'a B>,
) -> Result<Option<(&'a A, &'a B)>> {
    match (expected, actual) {
        (None, None) => Ok(None),
        (Some(e), Some(a)) => Ok(Some((e, a))),
        _ => {
            tracing::debug!(kind, "absent/present mismatch");
            Err(ComparisonError::NullMismatch { kind })
        }
    }
}
