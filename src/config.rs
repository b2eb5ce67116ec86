//! Configuration options for the comparers.
//!
//! This module defines [`ComparisonConfig`], the tolerance and mode settings
//! shared by a test suite, and [`Comparer`], which runs the comparers of this
//! crate with one configuration. Configurations can be loaded from JSON so
//! that a suite keeps its tolerances next to its fixtures.

use crate::error::Result;
use crate::inspect::{check_snapshots_tol, StateSnapshot};
use crate::matrix::{check_matrices_tol, MatrixLike};
use crate::partition::{check_partitions, IndexPartition, PartitionMode};
use crate::scalar::{check_scalar_tol, ApproxEq, Tolerance};
use crate::stats::{check_chi_square, check_kolmogorov_smirnov};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

/// Configuration options for the comparers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Maximum allowed absolute difference. Default: 1e-10
    pub delta: f64,

    /// Whether NaN compares equal to NaN. Default: true
    pub nan_equals_nan: bool,

    /// Whether matrix names and row/column names are compared. Default: true
    pub check_names: bool,

    /// How partitions are compared. Default: Ordered
    pub partition_mode: PartitionMode,

    /// Significance level of the statistical checks. Default: 0.01
    pub significance: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            delta: 1e-10,
            nan_equals_nan: true,
            check_names: true,
            partition_mode: PartitionMode::default(),
            significance: 0.01,
        }
    }
}

impl ComparisonConfig {
    /// Default configuration with absolute tolerance `delta`.
    pub fn with_delta(delta: f64) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }

    /// Set whether NaN compares equal to NaN.
    pub fn nan_equals_nan(mut self, value: bool) -> Self {
        self.nan_equals_nan = value;
        self
    }

    /// Set whether matrix metadata is compared.
    pub fn check_names(mut self, value: bool) -> Self {
        self.check_names = value;
        self
    }

    /// Set the partition comparison mode.
    pub fn partition_mode(mut self, mode: PartitionMode) -> Self {
        self.partition_mode = mode;
        self
    }

    /// Set the significance level of the statistical checks.
    pub fn significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    /// The scalar tolerance described by this configuration.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            delta: self.delta,
            nan_equals_nan: self.nan_equals_nan,
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Runs the comparers of this crate with one [`ComparisonConfig`].
#[derive(Debug, Clone, Default)]
pub struct Comparer {
    config: ComparisonConfig,
}

impl Comparer {
    /// Create a comparer using `config` for every comparison.
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compare two scalars.
    pub fn scalars<T: ApproxEq>(&self, expected: &T, actual: &T) -> Result<()> {
        check_scalar_tol(expected, actual, &self.config.tolerance())
    }

    /// Compare two optional slices.
    pub fn slices<T: ApproxEq>(&self, expected: Option<&[T]>, actual: Option<&[T]>) -> Result<()> {
        crate::array::check_slices_tol(expected, actual, &self.config.tolerance())
    }

    /// Compare two optional matrices, including metadata when configured.
    pub fn matrices<T, A, B>(&self, expected: Option<&A>, actual: Option<&B>) -> Result<()>
    where
        T: ApproxEq + Copy,
        A: MatrixLike<T> + ?Sized,
        B: MatrixLike<T> + ?Sized,
    {
        check_matrices_tol(expected, actual, &self.config.tolerance(), self.config.check_names)
    }

    /// Compare two optional partitions in the configured mode.
    pub fn partitions<Id: PartialEq + Clone + Debug>(
        &self,
        expected: Option<&IndexPartition<Id>>,
        actual: Option<&IndexPartition<Id>>,
    ) -> Result<()> {
        check_partitions(expected, actual, self.config.partition_mode)
    }

    /// Compare two state snapshots.
    pub fn snapshots(&self, expected: &StateSnapshot, actual: &StateSnapshot) -> Result<()> {
        check_snapshots_tol(expected, actual, &self.config.tolerance())
    }

    /// Chi-square test at the configured significance.
    pub fn frequencies(&self, counts: &[u64], probabilities: &[f64]) -> Result<()> {
        check_chi_square(counts, probabilities, self.config.significance)
    }

    /// Kolmogorov-Smirnov test at the configured significance.
    pub fn distribution<F: Fn(f64) -> f64>(&self, samples: &[f64], cdf: F) -> Result<()> {
        check_kolmogorov_smirnov(samples, cdf, self.config.significance)
    }
}
