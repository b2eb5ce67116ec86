//! # Statistical Checks
//!
//! Checks for code that draws random samples: sample moments against their
//! theoretical values, and goodness-of-fit tests against a distribution.
//!
//! - [`SampleSummary`]: count, mean and variances of a sample
//! - [`check_moments`]: sample mean and variance within a relative tolerance
//! - [`check_chi_square`] / [`check_frequencies`]: discrete samplers
//! - [`check_kolmogorov_smirnov`]: continuous samplers
//!
//! ## Example Usage
//!
//! ```rust
//! use numeq_rs::stats::{check_kolmogorov_smirnov, draw_samples};
//! use rand::distributions::Uniform;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let samples = draw_samples(&mut rng, &Uniform::new(0.0, 1.0), 2000);
//! assert!(check_kolmogorov_smirnov(&samples, |x| x.clamp(0.0, 1.0), 1e-6).is_ok());
//! ```

mod goodness_of_fit;
pub mod special;

pub use goodness_of_fit::{
    check_chi_square, check_frequencies, check_kolmogorov_smirnov, chi_square_statistic,
    chi_square_test, ks_statistic, ks_test, TestOutcome,
};

use crate::error::{ComparisonError, Result};
use rand::distributions::Distribution;
use rand::Rng;

/// Basic statistics of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Number of samples
    pub count: usize,

    /// Arithmetic mean
    pub mean: f64,

    /// Population variance `Σ(x - mean)² / n`
    pub population_variance: f64,

    /// Sample variance `Σ(x - mean)² / (n - 1)`, NaN for a single sample
    pub sample_variance: f64,
}

impl SampleSummary {
    /// Summarize `samples`.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if `samples` is empty
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(ComparisonError::InvalidInput("no samples".to_string()));
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let ss: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
        let sample_variance = if samples.len() > 1 { ss / (n - 1.0) } else { f64::NAN };
        Ok(Self {
            count: samples.len(),
            mean,
            population_variance: ss / n,
            sample_variance,
        })
    }

    /// Standard deviation from the sample variance.
    pub fn std_dev(&self) -> f64 {
        self.sample_variance.sqrt()
    }
}

/// Check the sample mean and sample variance against theoretical values.
///
/// A value passes when `|actual - expected| <= tolerance * |expected|`, or
/// `|actual - expected| <= tolerance` when `expected` is zero.
pub fn check_moments(samples: &[f64], mean: f64, variance: f64, tolerance: f64) -> Result<()> {
    let summary = SampleSummary::from_samples(samples)?;
    check_relative("sample mean", mean, summary.mean, tolerance)?;
    check_relative("sample variance", variance, summary.sample_variance, tolerance)
}

fn check_relative(what: &str, expected: f64, actual: f64, tolerance: f64) -> Result<()> {
    let allowed = if expected == 0.0 {
        tolerance
    } else {
        tolerance * expected.abs()
    };
    if (actual - expected).abs() <= allowed {
        Ok(())
    } else {
        tracing::debug!(what, expected, actual, allowed, "moment outside tolerance");
        Err(ComparisonError::value_mismatch(what, expected, actual, allowed))
    }
}

/// Draw `n` samples from `distribution`.
pub fn draw_samples<R, D>(rng: &mut R, distribution: &D, n: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
    D: Distribution<f64>,
{
    distribution.sample_iter(rng).take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary() {
        let s = SampleSummary::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_relative_eq!(s.mean, 2.5, epsilon = 1e-12);
        assert_relative_eq!(s.population_variance, 1.25, epsilon = 1e-12);
        assert_relative_eq!(s.sample_variance, 5.0 / 3.0, epsilon = 1e-12);
        assert!(SampleSummary::from_samples(&[]).is_err());
        assert!(SampleSummary::from_samples(&[1.0]).unwrap().sample_variance.is_nan());
    }

    #[test]
    fn test_check_moments() {
        let samples = [9.0, 11.0, 9.0, 11.0];
        // mean 10, sample variance 4/3
        assert!(check_moments(&samples, 10.0, 4.0 / 3.0, 0.01).is_ok());
        assert!(check_moments(&samples, 10.5, 4.0 / 3.0, 0.01).is_err());
        assert!(check_moments(&samples, 10.0, 1.0, 0.01).is_err());
    }

    #[test]
    fn test_zero_expected_uses_absolute_tolerance() {
        let samples = [-0.001, 0.001, 0.0];
        assert!(check_moments(&samples, 0.0, 1e-6, 0.01).is_ok());
    }
}
