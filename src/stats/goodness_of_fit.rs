//! # Goodness-of-Fit Checks
//!
//! Statistical checks for samplers: Pearson's chi-square test for discrete
//! outcomes and the one-sample Kolmogorov-Smirnov test for continuous
//! distributions. A check fails when the p-value falls below the chosen
//! significance level.

use super::special::{chi_square_sf, kolmogorov_sf};
use crate::error::{ComparisonError, Result};

/// Outcome of a goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// Test statistic
    pub statistic: f64,

    /// Probability of a statistic at least this extreme under the hypothesis
    pub p_value: f64,
}

/// Pearson's chi-square statistic `Σ (O - E)² / E`.
///
/// # Errors
///
/// * `ComparisonError::LengthMismatch` if the inputs differ in length
/// * `ComparisonError::InvalidInput` for a negative expected count
pub fn chi_square_statistic(observed: &[f64], expected: &[f64]) -> Result<f64> {
    if observed.len() != expected.len() {
        return Err(ComparisonError::LengthMismatch {
            kind: "frequency table",
            expected: expected.len(),
            actual: observed.len(),
        });
    }
    let mut statistic = 0.0;
    for (&o, &e) in observed.iter().zip(expected) {
        if e < 0.0 {
            return Err(ComparisonError::InvalidInput(format!(
                "negative expected count {}",
                e
            )));
        }
        if e == 0.0 {
            if o != 0.0 {
                // An outcome that should never happen did.
                return Ok(f64::INFINITY);
            }
            continue;
        }
        statistic += (o - e) * (o - e) / e;
    }
    Ok(statistic)
}

/// Run Pearson's chi-square test of `counts` against outcome probabilities.
///
/// Categories with zero probability do not add degrees of freedom.
pub fn chi_square_test(counts: &[u64], probabilities: &[f64]) -> Result<TestOutcome> {
    validate_probabilities(probabilities)?;
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return Err(ComparisonError::InvalidInput("no observations".to_string()));
    }
    let observed: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let expected: Vec<f64> = probabilities.iter().map(|p| p * total as f64).collect();
    let statistic = chi_square_statistic(&observed, &expected)?;

    let categories = probabilities.iter().filter(|&&p| p > 0.0).count();
    if categories < 2 {
        let p_value = if statistic.is_finite() { 1.0 } else { 0.0 };
        return Ok(TestOutcome { statistic, p_value });
    }
    let p_value = chi_square_sf(statistic, (categories - 1) as f64);
    tracing::trace!(statistic, p_value, "chi-square test");
    Ok(TestOutcome { statistic, p_value })
}

/// Check that `counts` are consistent with `probabilities`.
///
/// # Errors
///
/// * `ComparisonError::StatisticalRejection` if the p-value is below
///   `significance`
pub fn check_chi_square(counts: &[u64], probabilities: &[f64], significance: f64) -> Result<()> {
    let outcome = chi_square_test(counts, probabilities)?;
    reject_below("chi-square test", outcome, significance)
}

/// Check that integer outcomes drawn from a discrete sampler follow
/// `probabilities`, where outcome `k` has probability `probabilities[k]`.
///
/// # Errors
///
/// * `ComparisonError::InvalidInput` for an outcome outside the table
/// * `ComparisonError::StatisticalRejection` if the frequencies do not fit
pub fn check_frequencies(samples: &[usize], probabilities: &[f64], significance: f64) -> Result<()> {
    let mut counts = vec![0u64; probabilities.len()];
    for &s in samples {
        match counts.get_mut(s) {
            Some(c) => *c += 1,
            None => {
                return Err(ComparisonError::InvalidInput(format!(
                    "outcome {} outside {} categories",
                    s,
                    probabilities.len()
                )))
            }
        }
    }
    check_chi_square(&counts, probabilities, significance)
}

/// Kolmogorov-Smirnov statistic `D = sup |F_n(x) - F(x)|`.
pub fn ks_statistic<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max)
}

/// Run the one-sample Kolmogorov-Smirnov test of `samples` against `cdf`.
pub fn ks_test<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> Result<TestOutcome> {
    if samples.is_empty() {
        return Err(ComparisonError::InvalidInput("no observations".to_string()));
    }
    if samples.iter().any(|x| x.is_nan()) {
        return Err(ComparisonError::InvalidInput("NaN sample".to_string()));
    }
    let statistic = ks_statistic(samples, cdf);
    let sqrt_n = (samples.len() as f64).sqrt();
    let p_value = kolmogorov_sf((sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic);
    tracing::trace!(statistic, p_value, "Kolmogorov-Smirnov test");
    Ok(TestOutcome { statistic, p_value })
}

/// Check that `samples` are consistent with the distribution `cdf`.
///
/// # Errors
///
/// * `ComparisonError::StatisticalRejection` if the p-value is below
///   `significance`
pub fn check_kolmogorov_smirnov<F: Fn(f64) -> f64>(samples: &[f64], cdf: F, significance: f64) -> Result<()> {
    let outcome = ks_test(samples, cdf)?;
    reject_below("Kolmogorov-Smirnov test", outcome, significance)
}

fn validate_probabilities(probabilities: &[f64]) -> Result<()> {
    if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
        return Err(ComparisonError::InvalidInput(
            "probabilities must lie in [0, 1]".to_string(),
        ));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > 1e-9 {
        return Err(ComparisonError::InvalidInput(format!(
            "probabilities sum to {}, not 1",
            total
        )));
    }
    Ok(())
}

fn reject_below(test: &'static str, outcome: TestOutcome, significance: f64) -> Result<()> {
    if outcome.p_value >= significance {
        Ok(())
    } else {
        tracing::debug!(test, statistic = outcome.statistic, p_value = outcome.p_value, "sample rejected");
        Err(ComparisonError::StatisticalRejection {
            test,
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            significance,
        })
    }
}
