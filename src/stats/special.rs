//! Special functions needed by the goodness-of-fit checks.
//!
//! The gamma, error and distribution functions come from `statrs`; the
//! Kolmogorov distribution, which `statrs` does not provide, is summed here.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use statrs::function::{erf as statrs_erf, gamma};

/// Natural logarithm of the gamma function.
pub fn ln_gamma(x: f64) -> f64 {
    gamma::ln_gamma(x)
}

/// Upper regularized incomplete gamma function `Q(a, x)`.
///
/// Returns NaN for `a <= 0` or `x < 0`.
pub fn gamma_q(a: f64, x: f64) -> f64 {
    if a <= 0.0 || x < 0.0 || a.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }
    gamma::gamma_ur(a, x)
}

/// Lower regularized incomplete gamma function `P(a, x)`.
pub fn gamma_p(a: f64, x: f64) -> f64 {
    1.0 - gamma_q(a, x)
}

/// Error function.
pub fn erf(x: f64) -> f64 {
    statrs_erf::erf(x)
}

/// Cumulative distribution function of the normal distribution.
///
/// Returns NaN when `std_dev` is not positive.
pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev).map_or(f64::NAN, |n| n.cdf(x))
}

/// Survival function of the chi-square distribution with `dof` degrees of
/// freedom: the probability of a statistic at least as large as `x`.
///
/// Returns NaN when `dof` is not positive.
pub fn chi_square_sf(x: f64, dof: f64) -> f64 {
    if x <= 0.0 {
        return if dof > 0.0 { 1.0 } else { f64::NAN };
    }
    ChiSquared::new(dof).map_or(f64::NAN, |d| d.sf(x))
}

/// Survival function of the Kolmogorov distribution,
/// `Q(λ) = 2 Σ (-1)^(j-1) exp(-2 j² λ²)`.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let a2 = -2.0 * lambda * lambda;
    let mut fac = 2.0;
    let mut sum = 0.0;
    let mut prev_term: f64 = 0.0;
    for j in 1..=100 {
        let term = fac * (a2 * (j * j) as f64).exp();
        sum += term;
        if term.abs() <= 1e-3 * prev_term.abs() || term.abs() <= 1e-8 * sum.abs() {
            return sum.clamp(0.0, 1.0);
        }
        fac = -fac;
        prev_term = term;
    }
    // No convergence: λ is small enough that the fit is certain.
    1.0
}
