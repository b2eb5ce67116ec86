//! Goodness-of-fit checks run against real samplers.
//!
//! Every test uses a seeded generator and a significance of 1e-6, so a
//! correct sampler is never rejected by chance in practice.

use crate::test_helpers::{init_tracing, seeded_rng};
use numeq_rs::stats::special::normal_cdf;
use numeq_rs::stats::{
    check_frequencies, check_kolmogorov_smirnov, check_moments, draw_samples, ks_test,
};
use numeq_rs::{Comparer, ComparisonConfig, ComparisonError};
use rand::Rng;
use rand_distr::{Exp, Normal};

const SIGNIFICANCE: f64 = 1e-6;

#[test]
fn test_normal_sampler_passes() {
    init_tracing();
    let mut rng = seeded_rng(42);
    let normal = Normal::new(2.0, 0.5).unwrap();
    let samples = draw_samples(&mut rng, &normal, 5_000);

    assert!(check_kolmogorov_smirnov(&samples, |x| normal_cdf(x, 2.0, 0.5), SIGNIFICANCE).is_ok());
    assert!(check_moments(&samples, 2.0, 0.25, 0.1).is_ok());
}

#[test]
fn test_shifted_normal_is_rejected() {
    let mut rng = seeded_rng(43);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let samples = draw_samples(&mut rng, &normal, 5_000);

    match check_kolmogorov_smirnov(&samples, |x| normal_cdf(x, 0.5, 1.0), SIGNIFICANCE) {
        Err(ComparisonError::StatisticalRejection { statistic, p_value, .. }) => {
            assert!(statistic > 0.1);
            assert!(p_value < SIGNIFICANCE);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_exponential_through_comparer() {
    let mut rng = seeded_rng(44);
    let rate = 1.5;
    let samples = draw_samples(&mut rng, &Exp::new(rate).unwrap(), 5_000);
    let cdf = |x: f64| if x < 0.0 { 0.0 } else { 1.0 - (-rate * x).exp() };

    let comparer = Comparer::new(ComparisonConfig::default().significance(SIGNIFICANCE));
    assert!(comparer.distribution(&samples, cdf).is_ok());
    assert!(check_moments(&samples, 1.0 / rate, 1.0 / (rate * rate), 0.1).is_ok());

    // The same samples do not fit a rate twice as large
    let outcome = ks_test(&samples, |x: f64| 1.0 - (-2.0 * rate * x).exp()).unwrap();
    assert!(outcome.p_value < SIGNIFICANCE);
}

#[test]
fn test_die_frequencies() {
    let mut rng = seeded_rng(45);
    let fair = [1.0 / 6.0; 6];

    let rolls: Vec<usize> = (0..6_000).map(|_| rng.gen_range(0..6)).collect();
    assert!(check_frequencies(&rolls, &fair, SIGNIFICANCE).is_ok());

    let loaded: Vec<usize> = (0..6_000).map(|_| rng.gen_range(0..5)).collect();
    assert!(matches!(
        check_frequencies(&loaded, &fair, SIGNIFICANCE),
        Err(ComparisonError::StatisticalRejection { .. })
    ));
}

#[test]
fn test_outcome_outside_table() {
    assert!(matches!(
        check_frequencies(&[0, 1, 7], &[0.5, 0.5], SIGNIFICANCE),
        Err(ComparisonError::InvalidInput(_))
    ));
}
