//! Pooled two-sample Student's t-test.
//!
//! Assumes equal population variances:
//!
//! ```text
//! s²ₚ = ((n_A − 1)·s²_A + (n_B − 1)·s²_B) / (n_A + n_B − 2)
//! t   = (x̄_A − x̄_B) / √(s²ₚ · (1/n_A + 1/n_B))
//! ν   = n_A + n_B − 2
//! ```
//!
//! The critical value is the one-tailed `1 − α` quantile of t(ν), while
//! the decision compares it against `|t|`.

use tracing::{debug, info};

use super::{Decision, Hypotheses, TestKind, TestResult};
use crate::config::TTestConfig;
use crate::dataset::Dataset;
use crate::distributions::StudentT;
use crate::error::{Error, Result};
use crate::stats;

/// Each group needs `n − 1 > 0` for its sample variance.
pub const MIN_GROUP_SIZE: usize = 2;

/// Intermediate quantities of a pooled t statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct TTestSummary {
    pub n_a: usize,
    pub n_b: usize,
    pub mean_a: f64,
    pub mean_b: f64,
    pub variance_a: f64,
    pub variance_b: f64,
    pub pooled_variance: f64,
    pub degrees_of_freedom: usize,
    pub statistic: f64,
}

/// Computes the pooled t statistic for samples `a` and `b`.
///
/// # Errors
/// - [`Error::InsufficientData`] if either sample has fewer than two
///   values (or holds a non-finite value).
/// - [`Error::DegenerateVariance`] if the pooled variance is zero or
///   overflows, or the statistic is not finite.
///
/// # Examples
/// ```
/// use u_hypotest::hypothesis::pooled_t_statistic;
/// let s = pooled_t_statistic(&[30.0, 40.0, 50.0], &[20.0, 30.0]).unwrap();
/// assert_eq!(s.degrees_of_freedom, 3);
/// assert!((s.statistic - 1.8).abs() < 1e-12);
/// ```
pub fn pooled_t_statistic(a: &[f64], b: &[f64]) -> Result<TTestSummary> {
    let (mean_a, variance_a) = moments(a, "group A")?;
    let (mean_b, variance_b) = moments(b, "group B")?;

    let (n_a, n_b) = (a.len(), b.len());
    let degrees_of_freedom = n_a + n_b - 2;
    let weighted = (n_a - 1) as f64 * variance_a + (n_b - 1) as f64 * variance_b;
    let pooled_variance = weighted / degrees_of_freedom as f64;
    if !(pooled_variance > 0.0 && pooled_variance.is_finite()) {
        return Err(Error::DegenerateVariance);
    }

    let standard_error = (pooled_variance * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    let statistic = (mean_a - mean_b) / standard_error;
    if !(standard_error > 0.0 && standard_error.is_finite() && statistic.is_finite()) {
        return Err(Error::DegenerateVariance);
    }

    Ok(TTestSummary {
        n_a,
        n_b,
        mean_a,
        mean_b,
        variance_a,
        variance_b,
        pooled_variance,
        degrees_of_freedom,
        statistic,
    })
}

fn moments(sample: &[f64], group: &str) -> Result<(f64, f64)> {
    let insufficient = || Error::InsufficientData {
        group: group.to_string(),
        got: sample.len(),
        min: MIN_GROUP_SIZE,
    };
    let mean = stats::mean(sample).ok_or_else(insufficient)?;
    let variance = stats::variance(sample).ok_or_else(insufficient)?;
    Ok((mean, variance))
}

/// Tests whether mean age differs between the two device groups named in
/// `config`.
///
/// H₀: no mean age difference. Rejected when `|t| > t_{1−α}(ν)`.
///
/// # Errors
/// [`Error::InsufficientData`] names the device whose group is too small.
pub fn two_sample_t_test(dataset: &Dataset, config: &TTestConfig) -> Result<TestResult> {
    config.validate()?;

    let ages_a = dataset.ages_for_device(&config.group_a);
    let ages_b = dataset.ages_for_device(&config.group_b);
    for (group, ages) in [(&config.group_a, &ages_a), (&config.group_b, &ages_b)] {
        if ages.len() < MIN_GROUP_SIZE {
            return Err(Error::InsufficientData {
                group: group.clone(),
                got: ages.len(),
                min: MIN_GROUP_SIZE,
            });
        }
    }

    let summary = pooled_t_statistic(&ages_a, &ages_b)?;
    debug!(
        group_a = %config.group_a,
        group_b = %config.group_b,
        n_a = summary.n_a,
        n_b = summary.n_b,
        mean_a = summary.mean_a,
        mean_b = summary.mean_b,
        variance_a = summary.variance_a,
        variance_b = summary.variance_b,
        pooled_variance = summary.pooled_variance,
        "t-test group summary"
    );

    let alpha = config.significance_level;
    let critical_value = StudentT::new(summary.degrees_of_freedom as f64)?
        .quantile(1.0 - alpha)
        .ok_or_else(|| Error::InvalidConfig(format!("no t quantile for α = {alpha}")))?;

    let decision = if summary.statistic.abs() > critical_value {
        Decision::Reject
    } else {
        Decision::FailToReject
    };
    info!(
        statistic = summary.statistic,
        critical_value,
        df = summary.degrees_of_freedom,
        ?decision,
        "t-test complete"
    );

    Ok(TestResult {
        kind: TestKind::StudentT,
        hypotheses: Hypotheses {
            null: format!(
                "There is NO significant age difference between {} and {} users",
                config.group_a, config.group_b
            ),
            alternative: format!(
                "There is SIGNIFICANT age difference between {} and {} users",
                config.group_a, config.group_b
            ),
        },
        significance_level: alpha,
        degrees_of_freedom: summary.degrees_of_freedom,
        critical_value,
        statistic: summary.statistic,
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::UserRecord;

    fn dataset(smart_tv: &[f64], laptop: &[f64]) -> Dataset {
        let tv = smart_tv
            .iter()
            .map(|&age| UserRecord::new(age, "Smart TV", "Spain"));
        let lp = laptop
            .iter()
            .map(|&age| UserRecord::new(age, "Laptop", "Spain"));
        Dataset::from_records(tv.chain(lp).collect())
    }

    #[test]
    fn test_hand_computed_equal_means() {
        let s = pooled_t_statistic(&[30.0, 40.0], &[20.0, 50.0]).unwrap();
        assert_eq!(s.mean_a, 35.0);
        assert_eq!(s.mean_b, 35.0);
        assert_eq!(s.variance_a, 50.0);
        assert_eq!(s.variance_b, 450.0);
        assert_eq!(s.pooled_variance, 250.0);
        assert_eq!(s.degrees_of_freedom, 2);
        assert_eq!(s.statistic, 0.0);
    }

    #[test]
    fn test_hand_computed_unequal_means() {
        // x̄ = 40 / 25, s² = 100 / 50, s²ₚ = 250/3, SE = √(250/3 · 5/6) = 25/3
        let s = pooled_t_statistic(&[30.0, 40.0, 50.0], &[20.0, 30.0]).unwrap();
        assert!((s.mean_a - 40.0).abs() < 1e-12);
        assert!((s.mean_b - 25.0).abs() < 1e-12);
        assert!((s.pooled_variance - 250.0 / 3.0).abs() < 1e-10);
        assert!((s.statistic - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_too_small_sample() {
        let err = pooled_t_statistic(&[30.0], &[20.0, 50.0]).unwrap_err();
        assert!(
            matches!(err, Error::InsufficientData { got: 1, min: 2, .. }),
            "{err}"
        );
        assert!(pooled_t_statistic(&[30.0, 31.0], &[]).is_err());
    }

    #[test]
    fn test_zero_pooled_variance() {
        let err = pooled_t_statistic(&[30.0, 30.0], &[40.0, 40.0, 40.0]).unwrap_err();
        assert!(matches!(err, Error::DegenerateVariance), "{err}");
    }

    #[test]
    fn test_overflowing_variance_is_degenerate() {
        // means differ by 1e200 but the squared deviations overflow
        let smart_tv = [1e200, 2e200, 3e200];
        let laptop = [2e200, 3e200, 4e200];
        let err = pooled_t_statistic(&smart_tv, &laptop).unwrap_err();
        assert!(matches!(err, Error::DegenerateVariance), "{err}");

        let ds = dataset(&smart_tv, &laptop);
        assert!(matches!(
            two_sample_t_test(&ds, &TTestConfig::default()),
            Err(Error::DegenerateVariance)
        ));
    }

    #[test]
    fn test_result_fields() {
        let ds = dataset(&[30.0, 40.0], &[20.0, 50.0]);
        let result = two_sample_t_test(&ds, &TTestConfig::default()).unwrap();
        assert_eq!(result.kind, TestKind::StudentT);
        assert_eq!(result.degrees_of_freedom, 2);
        assert_eq!(result.significance_level, 0.05);
        assert!((result.critical_value - 2.919986).abs() < 1e-5);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.decision, Decision::FailToReject);
        assert!(result.hypotheses.null.contains("Smart TV and Laptop"));
        assert_eq!(result.conclusion(), result.hypotheses.null);
    }

    #[test]
    fn test_clear_difference_is_rejected() {
        let ds = dataset(
            &[60.0, 62.0, 64.0, 61.0, 63.0],
            &[20.0, 22.0, 21.0, 23.0, 24.0],
        );
        let result = two_sample_t_test(&ds, &TTestConfig::default()).unwrap();
        assert_eq!(result.degrees_of_freedom, 8);
        assert!(result.statistic > result.critical_value);
        assert!(result.decision.is_reject());
        assert!(result.conclusion().contains("SIGNIFICANT"));
    }

    #[test]
    fn test_missing_group_names_device() {
        let ds = dataset(&[30.0, 40.0], &[]);
        let err = two_sample_t_test(&ds, &TTestConfig::default()).unwrap_err();
        match err {
            Error::InsufficientData { group, got, min } => {
                assert_eq!(group, "Laptop");
                assert_eq!(got, 0);
                assert_eq!(min, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_swap_negates_statistic() {
        let ds = dataset(&[30.0, 40.0, 50.0, 45.0], &[20.0, 30.0, 33.0]);
        let config = TTestConfig::default();
        let forward = two_sample_t_test(&ds, &config).unwrap();
        let backward = two_sample_t_test(&ds, &config.swapped()).unwrap();
        assert_eq!(forward.statistic, -backward.statistic);
        assert_eq!(forward.critical_value, backward.critical_value);
        assert_eq!(forward.decision, backward.decision);
    }

    #[test]
    fn test_invalid_alpha() {
        let ds = dataset(&[30.0, 40.0], &[20.0, 50.0]);
        let config = TTestConfig {
            significance_level: 1.0,
            ..TTestConfig::default()
        };
        assert!(matches!(
            two_sample_t_test(&ds, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ages() -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(18.0_f64..90.0, 2..60)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn df_is_total_minus_two(a in ages(), b in ages()) {
            let s = pooled_t_statistic(&a, &b).unwrap();
            prop_assert_eq!(s.degrees_of_freedom, a.len() + b.len() - 2);
        }

        #[test]
        fn swapping_groups_negates(a in ages(), b in ages()) {
            let ab = pooled_t_statistic(&a, &b).unwrap();
            let ba = pooled_t_statistic(&b, &a).unwrap();
            prop_assert_eq!(ab.statistic, -ba.statistic);
            prop_assert_eq!(ab.pooled_variance, ba.pooled_variance);
        }

        #[test]
        fn pooled_variance_between_group_variances(a in ages(), b in ages()) {
            let s = pooled_t_statistic(&a, &b).unwrap();
            let lo = s.variance_a.min(s.variance_b);
            let hi = s.variance_a.max(s.variance_b);
            prop_assert!(s.pooled_variance >= lo * (1.0 - 1e-12));
            prop_assert!(s.pooled_variance <= hi * (1.0 + 1e-12));
        }
    }
}
