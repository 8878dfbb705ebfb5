//! Hypothesis tests over a [`Dataset`](crate::dataset::Dataset).
//!
//! Both tests follow the same critical-value procedure: compute a
//! statistic, look up the `1 − α` quantile of the reference distribution,
//! and compare. No p-values are involved in the decision.
//!
//! - [`t_test`]: pooled two-sample Student's t-test on mean age between
//!   two device groups.
//! - [`chi_squared`]: Pearson chi-squared test of independence between
//!   country and device.

pub mod chi_squared;
pub mod t_test;

use std::fmt;

use serde::Serialize;

pub use chi_squared::{chi_squared_statistic, independence_test};
pub use t_test::{pooled_t_statistic, two_sample_t_test, TTestSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    StudentT,
    ChiSquaredIndependence,
}

impl TestKind {
    /// Label of the computed statistic in reports.
    pub fn statistic_label(self) -> &'static str {
        match self {
            TestKind::StudentT => "T-statistic",
            TestKind::ChiSquaredIndependence => "Chi-squared",
        }
    }

    /// Label of the critical value in reports.
    pub fn critical_label(self) -> &'static str {
        match self {
            TestKind::StudentT => "Critical T-value",
            TestKind::ChiSquaredIndependence => "Critical Value",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::StudentT => write!(f, "Student's T-test"),
            TestKind::ChiSquaredIndependence => write!(f, "Pearson's Chi-squared Test"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Reject,
    FailToReject,
}

impl Decision {
    pub fn is_reject(self) -> bool {
        self == Decision::Reject
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hypotheses {
    pub null: String,
    pub alternative: String,
}

/// Outcome of one test run. Computed, reported, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub kind: TestKind,
    pub hypotheses: Hypotheses,
    pub significance_level: f64,
    pub degrees_of_freedom: usize,
    pub critical_value: f64,
    pub statistic: f64,
    pub decision: Decision,
}

impl TestResult {
    /// The hypothesis the data supports: the alternative when H₀ is
    /// rejected, the null otherwise.
    pub fn conclusion(&self) -> &str {
        match self.decision {
            Decision::Reject => &self.hypotheses.alternative,
            Decision::FailToReject => &self.hypotheses.null,
        }
    }
}
