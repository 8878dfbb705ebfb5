//! Crate-wide error type.
//!
//! Every failure is terminal for a run; nothing here is retried.

use std::io;

use crate::distributions::DistributionError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the tests depend on is absent from the header row.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A cell could not be interpreted (line numbers are 1-indexed and
    /// count the header).
    #[error("invalid {field} value at line {line}: '{value}'")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// A group or category has too few members for the statistic to exist.
    #[error("insufficient data for '{group}': got {got}, need at least {min}")]
    InsufficientData {
        group: String,
        got: usize,
        min: usize,
    },

    /// Pooled variance is zero or overflows, so the t statistic has no
    /// finite value.
    #[error("pooled variance is zero or not finite; the t statistic is undefined")]
    DegenerateVariance,

    #[error("expected frequency is zero for cell ({row}, {column})")]
    ZeroExpectedFrequency { row: String, column: String },

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
