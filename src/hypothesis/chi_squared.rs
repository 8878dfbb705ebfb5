//! Pearson chi-squared test of independence between `Country` and
//! `Device`.
//!
//! ```text
//! E(r, c) = R(r) · C(c) / N
//! χ²      = Σ (O(r, c) − E(r, c))² / E(r, c)
//! ν       = (rows − 1)(columns − 1)
//! ```
//!
//! The sum runs over the cells that were actually observed. Pairs that
//! never occur in the data contribute nothing even though the marginals
//! give them a non-zero expectation, so the statistic is smaller than the
//! textbook full-cross-product value whenever the table has empty cells.

use tracing::{debug, info};

use super::{Decision, Hypotheses, TestKind, TestResult};
use crate::config::ChiSquaredConfig;
use crate::contingency::ContingencyTable;
use crate::dataset::{Dataset, COUNTRY, DEVICE};
use crate::distributions::ChiSquared;
use crate::error::{Error, Result};

/// Sum of `(O − E)² / E` over observed cells.
///
/// # Errors
/// - [`Error::InsufficientData`] for an empty table.
/// - [`Error::ZeroExpectedFrequency`] if an expected count is zero.
///
/// # Examples
/// ```
/// use u_hypotest::contingency::ContingencyTable;
/// use u_hypotest::hypothesis::chi_squared_statistic;
/// let table = ContingencyTable::from_pairs([("US", "Laptop"), ("UK", "TV")]);
/// // E = 0.5 on each observed cell: 2 · (1 − 0.5)² / 0.5
/// assert_eq!(chi_squared_statistic(&table).unwrap(), 1.0);
/// ```
pub fn chi_squared_statistic(table: &ContingencyTable) -> Result<f64> {
    if table.is_empty() {
        return Err(Error::InsufficientData {
            group: "contingency table".to_string(),
            got: 0,
            min: 1,
        });
    }

    let mut chi_squared = 0.0;
    for (row, column, observed) in table.cells() {
        let expected = table
            .expected_frequency(row, column)
            .filter(|&e| e > 0.0)
            .ok_or_else(|| Error::ZeroExpectedFrequency {
                row: row.to_string(),
                column: column.to_string(),
            })?;
        let diff = observed as f64 - expected;
        chi_squared += diff * diff / expected;
    }
    Ok(chi_squared)
}

/// Tests whether country and device are associated.
///
/// H₀: no relationship. Rejected when `χ² ≥ χ²_{1−α}(ν)`.
///
/// # Errors
/// [`Error::InsufficientData`] if the dataset is empty or has fewer than
/// two distinct countries or devices (ν would be zero).
pub fn independence_test(dataset: &Dataset, config: &ChiSquaredConfig) -> Result<TestResult> {
    config.validate()?;

    let table = ContingencyTable::from_pairs(dataset.iter().map(|r| (&r.country, &r.device)));
    debug!(
        countries = table.row_count(),
        devices = table.column_count(),
        observed_cells = table.cells().count(),
        total = table.grand_total(),
        "contingency table built"
    );

    for (field, distinct) in [(COUNTRY, table.row_count()), (DEVICE, table.column_count())] {
        if distinct < 2 {
            return Err(Error::InsufficientData {
                group: format!("distinct {field} values"),
                got: distinct,
                min: 2,
            });
        }
    }

    let statistic = chi_squared_statistic(&table)?;
    let degrees_of_freedom = table.degrees_of_freedom();

    let alpha = config.significance_level;
    let critical_value = ChiSquared::new(degrees_of_freedom as f64)?
        .quantile(1.0 - alpha)
        .ok_or_else(|| Error::InvalidConfig(format!("no chi-squared quantile for α = {alpha}")))?;

    let decision = if statistic < critical_value {
        Decision::FailToReject
    } else {
        Decision::Reject
    };
    info!(
        statistic,
        critical_value,
        df = degrees_of_freedom,
        ?decision,
        "chi-squared test complete"
    );

    Ok(TestResult {
        kind: TestKind::ChiSquaredIndependence,
        hypotheses: Hypotheses {
            null: "There is NO relationship between country and device".to_string(),
            alternative: "There is a RELATIONSHIP between country and device".to_string(),
        },
        significance_level: alpha,
        degrees_of_freedom,
        critical_value,
        statistic,
        decision,
    })
}
