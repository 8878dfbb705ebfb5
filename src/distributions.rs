//! Reference distributions for the hypothesis tests.
//!
//! Typed wrappers over [`crate::special`] that validate their parameters
//! once at construction, so evaluation never has to.
//!
//! | Distribution | Parameter | Support |
//! |---|---|---|
//! | [`StudentT`] | ν > 0 | ℝ |
//! | [`ChiSquared`] | k > 0 | [0, ∞) |

use crate::special;

/// Error type for invalid distribution parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// Student's t
// ============================================================================

/// Student's t-distribution with `df` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    /// # Errors
    /// Returns `Err` if `df` is not a finite positive number.
    pub fn new(df: f64) -> Result<Self, DistributionError> {
        if !df.is_finite() || df <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "StudentT requires df > 0, got df={df}"
            )));
        }
        Ok(Self { df })
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    pub fn cdf(&self, t: f64) -> f64 {
        special::t_cdf(t, self.df)
    }

    pub fn pdf(&self, t: f64) -> f64 {
        special::t_pdf(t, self.df)
    }

    /// Inverse CDF. Returns `None` unless `0 < p < 1`.
    ///
    /// # Examples
    /// ```
    /// use u_hypotest::distributions::StudentT;
    /// let t = StudentT::new(10.0).unwrap();
    /// assert!((t.quantile(0.95).unwrap() - 1.812461).abs() < 1e-5);
    /// assert_eq!(t.quantile(1.0), None);
    /// ```
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(p > 0.0 && p < 1.0) {
            return None;
        }
        Some(special::t_quantile(p, self.df))
    }
}

// ============================================================================
// Chi-squared
// ============================================================================

/// Chi-squared distribution with `k` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    k: f64,
}

impl ChiSquared {
    /// # Errors
    /// Returns `Err` if `k` is not a finite positive number.
    pub fn new(k: f64) -> Result<Self, DistributionError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "ChiSquared requires k > 0, got k={k}"
            )));
        }
        Ok(Self { k })
    }

    pub fn df(&self) -> f64 {
        self.k
    }

    pub fn cdf(&self, x: f64) -> f64 {
        special::chi_squared_cdf(x, self.k)
    }

    pub fn pdf(&self, x: f64) -> f64 {
        special::chi_squared_pdf(x, self.k)
    }

    /// Inverse CDF. Returns `None` unless `0 < p < 1`.
    ///
    /// # Examples
    /// ```
    /// use u_hypotest::distributions::ChiSquared;
    /// let c = ChiSquared::new(2.0).unwrap();
    /// assert!((c.quantile(0.95).unwrap() - 5.991465).abs() < 1e-5);
    /// ```
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(p > 0.0 && p < 1.0) {
            return None;
        }
        Some(special::chi_squared_quantile(p, self.k))
    }
}
