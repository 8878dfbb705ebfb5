//! Run configuration.
//!
//! Defaults reproduce the fixed analysis: `netflix_userbase.csv`, Smart TV
//! against Laptop, α = 0.05 for both tests. The CLI overrides individual
//! fields; [`AnalysisConfig::validate`] runs before any data is touched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_DATA_PATH: &str = "netflix_userbase.csv";
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const DEFAULT_GROUP_A: &str = "Smart TV";
pub const DEFAULT_GROUP_B: &str = "Laptop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub data_path: PathBuf,
    pub t_test: TTestConfig,
    pub chi_squared: ChiSquaredConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            t_test: TTestConfig::default(),
            chi_squared: ChiSquaredConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.t_test.validate()?;
        self.chi_squared.validate()
    }
}

/// Two-sample t-test settings. Groups are matched against `Device`
/// exactly (case-sensitive, no trimming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TTestConfig {
    pub group_a: String,
    pub group_b: String,
    pub significance_level: f64,
}

impl Default for TTestConfig {
    fn default() -> Self {
        Self {
            group_a: DEFAULT_GROUP_A.to_string(),
            group_b: DEFAULT_GROUP_B.to_string(),
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

impl TTestConfig {
    pub fn validate(&self) -> Result<()> {
        validate_significance(self.significance_level)?;
        if self.group_a == self.group_b {
            return Err(Error::InvalidConfig(format!(
                "t-test groups must differ, both are '{}'",
                self.group_a
            )));
        }
        Ok(())
    }

    /// Same settings with the two groups exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            group_a: self.group_b.clone(),
            group_b: self.group_a.clone(),
            significance_level: self.significance_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChiSquaredConfig {
    pub significance_level: f64,
}

impl Default for ChiSquaredConfig {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

impl ChiSquaredConfig {
    pub fn validate(&self) -> Result<()> {
        validate_significance(self.significance_level)
    }
}

fn validate_significance(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "significance level must be in (0, 1), got {alpha}"
        )))
    }
}
