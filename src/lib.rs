//! # u-hypotest
//!
//! Classical hypothesis tests over a table of streaming-service users.
//!
//! The table is loaded once from CSV into an immutable [`dataset::Dataset`]
//! and passed by reference to two independent procedures:
//!
//! - a pooled two-sample Student's t-test on mean age between two device
//!   groups ([`hypothesis::two_sample_t_test`]);
//! - a Pearson chi-squared test of independence between country and
//!   device ([`hypothesis::independence_test`]).
//!
//! Each procedure compares its statistic against the `1 − α` quantile of
//! the reference distribution and yields a [`hypothesis::TestResult`].
//!
//! ## Modules
//!
//! - [`special`]: incomplete beta/gamma, t and χ² CDF and quantiles
//! - [`distributions`]: validated [`distributions::StudentT`] and
//!   [`distributions::ChiSquared`]
//! - [`stats`]: Kahan mean, Welford variance
//! - [`dataset`]: CSV loading into typed records
//! - [`contingency`]: observed-frequency table with marginals
//! - [`hypothesis`]: the two tests
//! - [`report`]: text and JSON rendering
//!
//! ## Example
//!
//! ```
//! use u_hypotest::config::AnalysisConfig;
//! use u_hypotest::dataset::Dataset;
//! use u_hypotest::hypothesis::{independence_test, two_sample_t_test};
//!
//! let csv = "Age,Device,Country\n\
//!            30,Smart TV,Spain\n40,Smart TV,Italy\n\
//!            20,Laptop,Spain\n50,Laptop,Italy\n";
//! let data = Dataset::from_reader(csv.as_bytes()).unwrap();
//! let config = AnalysisConfig::default();
//!
//! let t = two_sample_t_test(&data, &config.t_test).unwrap();
//! assert_eq!(t.degrees_of_freedom, 2);
//! let chi = independence_test(&data, &config.chi_squared).unwrap();
//! assert_eq!(chi.statistic, 0.0);
//! ```

pub mod config;
pub mod contingency;
pub mod dataset;
pub mod distributions;
pub mod error;
pub mod hypothesis;
pub mod logging;
pub mod report;
pub mod special;
pub mod stats;

pub use error::{Error, Result};
