//! Runs the t-test and the chi-squared test on a user CSV and prints both
//! reports.
//!
//! # Usage
//!
//! ```bash
//! # defaults: ./netflix_userbase.csv, Smart TV vs Laptop, α = 0.05
//! u-hypotest
//!
//! # other file, stricter level, JSON output
//! u-hypotest --data users.csv --alpha 0.01 --format json
//!
//! # compare different device groups
//! u-hypotest --group-a Tablet --group-b Smartphone
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use u_hypotest::config::{
    AnalysisConfig, ChiSquaredConfig, TTestConfig, DEFAULT_DATA_PATH, DEFAULT_GROUP_A,
    DEFAULT_GROUP_B, DEFAULT_SIGNIFICANCE_LEVEL,
};
use u_hypotest::dataset::Dataset;
use u_hypotest::hypothesis::{independence_test, two_sample_t_test};
use u_hypotest::{logging, report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Two-sample t-test and chi-squared independence test over a user table
#[derive(Parser, Debug)]
#[command(name = "u-hypotest")]
#[command(version)]
struct Args {
    /// CSV file with Age, Device and Country columns
    #[arg(short, long, env = "U_HYPOTEST_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Significance level shared by both tests
    #[arg(short, long, default_value_t = DEFAULT_SIGNIFICANCE_LEVEL)]
    alpha: f64,

    /// First device group of the t-test
    #[arg(long, default_value = DEFAULT_GROUP_A)]
    group_a: String,

    /// Second device group of the t-test
    #[arg(long, default_value = DEFAULT_GROUP_B)]
    group_b: String,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level: off, error, warn, info, debug or trace. RUST_LOG refines it per target
    #[arg(long, env = "U_HYPOTEST_LOG", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            data_path: self.data.clone(),
            t_test: TTestConfig {
                group_a: self.group_a.clone(),
                group_b: self.group_b.clone(),
                significance_level: self.alpha,
            },
            chi_squared: ChiSquaredConfig {
                significance_level: self.alpha,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let config = args.config();
    config.validate()?;

    let dataset = Dataset::from_path(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let t_result = two_sample_t_test(&dataset, &config.t_test).context("Student's t-test")?;
    let chi_result =
        independence_test(&dataset, &config.chi_squared).context("chi-squared test")?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", report::render_text(&t_result));
            print!("{}", report::render_text(&chi_result));
        }
        OutputFormat::Json => {
            println!("{}", report::render_json(&[t_result, chi_result])?);
        }
    }
    Ok(())
}
