//! CLI configuration management
//!
//! Settings are layered: built-in defaults, then the TOML file given by
//! `--config` (optional), then `FANCHART_*` environment variables using `__`
//! as the section separator (e.g. `FANCHART_PROJECTION__TRIALS=20000`).
//! Command-line flags are applied last by each command.
//!
//! ```toml
//! [projection]
//! trials = 10000
//! years = 30
//! seed = 42
//! method = "box-muller"
//!
//! [growth]
//! initial_value = 250000.0
//! expected_return = 0.06
//! volatility = 0.15
//! annual_contribution = 12000.0
//!
//! [output]
//! format = "table"
//! ```

use std::fmt;
use std::str::FromStr;

use projection_core::rng::NormalMethod;
use projection_engine::mc::DEFAULT_BATCH_SIZE;
use projection_engine::GrowthParams;
use serde::Deserialize;

use crate::{CliError, Result};

/// Output formats for projection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// `[projection]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionSection {
    /// Number of simulated trials
    pub trials: usize,
    /// Horizon in years
    pub years: usize,
    /// Seed; a random seed is drawn and logged when absent
    pub seed: Option<u64>,
    /// Normal variate algorithm
    pub method: NormalMethod,
    /// Trials per generator
    pub batch_size: usize,
}

impl Default for ProjectionSection {
    fn default() -> Self {
        Self {
            trials: 10_000,
            years: 30,
            seed: None,
            method: NormalMethod::BoxMuller,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Output format
    pub format: OutputFormat,
    /// Calendar year of year 0; defaults to the current year
    pub start_year: Option<i32>,
}

/// Fully resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation settings
    pub projection: ProjectionSection,
    /// Growth model
    pub growth: GrowthParams,
    /// Output settings
    pub output: OutputSection,
}

impl AppConfig {
    /// Loads configuration from `path` (if present) and the environment.
    pub fn load(path: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("FANCHART")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(contents, ::config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.projection.trials, 10_000);
        assert_eq!(config.projection.years, 30);
        assert_eq!(config.projection.seed, None);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.growth, GrowthParams::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AppConfig::from_toml_str(
            r#"
            [projection]
            trials = 500
            seed = 9
            method = "ziggurat"

            [growth]
            initial_value = 1000.0
            expected_return = 0.05
            volatility = 0.1
            annual_contribution = 50.0

            [output]
            format = "csv"
            start_year = 2030
            "#,
        )
        .unwrap();

        assert_eq!(config.projection.trials, 500);
        assert_eq!(config.projection.years, 30);
        assert_eq!(config.projection.seed, Some(9));
        assert_eq!(config.projection.method, NormalMethod::Ziggurat);
        assert_eq!(config.growth.initial_value, 1000.0);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.start_year, Some(2030));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("does-not-exist-fanchart").unwrap();
        assert_eq!(config.projection.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
