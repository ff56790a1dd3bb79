//! Fanchart CLI - Monte Carlo Portfolio Projections
//!
//! Operational entry point for the projection workspace.
//!
//! # Commands
//!
//! - `fanchart project` - Simulate a portfolio and print fan-chart bands
//! - `fanchart percentile --values 1,2,3 --percentile 50` - One-off percentile lookup
//! - `fanchart check` - Show the resolved configuration
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate wires `projection_core` and
//! `projection_engine` to configuration, logging and output formatting.

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use projection_core::math::percentile::PercentilePolicy;
use projection_core::rng::NormalMethod;

/// Fan-chart Monte Carlo projection CLI
#[derive(Parser)]
#[command(name = "fanchart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FANCHART_CONFIG", default_value = "fanchart.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Out-of-range percentile handling, as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Extrapolate,
    Clamp,
    Reject,
}

impl From<PolicyArg> for PercentilePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Extrapolate => PercentilePolicy::Extrapolate,
            PolicyArg::Clamp => PercentilePolicy::Clamp,
            PolicyArg::Reject => PercentilePolicy::Reject,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a portfolio and print fan-chart bands
    Project {
        /// Number of Monte Carlo trials
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Projection horizon in years
        #[arg(short, long)]
        years: Option<usize>,

        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Normal variate algorithm (box-muller, ziggurat)
        #[arg(short, long)]
        method: Option<NormalMethod>,

        /// Initial portfolio value
        #[arg(long)]
        initial: Option<f64>,

        /// Expected annual return (continuously compounded)
        #[arg(long = "return", allow_hyphen_values = true)]
        expected_return: Option<f64>,

        /// Annual volatility
        #[arg(long)]
        volatility: Option<f64>,

        /// Annual contribution (negative for withdrawals)
        #[arg(long, allow_hyphen_values = true)]
        contribution: Option<f64>,

        /// Calendar year of year 0
        #[arg(long)]
        start_year: Option<i32>,

        /// Report the probability of ending at or above this value
        #[arg(long)]
        target: Option<f64>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Compute an interpolated percentile of a list of values
    Percentile {
        /// Comma-separated values, sorted ascending unless --unsorted
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        values: Vec<f64>,

        /// Percentile rank, nominally in [0, 100]
        #[arg(short, long, allow_hyphen_values = true)]
        percentile: f64,

        /// Out-of-range handling
        #[arg(long, value_enum, default_value = "extrapolate")]
        policy: PolicyArg,

        /// Sort the values before the lookup
        #[arg(long)]
        unsorted: bool,
    },

    /// Check the resolved configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; logs go to stderr so stdout stays machine-readable.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let app_config = crate::config::AppConfig::load(&cli.config)?;
    debug!(?app_config, path = %cli.config, "Loaded configuration");

    match cli.command {
        Commands::Project {
            trials,
            years,
            seed,
            method,
            initial,
            expected_return,
            volatility,
            contribution,
            start_year,
            target,
            format,
        } => {
            let overrides = commands::project::Overrides {
                trials,
                years,
                seed,
                method,
                initial,
                expected_return,
                volatility,
                contribution,
                start_year,
                format: format
                    .as_deref()
                    .map(str::parse::<crate::config::OutputFormat>)
                    .transpose()?,
            };
            commands::project::run(app_config, overrides, target)
        }
        Commands::Percentile {
            values,
            percentile,
            policy,
            unsorted,
        } => commands::percentile::run(values, percentile, policy.into(), unsorted),
        Commands::Check => commands::check::run(&app_config, &cli.config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_method_flag_uses_normal_method_names() {
        let cli = Cli::try_parse_from(["fanchart", "project", "--method", "ziggurat"]).unwrap();
        match cli.command {
            Commands::Project { method, .. } => assert_eq!(method, Some(NormalMethod::Ziggurat)),
            _ => panic!("expected project command"),
        }

        assert!(Cli::try_parse_from(["fanchart", "project", "--method", "polar"]).is_err());
    }
}
