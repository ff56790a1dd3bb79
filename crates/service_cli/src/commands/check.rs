//! Check command implementation
//!
//! Prints the resolved configuration and validates it without running a
//! simulation.

use projection_engine::{ProjectionConfig, ProjectionError};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &AppConfig, path: &str) -> Result<()> {
    info!("Checking configuration from {} and FANCHART_* environment", path);

    println!("[projection]");
    println!("  trials      = {}", config.projection.trials);
    println!("  years       = {}", config.projection.years);
    match config.projection.seed {
        Some(seed) => println!("  seed        = {}", seed),
        None => println!("  seed        = (random)"),
    }
    println!("  method      = {}", config.projection.method);
    println!("  batch_size  = {}", config.projection.batch_size);
    println!("[growth]");
    println!("  initial_value       = {}", config.growth.initial_value);
    println!("  expected_return     = {}", config.growth.expected_return);
    println!("  volatility          = {}", config.growth.volatility);
    println!("  annual_contribution = {}", config.growth.annual_contribution);
    println!("[output]");
    println!("  format      = {}", config.output.format);

    match validate(config) {
        Ok(()) => {
            println!("\nConfiguration OK");
            Ok(())
        }
        Err(err) => {
            warn!("Configuration invalid: {}", err);
            Err(err.into())
        }
    }
}

/// Validates simulation settings and growth parameters.
pub fn validate(config: &AppConfig) -> std::result::Result<(), ProjectionError> {
    ProjectionConfig::builder()
        .n_trials(config.projection.trials)
        .n_years(config.projection.years)
        .maybe_seed(config.projection.seed)
        .normal_method(config.projection.method)
        .batch_size(config.projection.batch_size)
        .build()?;
    config.growth.validate()
}
