//! Project command implementation
//!
//! Runs a Monte Carlo projection with the projection_engine crate and
//! writes the fan-chart bands as a table, JSON or CSV.

use std::io::{self, Write};

use chrono::Datelike;
use projection_core::rng::NormalMethod;
use projection_engine::{FanChart, FanPoint, ProjectionConfig, ProjectionEngine, ProjectionError};
use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, OutputFormat};
use crate::Result;

/// Command-line values that take precedence over the loaded configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub trials: Option<usize>,
    pub years: Option<usize>,
    pub seed: Option<u64>,
    pub method: Option<NormalMethod>,
    pub initial: Option<f64>,
    pub expected_return: Option<f64>,
    pub volatility: Option<f64>,
    pub contribution: Option<f64>,
    pub start_year: Option<i32>,
    pub format: Option<OutputFormat>,
}

impl Overrides {
    /// Writes every set override into `config`.
    pub fn apply(self, config: &mut AppConfig) {
        let projection = &mut config.projection;
        projection.trials = self.trials.unwrap_or(projection.trials);
        projection.years = self.years.unwrap_or(projection.years);
        projection.seed = self.seed.or(projection.seed);
        projection.method = self.method.unwrap_or(projection.method);

        let growth = &mut config.growth;
        growth.initial_value = self.initial.unwrap_or(growth.initial_value);
        growth.expected_return = self.expected_return.unwrap_or(growth.expected_return);
        growth.volatility = self.volatility.unwrap_or(growth.volatility);
        growth.annual_contribution = self.contribution.unwrap_or(growth.annual_contribution);

        config.output.start_year = self.start_year.or(config.output.start_year);
        config.output.format = self.format.unwrap_or(config.output.format);
    }
}

/// One output row: a fan-chart point labelled with its calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct FanRow {
    pub year: usize,
    pub calendar_year: i32,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub mean: f64,
}

impl FanRow {
    fn new(point: &FanPoint, start_year: i32) -> Self {
        Self {
            year: point.year,
            calendar_year: start_year + point.year as i32,
            p5: point.p5,
            p25: point.p25,
            p50: point.p50,
            p75: point.p75,
            p95: point.p95,
            mean: point.mean,
        }
    }
}

/// Probability of finishing at or above a target value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TargetProbability {
    pub target: f64,
    pub probability: f64,
}

/// Everything written by `fanchart project`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub seed: u64,
    pub n_trials: usize,
    pub method: String,
    pub start_year: i32,
    pub target: Option<TargetProbability>,
    pub rows: Vec<FanRow>,
}

impl ProjectionReport {
    /// Labels `chart` with calendar years starting at `start_year`.
    pub fn new(
        engine: &ProjectionEngine,
        chart: &FanChart,
        start_year: i32,
        target: Option<TargetProbability>,
    ) -> Self {
        Self {
            seed: engine.seed(),
            n_trials: chart.n_trials(),
            method: engine.config().normal_method().to_string(),
            start_year,
            target,
            rows: chart
                .points()
                .iter()
                .map(|p| FanRow::new(p, start_year))
                .collect(),
        }
    }
}

/// Run the project command
pub fn run(mut config: AppConfig, overrides: Overrides, target: Option<f64>) -> Result<()> {
    overrides.apply(&mut config);

    let projection = ProjectionConfig::builder()
        .n_trials(config.projection.trials)
        .n_years(config.projection.years)
        .maybe_seed(config.projection.seed)
        .normal_method(config.projection.method)
        .batch_size(config.projection.batch_size)
        .build()
        .map_err(ProjectionError::from)?;

    info!("Starting projection...");
    info!("  Trials: {}", projection.n_trials());
    info!("  Years: {}", projection.n_years());
    info!("  Method: {}", projection.normal_method());
    info!("  Output format: {}", config.output.format);

    let engine = ProjectionEngine::new(projection)?;
    let outcomes = engine.simulate(&config.growth)?;
    let chart = FanChart::from_outcomes(&outcomes);

    let target = target.map(|target| TargetProbability {
        target,
        probability: outcomes.probability_at_least(target),
    });
    let start_year = config
        .output
        .start_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let report = ProjectionReport::new(&engine, &chart, start_year, target);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, config.output.format)?;

    info!("Projection complete (seed {})", engine.seed());
    Ok(())
}

/// Writes `report` to `out` in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ProjectionReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in &report.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => write_table(out, report)?,
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, report: &ProjectionReport) -> io::Result<()> {
    writeln!(
        out,
        "Seed {} | {} trials | {}",
        report.seed, report.n_trials, report.method
    )?;
    writeln!(out, "┌──────┬──────────────┬──────────────┬──────────────┬──────────────┬──────────────┐")?;
    writeln!(
        out,
        "│ Year │ {:>12} │ {:>12} │ {:>12} │ {:>12} │ {:>12} │",
        "P5", "P25", "Median", "P75", "P95"
    )?;
    writeln!(out, "├──────┼──────────────┼──────────────┼──────────────┼──────────────┼──────────────┤")?;
    for row in &report.rows {
        writeln!(
            out,
            "│ {:>4} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>12.2} │",
            row.calendar_year, row.p5, row.p25, row.p50, row.p75, row.p95
        )?;
    }
    writeln!(out, "└──────┴──────────────┴──────────────┴──────────────┴──────────────┴──────────────┘")?;

    if let Some(target) = report.target {
        writeln!(
            out,
            "P(final value >= {:.2}) = {:.1}%",
            target.target,
            target.probability * 100.0
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use projection_engine::GrowthParams;

    fn sample_report() -> ProjectionReport {
        let config = ProjectionConfig::builder()
            .n_trials(200)
            .n_years(3)
            .seed(5)
            .build()
            .unwrap();
        let engine = ProjectionEngine::new(config).unwrap();
        let chart = engine.fan_chart(&GrowthParams::default()).unwrap();
        ProjectionReport::new(
            &engine,
            &chart,
            2030,
            Some(TargetProbability {
                target: 1.0,
                probability: 1.0,
            }),
        )
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = AppConfig::default();
        config.projection.seed = Some(1);

        Overrides {
            trials: Some(42),
            seed: None,
            volatility: Some(0.3),
            format: Some(OutputFormat::Json),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.projection.trials, 42);
        assert_eq!(config.projection.years, 30);
        assert_eq!(config.projection.seed, Some(1));
        assert_relative_eq!(config.growth.volatility, 0.3);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_report_labels_calendar_years() {
        let report = sample_report();
        assert_eq!(report.seed, 5);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].calendar_year, 2030);
        assert_eq!(report.rows[3].calendar_year, 2033);
        assert_eq!(report.method, "box-muller");
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &sample_report(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("year,calendar_year,p5,p25,p50,p75,p95,mean")
        );
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["seed"], 5);
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["target"]["probability"], 1.0);
    }

    #[test]
    fn test_write_table() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &sample_report(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Median"));
        assert!(text.contains("2033"));
        assert!(text.contains("P(final value >= 1.00) = 100.0%"));
    }
}
