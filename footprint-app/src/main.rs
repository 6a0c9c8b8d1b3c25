use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use footprint_core::{history::DateRange, log_store::CsvLogStore};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod plotting;
mod workflow;

#[derive(Parser)]
#[command(name = "footprint", version, about = "Personal carbon footprint tracker")]
struct Cli {
    /// Emission factor file (YAML or JSON). Built-in factors are used when omitted.
    #[arg(long, global = true)]
    factors: Option<PathBuf>,

    /// CSV file holding logged footprints.
    #[arg(long, global = true, default_value = config::DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Print machine-readable JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a daily footprint and compare it with the last logged one.
    Calculate {
        /// Calculator input file (YAML or JSON, camelCase keys).
        #[arg(long)]
        input: PathBuf,
        /// Append the result to the log.
        #[arg(long)]
        save: bool,
        /// Write a breakdown bar chart to this PNG file.
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Summarize logged footprints.
    History {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Write a daily-total line chart to this PNG file.
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Compare the logged totals of two date ranges.
    ComparePeriods {
        #[arg(long)]
        from_start: NaiveDate,
        #[arg(long)]
        from_end: NaiveDate,
        #[arg(long)]
        to_start: NaiveDate,
        #[arg(long)]
        to_end: NaiveDate,
    },
    /// Print the validated emission factors and model constants.
    Factors,
}

#[derive(Serialize)]
struct FactorsOutput<'a> {
    schema_version: &'a str,
    emission_factors: &'a footprint_schemas::factors::EmissionFactorTable,
    model: &'a footprint_schemas::model::ModelConstants,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tracker = config::TrackerConfig::load(cli.factors.as_deref())?;
    let deadband = tracker.deadband_tonnes();

    match cli.command {
        Command::Calculate { input, save, chart } => {
            let calculator = tracker.calculator()?;
            let request = config::load_input(&input)?;
            let mut store = CsvLogStore::new(&cli.log);

            let report = workflow::run_calculation(&calculator, &request, &mut store, save)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                workflow::print_calculation_report(&report);
            }
            if let Some(chart) = chart {
                plotting::plot_breakdown(&chart, &report.result)
                    .with_context(|| format!("Failed to draw chart: {:?}", chart))?;
            }
        }
        Command::History { from, to, chart } => {
            let store = CsvLogStore::new(&cli.log);
            let summary = workflow::run_history(&store, &DateRange::new(from, to), deadband)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                workflow::print_history_summary(&summary);
            }
            if let Some(chart) = chart {
                plotting::plot_daily_totals(&chart, &summary.daily_totals)
                    .with_context(|| format!("Failed to draw chart: {:?}", chart))?;
            }
        }
        Command::ComparePeriods {
            from_start,
            from_end,
            to_start,
            to_end,
        } => {
            let store = CsvLogStore::new(&cli.log);
            let comparison = workflow::run_period_comparison(
                &store,
                &DateRange::new(Some(from_start), Some(from_end)),
                &DateRange::new(Some(to_start), Some(to_end)),
                deadband,
            )?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                workflow::print_period_comparison(&comparison);
            }
        }
        Command::Factors => {
            let factor_config = &tracker.factor_config;
            let output = FactorsOutput {
                schema_version: &factor_config.schema_version,
                emission_factors: &factor_config.factors,
                model: &factor_config.model,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", serde_yaml::to_string(&output)?);
            }
        }
    }

    Ok(())
}
