use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pyrolysis_yield::{EngineConfig, PyrolysisEngine, RawSimulationInput, SimulationReport};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Estimate pyrolysis product yields and economics for one batch.
#[derive(Debug, Parser)]
#[command(name = "pyrolysis-sim", version)]
struct Cli {
    /// Feedstock, e.g. "plastic_waste" or "Biomass / Wood".
    #[arg(long)]
    feedstock: String,

    /// Peak reactor temperature in °C.
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    temperature_c: f64,

    /// Feedstock mass in kg.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    mass_kg: f64,

    /// TOML file overriding prices and regime tables.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let engine: PyrolysisEngine = match &cli.config {
        Some(path) => EngineConfig::load(path)?.into_engine(),
        None => PyrolysisEngine::new(),
    };

    let report = engine.run(&RawSimulationInput {
        feedstock: cli.feedstock,
        temperature_c: cli.temperature_c,
        initial_mass_kg: cli.mass_kg,
    })?;

    match cli.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Csv => {
            println!("{}", SimulationReport::csv_header());
            println!("{}", report.to_csv_row());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
