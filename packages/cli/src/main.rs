#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI for the accident feature-engineering pipeline.
//!
//! Reads the upstream-cleaned union CSV (one row per person/vehicle
//! involvement), runs the full pipeline, and writes the balanced, labeled
//! model dataset for classifier training.

use std::path::PathBuf;

use accidentalidad_cli::pipeline::{self, PipelineConfig};
use accidentalidad_cli::{CliError, io};
use accidentalidad_generate::GeneratorConfig;
use clap::Parser;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "accidentalidad", about = "Accident feature dataset builder")]
struct Cli {
    /// Cleaned union CSV of per-involvement accident rows.
    #[arg(long)]
    input: PathBuf,

    /// Destination CSV for the labeled model dataset.
    #[arg(long)]
    output: PathBuf,

    /// Synthetic non-accident rows per real accident.
    #[arg(long, default_value_t = 3)]
    factor: usize,

    /// Seed for the synthetic generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), CliError> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let records = io::read_records(&cli.input)?;

    let config = PipelineConfig {
        generator: GeneratorConfig {
            factor: cli.factor,
            ..GeneratorConfig::default()
        },
        ..PipelineConfig::default()
    };
    let mut rng = cli.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let dataset = pipeline::run(&records, &config, &mut rng)?;
    io::write_dataset(&cli.output, &dataset)?;

    let accidents = dataset.iter().filter(|row| row.label.value() == 1).count();
    let total = dataset.len();
    log::info!(
        "done: {total} rows, {accidents} accidents ({:.1}%), {} non-accidents ({:.1}%)",
        accidents as f64 / total as f64 * 100.0,
        total - accidents,
        (total - accidents) as f64 / total as f64 * 100.0,
    );

    Ok(())
}
