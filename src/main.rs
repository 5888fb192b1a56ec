use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bikefit::config::resolve_config;
use bikefit::{
    expand_with, render_summary, solve_posture, Envelope, FitError, FitResult, FrameGeometry,
    RawMeasurements, RiderAnthropometry,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Bicycle fit calculator.
#[derive(Debug, Parser)]
#[command(name = "bikefit", version, about = "Basic bicycle fit from frame geometry and anthropometry")]
struct Cli {
    /// Constants table overriding the built-in model constants.
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Compute a fit from a geometry record and an anthropometry record.
    Fit {
        /// JSON file holding the frame geometry.
        #[arg(long)]
        geometry: PathBuf,
        /// JSON file holding the rider anthropometry.
        #[arg(long)]
        anthropometry: PathBuf,
        /// Print a JSON envelope instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Expand raw body measurements into a full anthropometry profile.
    Intake {
        /// JSON file holding the raw measurements.
        #[arg(long)]
        raw: PathBuf,
    },
}

/// Read a JSON record from disk.
fn read_record(path: &Path) -> Result<Value, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {e}", path.display()))?;
    let record = serde_json::from_str(&text)
        .map_err(|e| format!("'{}' is not valid JSON: {e}", path.display()))?;
    Ok(record)
}

/// Execute the parsed command.
fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    // Resolve the model constants before any record is read
    let config = resolve_config(cli.constants.as_deref())?;

    match cli.command {
        Command::Fit {
            geometry,
            anthropometry,
            json,
        } => {
            let geometry = read_record(&geometry)?;
            let anthropometry = read_record(&anthropometry)?;

            // Decode both records at the boundary so absent fields are named
            let posture = FrameGeometry::from_record(&geometry).and_then(|geometry| {
                let rider = RiderAnthropometry::from_record(&anthropometry)?;
                solve_posture(&geometry, &rider, &config.solver)
            });

            // Either wrap the result in an envelope or print the text report
            if json {
                let envelope: Envelope<FitResult> = posture.map(FitResult::from).into();
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                return Ok(());
            }
            let posture = posture.map_err(|error: FitError| error.to_string())?;
            print!("{}", render_summary(&posture));
        }
        Command::Intake { raw } => {
            // Expand the raw measurements with the configured ratios
            let raw = RawMeasurements::from_record(&read_record(&raw)?)?;
            let profile = expand_with(&raw, &config.intake);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Pick up a local .env, then log to stderr under RUST_LOG
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse the arguments and run the command
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
