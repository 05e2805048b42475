//! Body Measurement Predictor - Main Entry Point
//!
//! Usage: `predict <age> <height> <weight> <gender> <bodyType>`
//!
//! Prints one JSON record with the rounded and unrounded predictions on
//! stdout. Diagnostics and logs go to stderr.

use anyhow::{Context, Result};
use body_measurement_predictor::{
    config::{AppConfig, LogFormat, LoggingConfig},
    error::{OUTPUT_FAILURE_EXIT, SETUP_FAILURE_EXIT},
    predict_from_args,
};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(SETUP_FAILURE_EXIT);
        }
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(SETUP_FAILURE_EXIT);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();

    match predict_from_args(&config, &args).await {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to serialize result: {e}");
                ExitCode::from(OUTPUT_FAILURE_EXIT)
            }
        },
        Err(e) => {
            let code = e.exit_code();
            error!(error = %e, exit_code = code, "Prediction failed");
            eprintln!("Error: {:#}", anyhow::Error::new(e));
            ExitCode::from(code)
        }
    }
}

/// Initialize logging on stderr so stdout only carries the result record
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "body_measurement_predictor={level},predict={level}",
            level = logging.level
        ))
        .context("Invalid logging level")?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    Ok(())
}
