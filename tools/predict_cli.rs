//! Interactive Addiction Score Prediction
//!
//! Prompts for one survey record on stdin and prints the predicted score
//! and addiction level.

use addiction_score_service::{cli, config::AppConfig, logging, models::inference::Predictor};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    let predictor = Predictor::from_config(&config)
        .with_context(|| format!("Failed to load model from {}", config.model.path))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Loaded trained model")?;

    match cli::run(&predictor, stdin.lock(), stdout.lock())? {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}
