//! Interactive prediction session

use crate::collector::{InputCollector, PromptSource};
use crate::error::{PredictionError, Result};
use crate::models::inference::Predictor;
use crate::types::response::Prediction;
use std::io::{BufRead, Write};
use tracing::warn;

pub const INTRO: &str =
    "Please enter the following information to predict the social media addiction score:";
pub const INVALID_INPUT: &str = "Invalid input. Please enter numbers for numeric fields.";

/// Prompt for one record, score it and print the result.
///
/// Returns `Ok(None)` when the operator's input was rejected; nothing is
/// scored in that case. Scoring failures propagate as errors.
pub fn run<R: BufRead, W: Write>(
    predictor: &Predictor,
    mut input: R,
    mut output: W,
) -> Result<Option<Prediction>> {
    writeln!(output, "{}", INTRO)?;

    let record = match PromptSource::new(&mut input, &mut output).collect() {
        Ok(record) => record,
        Err(e) if e.is_input_error() => {
            warn!(error = %e, "Input collection abandoned");
            writeln!(output, "\n{}", INVALID_INPUT)?;
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let prediction = predictor.predict_one(&record)?;
    write_results(&mut output, &prediction)?;

    Ok(Some(prediction))
}

fn write_results<W: Write>(output: &mut W, prediction: &Prediction) -> Result<()> {
    writeln!(output, "\n--- Prediction Results ---")?;
    writeln!(output, "Predicted Score: {:.2}", prediction.score)?;
    writeln!(output, "Addiction Level: {}", prediction.category)?;
    output.flush().map_err(PredictionError::from)
}
