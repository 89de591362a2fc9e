//! ONNX Runtime backed pipeline.
//!
//! Expects a graph exported from the trained tabular pipeline with one
//! `[N, 1]` input per column, named after the column: text columns as
//! string tensors, integer columns as `int64`, real columns as `float`.
//! The first output holds one score per row.

use crate::error::{PredictionError, Result};
use crate::feature_extractor::{FeatureRow, FeatureValue};
use crate::models::pipeline::RegressionPipeline;
use crate::types::input::{FieldKind, FIELDS};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DynValue, Tensor};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

pub struct OnnxPipeline {
    name: String,
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxPipeline {
    pub fn load<P: AsRef<Path>>(path: P, intra_threads: usize) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| PredictionError::ArtifactUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(intra_threads))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| unreadable(e.to_string()))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx_pipeline".to_string());

        info!(
            model = %name,
            inputs = session.inputs.len(),
            output = %output_name,
            "ONNX pipeline loaded"
        );

        Ok(Self {
            name,
            session: Mutex::new(session),
            output_name,
        })
    }

    /// Build one `[N, 1]` tensor per column
    fn column_tensors(rows: &[FeatureRow]) -> Result<Vec<(String, DynValue)>> {
        let shape = vec![rows.len() as i64, 1];
        let mut inputs = Vec::with_capacity(FIELDS.len());

        for field in &FIELDS {
            let cells = rows
                .iter()
                .map(|row| {
                    row.get(field.name).ok_or_else(|| {
                        PredictionError::Scoring(format!("column {} missing from input", field.name))
                    })
                })
                .collect::<Result<Vec<&FeatureValue>>>()?;

            let tensor: DynValue = match field.kind {
                FieldKind::Integer => {
                    let data: Vec<i64> = cells
                        .iter()
                        .map(|c| c.as_f64().map(|v| v as i64).unwrap_or_default())
                        .collect();
                    Tensor::from_array((shape.clone(), data))
                        .map_err(scoring)?
                        .into_dyn()
                }
                FieldKind::Real => {
                    let data: Vec<f32> = cells
                        .iter()
                        .map(|c| c.as_f64().unwrap_or(f64::NAN) as f32)
                        .collect();
                    Tensor::from_array((shape.clone(), data))
                        .map_err(scoring)?
                        .into_dyn()
                }
                FieldKind::Text => {
                    let data: Vec<String> = cells
                        .iter()
                        .map(|c| c.as_text().unwrap_or_default().to_string())
                        .collect();
                    Tensor::from_string_array((shape.clone(), data.as_slice()))
                        .map_err(scoring)?
                        .into_dyn()
                }
            };

            inputs.push((field.name.to_string(), tensor));
        }

        Ok(inputs)
    }
}

fn scoring(e: ort::Error) -> PredictionError {
    PredictionError::Scoring(e.to_string())
}

impl RegressionPipeline for OnnxPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let inputs = Self::column_tensors(rows)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::Scoring(format!("Lock error: {}", e)))?;
        let outputs = session.run(inputs).map_err(scoring)?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            PredictionError::Scoring(format!("output {} missing", self.output_name))
        })?;
        let (_, data) = output.try_extract_tensor::<f32>().map_err(scoring)?;
        let scores: Vec<f64> = data.iter().map(|&v| v as f64).collect();

        debug!(model = %self.name, rows = rows.len(), "ONNX batch scored");

        Ok(scores)
    }
}
