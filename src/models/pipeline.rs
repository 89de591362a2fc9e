//! Regression pipeline abstraction and the native JSON pipeline format

use crate::error::{PredictionError, Result};
use crate::feature_extractor::{FeatureRow, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A loaded, read-only regression pipeline.
///
/// Implementations return exactly one score per row, in row order.
pub trait RegressionPipeline: Send + Sync {
    /// Pipeline name for logs
    fn name(&self) -> &str;

    /// Score a batch of feature rows
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>>;
}

/// How a categorical step treats values absent from its vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Unseen categories are a scoring error
    #[default]
    Error,
    /// Unseen categories contribute nothing
    Ignore,
}

/// Standard-scaled numeric column feeding the linear head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericStep {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

impl NumericStep {
    fn contribution(&self, value: f64) -> f64 {
        // Constant columns are stored with a zero scale
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        self.coef * (value - self.mean) / scale
    }
}

/// One-hot encoded categorical column folded into per-category weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalStep {
    pub column: String,
    pub weights: HashMap<String, f64>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl CategoricalStep {
    fn contribution(&self, value: &str) -> Result<f64> {
        match self.weights.get(value) {
            Some(weight) => Ok(*weight),
            None => match self.handle_unknown {
                HandleUnknown::Ignore => Ok(0.0),
                HandleUnknown::Error => Err(PredictionError::Scoring(format!(
                    "found unknown category {:?} in column {}",
                    value, self.column
                ))),
            },
        }
    }
}

/// Preprocessing + linear regression pipeline stored as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPipeline {
    #[serde(default = "default_pipeline_name")]
    pub name: String,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericStep>,
    #[serde(default)]
    pub categorical: Vec<CategoricalStep>,
}

fn default_pipeline_name() -> String {
    "linear_pipeline".to_string()
}

impl LinearPipeline {
    /// Read a pipeline artifact from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| PredictionError::ArtifactUnreadable {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        Self::from_json(&text).map_err(|e| unreadable(e.to_string()))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    fn score_row(&self, row: &FeatureRow) -> Result<f64> {
        let mut score = self.intercept;

        for step in &self.numeric {
            let value = column(row, &step.column)?;
            let number = value.as_f64().ok_or_else(|| {
                PredictionError::Scoring(format!(
                    "column {} expected a number, got {}",
                    step.column, value
                ))
            })?;
            if !number.is_finite() {
                return Err(PredictionError::Scoring(format!(
                    "column {} contains non-finite value {}",
                    step.column, number
                )));
            }
            score += step.contribution(number);
        }

        for step in &self.categorical {
            let value = column(row, &step.column)?;
            let text = value.as_text().ok_or_else(|| {
                PredictionError::Scoring(format!(
                    "column {} expected text, got {}",
                    step.column, value
                ))
            })?;
            score += step.contribution(text)?;
        }

        Ok(score)
    }
}

fn column<'a>(row: &'a FeatureRow, name: &str) -> Result<&'a FeatureValue> {
    row.get(name)
        .ok_or_else(|| PredictionError::Scoring(format!("column {} missing from input", name)))
}

impl RegressionPipeline for LinearPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.score_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_extractor::FeatureExtractor;
    use crate::testing::{sample_input, sample_pipeline};

    #[test]
    fn test_linear_score() {
        let pipeline = sample_pipeline();
        let row = FeatureExtractor::new().extract(&sample_input());

        let scores = pipeline.predict(&[row]).unwrap();

        // 5.0 + 0.5 * (4.0 - 3.0) / 2.0 + 0.5 (Instagram)
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 5.75).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_is_scoring_error() {
        let pipeline = sample_pipeline();
        let mut input = sample_input();
        input.most_used_platform = "MySpace".to_string();
        let row = FeatureExtractor::new().extract(&input);

        let err = pipeline.predict(&[row]).unwrap_err();
        assert!(matches!(err, PredictionError::Scoring(_)));
        assert!(err.to_string().contains("MySpace"));
    }

    #[test]
    fn test_unknown_category_ignored() {
        let mut pipeline = sample_pipeline();
        pipeline.categorical[0].handle_unknown = HandleUnknown::Ignore;
        let mut input = sample_input();
        input.most_used_platform = "MySpace".to_string();
        let row = FeatureExtractor::new().extract(&input);

        let scores = pipeline.predict(&[row]).unwrap();
        assert!((scores[0] - 5.25).abs() < 1e-9);
    }

    #[test]
    fn test_schema_mismatch() {
        let pipeline = LinearPipeline::from_json(
            r#"{"intercept": 1.0, "numeric": [{"column": "Gender", "mean": 0.0, "scale": 1.0, "coef": 1.0}]}"#,
        )
        .unwrap();
        let row = FeatureExtractor::new().extract(&sample_input());
        assert!(matches!(
            pipeline.predict(&[row]),
            Err(PredictionError::Scoring(_))
        ));

        let pipeline = LinearPipeline::from_json(
            r#"{"intercept": 1.0, "numeric": [{"column": "Screen_Time", "mean": 0.0, "scale": 1.0, "coef": 1.0}]}"#,
        )
        .unwrap();
        let row = FeatureExtractor::new().extract(&sample_input());
        let err = pipeline.predict(&[row]).unwrap_err();
        assert!(err.to_string().contains("Screen_Time"));
    }

    #[test]
    fn test_non_finite_value_is_scoring_error() {
        let pipeline = sample_pipeline();
        let mut input = sample_input();
        input.avg_daily_usage_hours = f64::NAN;
        let row = FeatureExtractor::new().extract(&input);

        let err = pipeline.predict(&[row]).unwrap_err();
        assert!(matches!(err, PredictionError::Scoring(_)));
        assert!(err.to_string().contains("Avg_Daily_Usage_Hours"));
    }

    #[test]
    fn test_zero_scale_treated_as_unit() {
        let step = NumericStep {
            column: "Age".to_string(),
            mean: 18.0,
            scale: 0.0,
            coef: 0.5,
        };
        assert_eq!(step.contribution(20.0), 1.0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let pipeline = sample_pipeline();
        let extractor = FeatureExtractor::new();
        let mut heavy = sample_input();
        heavy.avg_daily_usage_hours = 9.0;

        let rows = extractor.extract_batch(&[heavy, sample_input()]);
        let scores = pipeline.predict(&rows).unwrap();

        assert_eq!(scores.len(), 2);
        assert!(scores[0] > scores[1]);
        assert!((scores[1] - 5.75).abs() < 1e-9);
    }
}
