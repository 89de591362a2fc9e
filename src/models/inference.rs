//! Predictor: scores records through the loaded pipeline and categorizes them

use crate::config::AppConfig;
use crate::error::{PredictionError, Result};
use crate::feature_extractor::FeatureExtractor;
use crate::models::loader::ModelLoader;
use crate::models::pipeline::RegressionPipeline;
use crate::types::category::CategoryThresholds;
use crate::types::input::PredictionInput;
use crate::types::response::Prediction;
use tracing::{debug, info};

/// Read-only handle around a loaded pipeline, shared across requests
pub struct Predictor {
    pipeline: Box<dyn RegressionPipeline>,
    extractor: FeatureExtractor,
    thresholds: CategoryThresholds,
}

impl Predictor {
    pub fn new(pipeline: Box<dyn RegressionPipeline>, thresholds: CategoryThresholds) -> Self {
        Self {
            pipeline,
            extractor: FeatureExtractor::new(),
            thresholds,
        }
    }

    /// Load the configured artifact and build a predictor
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.model.onnx_threads);
        let pipeline = loader.load(&config.model.path)?;
        let predictor = Self::new(pipeline, config.categories.clone());

        info!(
            model = %predictor.model_name(),
            features = predictor.extractor.feature_count(),
            columns = ?predictor.extractor.feature_names(),
            "Predictor initialized"
        );

        Ok(predictor)
    }

    pub fn model_name(&self) -> &str {
        self.pipeline.name()
    }

    pub fn thresholds(&self) -> &CategoryThresholds {
        &self.thresholds
    }

    /// Score a batch of records, one score per input in input order
    pub fn predict(&self, inputs: &[PredictionInput]) -> Result<Vec<f64>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.extractor.extract_batch(inputs);
        let scores = self.pipeline.predict(&rows)?;

        if scores.len() != inputs.len() {
            return Err(PredictionError::Scoring(format!(
                "pipeline returned {} scores for {} inputs",
                scores.len(),
                inputs.len()
            )));
        }

        debug!(model = %self.pipeline.name(), rows = inputs.len(), "Batch scored");

        Ok(scores)
    }

    /// Score and categorize a single record
    pub fn predict_one(&self, input: &PredictionInput) -> Result<Prediction> {
        let score = self
            .predict(std::slice::from_ref(input))?
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Scoring("pipeline returned no score".to_string()))?;

        Ok(Prediction {
            score,
            category: self.thresholds.categorize(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_extractor::FeatureRow;
    use crate::testing::{sample_input, sample_pipeline};
    use crate::types::category::AddictionCategory;

    fn predictor() -> Predictor {
        Predictor::new(Box::new(sample_pipeline()), CategoryThresholds::default())
    }

    /// Pipeline that drops the last row's score
    struct ShortPipeline;

    impl RegressionPipeline for ShortPipeline {
        fn name(&self) -> &str {
            "short"
        }

        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
            Ok(vec![1.0; rows.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_predict_one() {
        let prediction = predictor().predict_one(&sample_input()).unwrap();
        assert!((prediction.score - 5.75).abs() < 1e-9);
        assert_eq!(prediction.category, AddictionCategory::Moderate);
        assert_eq!(prediction.rounded_score(), 5.75);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let predictor = predictor();
        let first = predictor.predict_one(&sample_input()).unwrap();
        for _ in 0..5 {
            assert_eq!(predictor.predict_one(&sample_input()).unwrap(), first);
        }
    }

    #[test]
    fn test_batch_order_and_categories() {
        let predictor = predictor();
        let mut low = sample_input();
        low.avg_daily_usage_hours = -7.0;
        low.most_used_platform = "Facebook".to_string();
        let mut high = sample_input();
        high.avg_daily_usage_hours = 9.0;
        high.most_used_platform = "TikTok".to_string();

        let scores = predictor
            .predict(&[high.clone(), sample_input(), low.clone()])
            .unwrap();

        // 5.0 + 1.5 + 1.0, 5.75, 5.0 - 2.5 - 0.25
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 7.5).abs() < 1e-9);
        assert!((scores[2] - 2.25).abs() < 1e-9);
        assert_eq!(
            predictor.predict_one(&high).unwrap().category,
            AddictionCategory::High
        );
        assert_eq!(
            predictor.predict_one(&low).unwrap().category,
            AddictionCategory::Low
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(predictor().predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_scoring_error_propagates() {
        let mut input = sample_input();
        input.most_used_platform = "Orkut".to_string();
        let err = predictor().predict_one(&input).unwrap_err();
        assert!(matches!(err, PredictionError::Scoring(_)));
    }

    #[test]
    fn test_score_count_mismatch() {
        let predictor = Predictor::new(Box::new(ShortPipeline), CategoryThresholds::default());
        let err = predictor.predict(&[sample_input(), sample_input()]).unwrap_err();
        assert!(err.to_string().contains("1 scores for 2 inputs"));
    }

    #[test]
    fn test_configured_thresholds_applied() {
        let thresholds = CategoryThresholds {
            low: 6.0,
            moderate: 8.0,
        };
        let predictor = Predictor::new(Box::new(sample_pipeline()), thresholds.clone());

        assert_eq!(predictor.thresholds(), &thresholds);
        assert_eq!(
            predictor.predict_one(&sample_input()).unwrap().category,
            AddictionCategory::Low
        );
    }
}
