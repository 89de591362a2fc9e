//! Shared fixtures for unit and integration tests.

use crate::models::pipeline::{CategoricalStep, HandleUnknown, LinearPipeline, NumericStep};
use crate::types::input::PredictionInput;
use std::collections::HashMap;

/// A well-formed record with 4.0 daily usage hours on Instagram
pub fn sample_input() -> PredictionInput {
    PredictionInput {
        age: 20,
        gender: "Male".to_string(),
        academic_level: "Undergraduate".to_string(),
        avg_daily_usage_hours: 4.0,
        most_used_platform: "Instagram".to_string(),
        affects_academic_performance: "Yes".to_string(),
        sleep_hours_per_night: 7.0,
        mental_health_score: 6,
        relationship_status: "Single".to_string(),
        conflicts_over_social_media: 2,
    }
}

/// `sample_input` as a JSON request body
pub fn sample_body() -> String {
    serde_json::json!({
        "Age": 20,
        "Gender": "Male",
        "Academic_Level": "Undergraduate",
        "Avg_Daily_Usage_Hours": 4.0,
        "Most_Used_Platform": "Instagram",
        "Affects_Academic_Performance": "Yes",
        "Sleep_Hours_Per_Night": 7.0,
        "Mental_Health_Score": 6,
        "Relationship_Status": "Single",
        "Conflicts_Over_Social_Media": 2
    })
    .to_string()
}

/// score = 5.0 + 0.5 * (usage - 3.0) / 2.0 + platform weight
///
/// `sample_input` scores 5.75.
pub fn sample_pipeline() -> LinearPipeline {
    let mut weights = HashMap::new();
    weights.insert("Instagram".to_string(), 0.5);
    weights.insert("TikTok".to_string(), 1.0);
    weights.insert("Facebook".to_string(), -0.25);

    LinearPipeline {
        name: "test_pipeline".to_string(),
        intercept: 5.0,
        numeric: vec![NumericStep {
            column: "Avg_Daily_Usage_Hours".to_string(),
            mean: 3.0,
            scale: 2.0,
            coef: 0.5,
        }],
        categorical: vec![CategoricalStep {
            column: "Most_Used_Platform".to_string(),
            weights,
            handle_unknown: HandleUnknown::Error,
        }],
    }
}

/// Serialized `sample_pipeline`, as written to an artifact file
pub fn sample_pipeline_json() -> String {
    serde_json::to_string_pretty(&sample_pipeline()).unwrap_or_default()
}
