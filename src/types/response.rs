//! Prediction results and HTTP response bodies

use crate::types::category::AddictionCategory;
use serde::Serialize;

/// A scored and categorized record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Raw regression output
    pub score: f64,
    pub category: AddictionCategory,
}

impl Prediction {
    /// Score rounded to two decimal places
    pub fn rounded_score(&self) -> f64 {
        round_to_cents(self.score)
    }
}

/// Round half-to-even on the exact binary value, the same result as
/// formatting with two decimals.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Body returned by `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        status_code: u16,
        predicted_score: f64,
        category: AddictionCategory,
    },
    Failure {
        status_code: u16,
        message: String,
    },
}

impl PredictResponse {
    pub fn success(prediction: &Prediction) -> Self {
        PredictResponse::Success {
            status_code: 200,
            predicted_score: prediction.rounded_score(),
            category: prediction.category,
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        PredictResponse::Failure {
            status_code,
            message: message.into(),
        }
    }

    pub fn model_not_loaded() -> Self {
        Self::failure(500, "Model not loaded!")
    }

    pub fn status_code(&self) -> u16 {
        match self {
            PredictResponse::Success { status_code, .. } => *status_code,
            PredictResponse::Failure { status_code, .. } => *status_code,
        }
    }
}
