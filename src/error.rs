//! Error types for loading, input collection and scoring

use std::path::PathBuf;

/// Errors surfaced by the prediction core.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The model artifact does not exist at the configured path
    #[error("model not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// The artifact exists but could not be decoded
    #[error("failed to read model artifact {}: {reason}", path.display())]
    ArtifactUnreadable { path: PathBuf, reason: String },

    /// A field value could not be coerced to its declared type
    #[error("invalid value for {field}: {message}")]
    InputValidation { field: String, message: String },

    /// Input ended before every field was supplied
    #[error("input ended before {field} was provided")]
    InputClosed { field: &'static str },

    /// The pipeline rejected the records it was asked to score
    #[error("scoring failed: {0}")]
    Scoring(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictionError {
    /// True for errors caused by the caller's input rather than the model
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PredictionError::InputValidation { .. } | PredictionError::InputClosed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;
