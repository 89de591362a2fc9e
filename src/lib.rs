//! Addiction Score Service Library
//!
//! Loads a pre-trained regression pipeline once, scores survey records
//! through it and maps each score onto a Low / Moderate / High level.
//! Exposed through an interactive CLI and a single HTTP endpoint.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod server;
pub mod testing;
pub mod types;

pub use collector::{InputCollector, PayloadSource, PromptSource};
pub use config::AppConfig;
pub use error::PredictionError;
pub use feature_extractor::FeatureExtractor;
pub use models::{inference::Predictor, loader::ModelLoader};
pub use types::{categorize, AddictionCategory, CategoryThresholds, PredictionInput};
