//! Type definitions for the addiction score service

pub mod category;
pub mod input;
pub mod response;

pub use category::{categorize, AddictionCategory, CategoryThresholds};
pub use input::{FieldKind, FieldSpec, PredictionInput, FIELDS};
pub use response::{PredictResponse, Prediction};
