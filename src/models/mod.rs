//! Model loading and inference components

pub mod inference;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod pipeline;

pub use inference::Predictor;
pub use loader::ModelLoader;
pub use pipeline::{LinearPipeline, RegressionPipeline};
