//! Model artifact loader

use crate::error::{PredictionError, Result};
use crate::models::pipeline::{LinearPipeline, RegressionPipeline};
use std::path::Path;
use tracing::info;

/// Loads a pipeline artifact once at startup, dispatching on file extension.
pub struct ModelLoader {
    /// Intra-op threads for ONNX sessions
    #[cfg_attr(not(feature = "onnx"), allow(dead_code))]
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load a pipeline artifact.
    ///
    /// A missing file fails with `ArtifactNotFound` before anything is read.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn RegressionPipeline>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PredictionError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), "Loading model artifact");

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let pipeline: Box<dyn RegressionPipeline> = match extension.as_str() {
            "json" => Box::new(LinearPipeline::from_file(path)?),
            "onnx" => self.load_onnx(path)?,
            other => {
                return Err(PredictionError::ArtifactUnreadable {
                    path: path.to_path_buf(),
                    reason: format!("unsupported artifact format {:?}", other),
                })
            }
        };

        info!(model = %pipeline.name(), "Model loaded successfully");

        Ok(pipeline)
    }

    #[cfg(feature = "onnx")]
    fn load_onnx(&self, path: &Path) -> Result<Box<dyn RegressionPipeline>> {
        let pipeline = crate::models::onnx::OnnxPipeline::load(path, self.onnx_threads)?;
        Ok(Box::new(pipeline))
    }

    #[cfg(not(feature = "onnx"))]
    fn load_onnx(&self, path: &Path) -> Result<Box<dyn RegressionPipeline>> {
        Err(PredictionError::ArtifactUnreadable {
            path: path.to_path_buf(),
            reason: "built without the `onnx` feature".to_string(),
        })
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
