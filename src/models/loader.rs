//! ONNX regressor loader

use crate::feature_encoder::{EncodedFeatures, FEATURE_COUNT};
use crate::models::regressor::{Regressor, Target};
use anyhow::{anyhow, bail, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Loaded ONNX regression model for one target
pub struct OnnxRegressor {
    /// Target this model predicts
    pub target: Target,
    /// ONNX Runtime session (run needs exclusive access)
    session: Mutex<Session>,
    /// Input name for the model
    pub input_name: String,
    /// Output name holding the prediction
    pub output_name: String,
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &EncodedFeatures) -> Result<f64> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, features.to_f32_vec()))
            .context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| anyhow!("model produced no output named {}", self.output_name))?;
        let (_shape, data) = output
            .try_extract_tensor::<f32>()
            .context("Regressor output is not a float tensor")?;
        let value = data
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Regressor output tensor is empty"))?;

        debug!(model = %self.target, prediction = value, "Extracted from tensor");
        Ok(f64::from(value))
    }
}

/// Loader for ONNX regressors
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init()
            .commit()
            .context("Failed to initialize ONNX Runtime")?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a single regressor from file
    pub fn load_regressor<P: AsRef<Path>>(&self, path: P, target: Target) -> Result<OnnxRegressor> {
        let path = path.as_ref();

        if !path.exists() {
            bail!("Model file not found: {}", path.display());
        }

        info!(model = %target, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // skl2onnx names regression outputs "variable"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "variable" || o.name.contains("output"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        info!(
            model = %target,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(OnnxRegressor {
            target,
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file_is_an_error() {
        let loader = ModelLoader { onnx_threads: 1 };
        let err = loader
            .load_regressor("/nonexistent/chest_model.onnx", Target::Chest)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Model file not found"));
    }

    #[test]
    fn test_with_threads_returns_initialized_loader() {
        let loader = ModelLoader::with_threads(2).unwrap();
        assert_eq!(loader.onnx_threads, 2);
    }
}
