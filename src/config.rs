//! Configuration management for the measurement predictor

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/predictor.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub inference: InferenceConfig,
    pub logging: LoggingConfig,
}

/// Locations of the five model artifacts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory the artifact file names are resolved against
    pub dir: String,
    pub chest_model: String,
    pub waist_model: String,
    pub neck_model: String,
    pub hip_model: String,
    /// Body-type vocabulary (JSON)
    pub body_type_encoder: String,
}

impl ArtifactsConfig {
    /// Full path of an artifact file name
    pub fn path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.dir).join(file_name)
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            chest_model: "chest_model.onnx".to_string(),
            waist_model: "waist_model.onnx".to_string(),
            neck_model: "neck_model.onnx".to_string(),
            hip_model: "hip_model.onnx".to_string(),
            body_type_encoder: "body_type_encoder.json".to_string(),
        }
    }
}

/// Inference configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Run the four models concurrently
    pub parallel: bool,
    /// Number of threads for ONNX inference per model (default: 1)
    pub onnx_threads: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            onnx_threads: 1,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    ///
    /// The file is optional. `PREDICTOR_`-prefixed environment variables
    /// override it, with `__` separating nested keys
    /// (e.g. `PREDICTOR_ARTIFACTS__DIR`).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("PREDICTOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
