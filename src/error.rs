//! Error taxonomy for the prediction pipeline

use crate::models::regressor::Target;
use std::error::Error as StdError;
use thiserror::Error;

/// Boxed underlying cause carried by load and inference failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PredictError>;

/// Exit status when configuration or logging setup fails
pub const SETUP_FAILURE_EXIT: u8 = 1;

/// Exit status when the result record cannot be written
pub const OUTPUT_FAILURE_EXIT: u8 = 8;

/// Every way a single prediction invocation can fail.
///
/// All variants are terminal: nothing is retried and no partial result is
/// produced once one of these is returned.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Insufficient arguments. Expected: age, height, weight, gender, bodyType")]
    Usage,

    #[error("{field} must be numeric (got {value:?})")]
    InvalidNumericInput { field: &'static str, value: String },

    #[error("gender must be 'male' or 'female' (got {0:?})")]
    InvalidGender(String),

    #[error("body type {0:?} is not in the trained vocabulary")]
    UnknownBodyType(String),

    #[error("failed to load {artifact}")]
    ArtifactLoad {
        artifact: String,
        #[source]
        source: BoxError,
    },

    #[error("{target} model failed during prediction")]
    Inference {
        target: Target,
        #[source]
        source: BoxError,
    },
}

impl PredictError {
    /// Build an artifact load error from any underlying cause.
    pub fn artifact(artifact: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.into(),
            source: source.into(),
        }
    }

    /// Build an inference error for the given target.
    pub fn inference(target: Target, source: impl Into<BoxError>) -> Self {
        Self::Inference {
            target,
            source: source.into(),
        }
    }

    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage => 2,
            Self::InvalidNumericInput { .. } => 3,
            Self::InvalidGender(_) => 4,
            Self::UnknownBodyType(_) => 5,
            Self::ArtifactLoad { .. } => 6,
            Self::Inference { .. } => 7,
        }
    }
}
