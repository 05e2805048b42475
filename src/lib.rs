//! Body Measurement Predictor Library
//!
//! Predicts chest, waist, neck and hip circumferences from age, height,
//! weight, gender and body type using four independently trained
//! regression models, then applies fixed bias corrections and rounds the
//! results to whole units.

pub mod config;
pub mod correction;
pub mod error;
pub mod feature_encoder;
pub mod models;
pub mod rounding;
pub mod types;

pub use config::AppConfig;
pub use error::PredictError;
pub use feature_encoder::{EncodedFeatures, FeatureEncoder};
pub use models::inference::{predict_from_args, run_pipeline, InferencePipeline};
pub use models::registry::ModelRegistry;
pub use models::regressor::{Regressor, Target};
pub use types::{prediction::PredictionResult, subject::SubjectInput};
