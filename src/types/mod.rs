//! Type definitions for the measurement prediction pipeline

pub mod prediction;
pub mod subject;

pub use prediction::{AdjustedPredictions, PredictionResult, RawPredictions};
pub use subject::{Gender, SubjectInput};
