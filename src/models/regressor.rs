//! Scalar regressor capability shared by all prediction targets

use crate::feature_encoder::EncodedFeatures;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body measurement predicted by one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Chest,
    Waist,
    Neck,
    Hip,
}

impl Target {
    /// All targets, in output order
    pub const ALL: [Target; 4] = [Target::Chest, Target::Waist, Target::Neck, Target::Hip];

    pub fn name(self) -> &'static str {
        match self {
            Target::Chest => "chest",
            Target::Waist => "waist",
            Target::Neck => "neck",
            Target::Hip => "hip",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that maps an encoded feature vector to one prediction.
///
/// Implementations must be deterministic for identical input and safe to
/// share across threads once loaded.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &EncodedFeatures) -> Result<f64>;
}

/// Regressor that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRegressor(pub f64);

impl Regressor for ConstantRegressor {
    fn predict(&self, _features: &EncodedFeatures) -> Result<f64> {
        Ok(self.0)
    }
}
