//! Prediction output data structures

use crate::rounding::round_to_nearest_whole;
use serde::{Deserialize, Serialize};

/// Unmodified model outputs, one per target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPredictions {
    pub chest: f64,
    pub waist: f64,
    pub neck: f64,
    pub hip: f64,
}

/// Predictions after bias correction, still unrounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedPredictions {
    pub chest: f64,
    pub waist: f64,
    pub neck: f64,
    pub hip: f64,
}

/// Final record emitted for one subject.
///
/// Field names and the integer/float split are a compatibility contract for
/// downstream consumers. The `*_raw` fields hold the pre-rounding values the
/// integers were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub chest_prediction: i64,
    pub waist_prediction: i64,
    pub neck_prediction: i64,
    pub hip_prediction: i64,
    pub chest_raw: f64,
    pub waist_raw: f64,
    pub neck_raw: f64,
    pub hip_raw: f64,
}

impl PredictionResult {
    /// Round the adjusted predictions and package them with their float values
    pub fn from_adjusted(adjusted: &AdjustedPredictions) -> Self {
        Self {
            chest_prediction: round_to_nearest_whole(adjusted.chest),
            waist_prediction: round_to_nearest_whole(adjusted.waist),
            neck_prediction: round_to_nearest_whole(adjusted.neck),
            hip_prediction: round_to_nearest_whole(adjusted.hip),
            chest_raw: adjusted.chest,
            waist_raw: adjusted.waist,
            neck_raw: adjusted.neck,
            hip_raw: adjusted.hip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_adjusted_rounds_half_up() {
        let adjusted = AdjustedPredictions {
            chest: 40.5,
            waist: 41.2,
            neck: 35.49,
            hip: 41.4,
        };

        let result = PredictionResult::from_adjusted(&adjusted);

        assert_eq!(result.chest_prediction, 41);
        assert_eq!(result.waist_prediction, 41);
        assert_eq!(result.neck_prediction, 35);
        assert_eq!(result.hip_prediction, 41);
        assert_eq!(result.chest_raw, 40.5);
        assert_eq!(result.neck_raw, 35.49);
    }

    #[test]
    fn test_serialized_field_types() {
        let result = PredictionResult::from_adjusted(&AdjustedPredictions {
            chest: 40.0,
            waist: 41.2,
            neck: 35.1,
            hip: 41.4,
        });

        let json: serde_json::Value = serde_json::to_value(result).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 8);
        for key in [
            "chest_prediction",
            "waist_prediction",
            "neck_prediction",
            "hip_prediction",
        ] {
            assert!(object[key].is_i64(), "{key} should be an integer");
        }
        for key in ["chest_raw", "waist_raw", "neck_raw", "hip_raw"] {
            assert!(object[key].is_f64(), "{key} should be a float");
        }
        // Whole floats stay floats on the wire
        assert_eq!(serde_json::to_string(&object["chest_raw"]).unwrap(), "40.0");
    }
}
