//! Fixed bias corrections applied to raw model outputs.
//!
//! These are policy constants, not learned values, and are not exposed
//! through configuration.

use crate::types::prediction::{AdjustedPredictions, RawPredictions};
use tracing::debug;

/// Amount subtracted from every neck prediction
pub const NECK_OFFSET: f64 = 3.0;

/// Margin by which a "Male Oval" waist is pushed above the chest
pub const WAIST_OVER_CHEST_MARGIN: f64 = 1.0;

/// Combined label that triggers the waist-over-chest constraint
const WAIST_OVER_CHEST_LABEL: &str = "male oval";

/// Apply the neck offset and the "Male Oval" waist constraint.
///
/// `combined_label` is the combined body-type label the subject was encoded
/// with. Chest and hip pass through unchanged.
pub fn apply_bias_correction(raw: &RawPredictions, combined_label: &str) -> AdjustedPredictions {
    let neck = raw.neck - NECK_OFFSET;

    let mut waist = raw.waist;
    if requires_waist_over_chest(combined_label) && raw.waist <= raw.chest {
        waist = raw.chest + WAIST_OVER_CHEST_MARGIN;
        debug!(
            label = combined_label,
            raw_waist = raw.waist,
            chest = raw.chest,
            adjusted_waist = waist,
            "Waist raised above chest"
        );
    }

    AdjustedPredictions {
        chest: raw.chest,
        waist,
        neck,
        hip: raw.hip,
    }
}

/// Whether the label is subject to the waist-over-chest constraint
pub fn requires_waist_over_chest(combined_label: &str) -> bool {
    combined_label.trim().to_lowercase() == WAIST_OVER_CHEST_LABEL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(chest: f64, waist: f64, neck: f64, hip: f64) -> RawPredictions {
        RawPredictions {
            chest,
            waist,
            neck,
            hip,
        }
    }

    #[test]
    fn test_neck_offset_applies_to_every_label() {
        for label in ["Male Oval", "Female Hourglass", "Male Rectangle", ""] {
            for neck in [38.1, 0.0, -4.25, 15.0] {
                let adjusted = apply_bias_correction(&raw(40.0, 42.0, neck, 41.0), label);
                assert_eq!(adjusted.neck, neck - 3.0);
            }
        }
    }

    #[test]
    fn test_male_oval_raises_waist_when_not_above_chest() {
        let adjusted = apply_bias_correction(&raw(40.2, 39.8, 38.1, 41.4), "Male Oval");
        assert_eq!(adjusted.chest, 40.2);
        assert_eq!(adjusted.waist, 40.2 + 1.0);
        assert_eq!(adjusted.hip, 41.4);

        // Equal waist and chest also triggers the constraint
        let adjusted = apply_bias_correction(&raw(40.0, 40.0, 38.0, 41.0), "Male Oval");
        assert_eq!(adjusted.waist, 41.0);
        assert_eq!(adjusted.chest, 40.0);
    }

    #[test]
    fn test_male_oval_keeps_waist_already_above_chest() {
        let adjusted = apply_bias_correction(&raw(40.0, 40.5, 38.0, 41.0), "Male Oval");
        assert_eq!(adjusted.waist, 40.5);
    }

    #[test]
    fn test_label_match_is_trimmed_and_case_insensitive() {
        assert!(requires_waist_over_chest("male oval"));
        assert!(requires_waist_over_chest("  MALE OVAL "));
        assert!(!requires_waist_over_chest("Male  Oval"));
        assert!(!requires_waist_over_chest("Female Oval"));
    }

    #[test]
    fn test_other_labels_never_adjust_waist() {
        for label in ["Female Oval", "Male Rectangle", "Female Hourglass"] {
            let adjusted = apply_bias_correction(&raw(44.0, 30.0, 38.0, 41.0), label);
            assert_eq!(adjusted.waist, 30.0);
            assert_eq!(adjusted.chest, 44.0);
        }
    }
}
