//! Rounding of adjusted predictions to whole units

/// Round half up: `floor(value + 0.5)`.
///
/// Ties go toward positive infinity, so `2.5 -> 3` and `-2.5 -> -2`.
pub fn round_to_nearest_whole(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
