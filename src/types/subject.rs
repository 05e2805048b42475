//! Subject input data structures

use crate::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as understood by the trained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Numeric code used in the feature vector (female: 0, male: 1)
    pub fn code(self) -> u8 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    /// Parse a gender string, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            _ => Err(PredictError::InvalidGender(value.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

/// One subject to predict measurements for.
///
/// Gender and body type are kept as supplied; normalization happens in the
/// feature encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInput {
    /// Age in years
    pub age: f64,
    /// Height as used during training
    pub height: f64,
    /// Weight as used during training
    pub weight: f64,
    /// Gender string, e.g. "male"
    pub gender: String,
    /// Body type string, e.g. "Oval"
    pub body_type: String,
}

impl SubjectInput {
    /// Number of positional arguments an invocation must supply
    pub const ARG_COUNT: usize = 5;

    /// Create a subject input from already-parsed values
    pub fn new(
        age: f64,
        height: f64,
        weight: f64,
        gender: impl Into<String>,
        body_type: impl Into<String>,
    ) -> Self {
        Self {
            age,
            height,
            weight,
            gender: gender.into(),
            body_type: body_type.into(),
        }
    }

    /// Build a subject from positional arguments:
    /// `age height weight gender bodyType`. Extra arguments are ignored.
    ///
    /// Usage, numeric and gender errors are all caught here, before any
    /// model artifact is touched. The gender string itself is kept as given.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.len() < Self::ARG_COUNT {
            return Err(PredictError::Usage);
        }

        let age = parse_measurement("age", args[0].as_ref())?;
        let height = parse_measurement("height", args[1].as_ref())?;
        let weight = parse_measurement("weight", args[2].as_ref())?;
        Gender::parse(args[3].as_ref())?;

        Ok(Self::new(
            age,
            height,
            weight,
            args[3].as_ref(),
            args[4].as_ref(),
        ))
    }
}

/// Parse one numeric argument. NaN and infinities are rejected.
fn parse_measurement(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PredictError::InvalidNumericInput {
            field,
            value: raw.to_string(),
        })
}
