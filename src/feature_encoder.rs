//! Feature encoding for body measurement model inference.
//!
//! Categorical inputs are turned into the numeric codes used during model
//! training, and the five features are laid out in the exact order the
//! regressors expect.

use crate::error::{PredictError, Result};
use crate::models::vocabulary::BodyTypeVocabulary;
use crate::types::subject::{Gender, SubjectInput};

/// Number of features fed to every regressor
pub const FEATURE_COUNT: usize = 5;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["age", "height", "weight", "gender_numeric", "body_type_encoded"];

/// Fixed-order feature vector: `[age, height, weight, genderCode, bodyTypeCode]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedFeatures([f64; FEATURE_COUNT]);

impl EncodedFeatures {
    /// Assemble the vector from its parts
    pub fn new(age: f64, height: f64, weight: f64, gender_code: u8, body_type_code: u32) -> Self {
        Self([
            age,
            height,
            weight,
            f64::from(gender_code),
            f64::from(body_type_code),
        ])
    }

    /// Features as f64 in model order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Features as f32, the dtype ONNX regressors take
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

/// Encode a gender string (female: 0, male: 1).
pub fn encode_gender(gender: &str) -> Result<u8> {
    Gender::parse(gender).map(Gender::code)
}

/// Build the combined body-type label used at training time.
///
/// Both parts are trimmed, the gender is capitalized and every word of the
/// body type gets an upper-case initial, e.g. `("male", "oval") -> "Male Oval"`.
/// The rest of each body-type word keeps its casing.
pub fn build_combined_body_type_label(gender: &str, body_type: &str) -> String {
    format!(
        "{} {}",
        capitalize(gender.trim()),
        upper_word_initials(body_type.trim())
    )
}

/// Look up the numeric code of a combined label. Exact match only.
pub fn encode_body_type(label: &str, vocabulary: &BodyTypeVocabulary) -> Result<u32> {
    vocabulary
        .code(label)
        .ok_or_else(|| PredictError::UnknownBodyType(label.to_string()))
}

/// First character upper-cased, the rest lower-cased
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-case the first character of each whitespace-separated word
fn upper_word_initials(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Output of encoding one subject
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSubject {
    /// Feature vector passed to every model
    pub features: EncodedFeatures,
    /// Combined label the body-type code was looked up with
    pub combined_label: String,
}

/// Feature encoder that transforms a subject into model input features.
pub struct FeatureEncoder<'a> {
    vocabulary: &'a BodyTypeVocabulary,
}

impl<'a> FeatureEncoder<'a> {
    /// Create an encoder backed by the trained body-type vocabulary.
    pub fn new(vocabulary: &'a BodyTypeVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Encode a subject.
    ///
    /// Gender is validated first, then the combined label is looked up;
    /// neither failure is defaulted to a sentinel code.
    pub fn encode(&self, subject: &SubjectInput) -> Result<EncodedSubject> {
        let gender_code = encode_gender(&subject.gender)?;
        let combined_label = build_combined_body_type_label(&subject.gender, &subject.body_type);
        let body_type_code = encode_body_type(&combined_label, self.vocabulary)?;

        Ok(EncodedSubject {
            features: EncodedFeatures::new(
                subject.age,
                subject.height,
                subject.weight,
                gender_code,
                body_type_code,
            ),
            combined_label,
        })
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching model input order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}
