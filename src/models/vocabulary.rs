//! Versioned body-type vocabulary.
//!
//! The vocabulary maps each combined body-type label seen at training time
//! (e.g. "Male Oval") to its numeric code. On disk it is a JSON document:
//!
//! ```json
//! { "version": 1, "classes": ["Female Hourglass", "Male Oval"] }
//! ```
//!
//! A label's code is its index in `classes`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Vocabulary format version this build understands
pub const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    version: u32,
    classes: Vec<String>,
}

/// Immutable label -> code lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTypeVocabulary {
    codes: HashMap<String, u32>,
    classes: Vec<String>,
}

impl BodyTypeVocabulary {
    /// Build a vocabulary from labels in code order.
    ///
    /// Fails on an empty list or duplicate labels.
    pub fn from_classes(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("vocabulary has no classes");
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (index, label) in classes.iter().enumerate() {
            let code = u32::try_from(index).context("vocabulary too large")?;
            if codes.insert(label.clone(), code).is_some() {
                bail!("duplicate class {label:?} in vocabulary");
            }
        }

        Ok(Self { codes, classes })
    }

    /// Parse the JSON vocabulary document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: VocabularyFile =
            serde_json::from_str(json).context("Failed to parse vocabulary JSON")?;

        if file.version != SUPPORTED_VERSION {
            bail!(
                "unsupported vocabulary version {} (expected {})",
                file.version,
                SUPPORTED_VERSION
            );
        }

        Self::from_classes(file.classes)
    }

    /// Load the vocabulary from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary from {}", path.display()))?;
        let vocabulary = Self::from_json_str(&json)?;

        info!(
            path = %path.display(),
            classes = vocabulary.len(),
            "Body type vocabulary loaded"
        );

        Ok(vocabulary)
    }

    /// Code for an exact label, if known
    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Labels in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }
}
