//! Model registry: the four regressors plus the body-type vocabulary

use crate::config::{ArtifactsConfig, InferenceConfig};
use crate::error::{PredictError, Result};
use crate::models::loader::ModelLoader;
use crate::models::regressor::{Regressor, Target};
use crate::models::vocabulary::BodyTypeVocabulary;
use std::sync::Arc;
use tracing::info;

/// Read-only set of loaded models shared by every prediction.
pub struct ModelRegistry {
    chest: Arc<dyn Regressor>,
    waist: Arc<dyn Regressor>,
    neck: Arc<dyn Regressor>,
    hip: Arc<dyn Regressor>,
    vocabulary: BodyTypeVocabulary,
}

impl ModelRegistry {
    /// Assemble a registry from already-constructed parts
    pub fn new(
        chest: Arc<dyn Regressor>,
        waist: Arc<dyn Regressor>,
        neck: Arc<dyn Regressor>,
        hip: Arc<dyn Regressor>,
        vocabulary: BodyTypeVocabulary,
    ) -> Self {
        Self {
            chest,
            waist,
            neck,
            hip,
            vocabulary,
        }
    }

    /// Eagerly load all five artifacts. Any failure is fatal.
    pub fn load(artifacts: &ArtifactsConfig, inference: &InferenceConfig) -> Result<Self> {
        let vocab_path = artifacts.path(&artifacts.body_type_encoder);
        let vocabulary = BodyTypeVocabulary::load(&vocab_path)
            .map_err(|e| PredictError::artifact(artifacts.body_type_encoder.clone(), e))?;

        let loader = ModelLoader::with_threads(inference.onnx_threads)
            .map_err(|e| PredictError::artifact("ONNX Runtime environment", e))?;
        let load = |target: Target, file_name: &str| -> Result<Arc<dyn Regressor>> {
            let model = loader
                .load_regressor(artifacts.path(file_name), target)
                .map_err(|e| PredictError::artifact(file_name, e))?;
            Ok(Arc::new(model))
        };

        let registry = Self::new(
            load(Target::Chest, &artifacts.chest_model)?,
            load(Target::Waist, &artifacts.waist_model)?,
            load(Target::Neck, &artifacts.neck_model)?,
            load(Target::Hip, &artifacts.hip_model)?,
            vocabulary,
        );

        info!(
            dir = %artifacts.dir,
            models = Target::ALL.len(),
            body_types = registry.vocabulary.len(),
            "Model registry loaded"
        );

        Ok(registry)
    }

    /// Regressor for a target
    pub fn model(&self, target: Target) -> &Arc<dyn Regressor> {
        match target {
            Target::Chest => &self.chest,
            Target::Waist => &self.waist,
            Target::Neck => &self.neck,
            Target::Hip => &self.hip,
        }
    }

    pub fn vocabulary(&self) -> &BodyTypeVocabulary {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_encoder::EncodedFeatures;
    use crate::models::regressor::ConstantRegressor;

    #[test]
    fn test_model_lookup_by_target() {
        let vocabulary = BodyTypeVocabulary::from_classes(vec!["Male Oval".to_string()]).unwrap();
        let registry = ModelRegistry::new(
            Arc::new(ConstantRegressor(1.0)),
            Arc::new(ConstantRegressor(2.0)),
            Arc::new(ConstantRegressor(3.0)),
            Arc::new(ConstantRegressor(4.0)),
            vocabulary,
        );
        let features = EncodedFeatures::new(30.0, 170.0, 70.0, 1, 0);

        let values: Vec<f64> = Target::ALL
            .iter()
            .map(|&t| registry.model(t).predict(&features).unwrap())
            .collect();

        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(registry.vocabulary().code("Male Oval"), Some(0));
    }

    #[test]
    fn test_load_fails_on_missing_artifacts() {
        let artifacts = ArtifactsConfig {
            dir: "/nonexistent/models".to_string(),
            ..ArtifactsConfig::default()
        };

        let err = ModelRegistry::load(&artifacts, &InferenceConfig::default())
            .err()
            .unwrap();

        match err {
            PredictError::ArtifactLoad { artifact, .. } => {
                assert_eq!(artifact, "body_type_encoder.json")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
