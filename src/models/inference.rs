//! Multi-model inference pipeline for body measurement prediction

use crate::config::AppConfig;
use crate::correction::apply_bias_correction;
use crate::error::{PredictError, Result};
use crate::feature_encoder::{EncodedFeatures, EncodedSubject, FeatureEncoder};
use crate::models::registry::ModelRegistry;
use crate::models::regressor::{Regressor, Target};
use crate::types::prediction::{PredictionResult, RawPredictions};
use crate::types::subject::SubjectInput;
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Parse positional arguments, load the registry and predict once.
///
/// Argument, numeric and gender errors are reported before any artifact is
/// loaded.
pub async fn predict_from_args<S: AsRef<str>>(
    config: &AppConfig,
    args: &[S],
) -> Result<PredictionResult> {
    let subject = SubjectInput::from_args(args)?;
    info!(
        age = subject.age,
        height = subject.height,
        weight = subject.weight,
        gender = %subject.gender,
        body_type = %subject.body_type,
        "Received inputs"
    );

    let registry = ModelRegistry::load(&config.artifacts, &config.inference)?;
    let pipeline = InferencePipeline::new(Arc::new(registry));

    if config.inference.parallel {
        pipeline.run_parallel(&subject).await
    } else {
        pipeline.run(&subject)
    }
}

/// Run the whole pipeline for one subject, invoking the models in sequence.
pub fn run_pipeline(registry: &ModelRegistry, subject: &SubjectInput) -> Result<PredictionResult> {
    let encoded = encode(registry, subject)?;

    let mut values = HashMap::with_capacity(Target::ALL.len());
    for target in Target::ALL {
        let value = predict_one(registry.model(target).as_ref(), target, &encoded.features)?;
        values.insert(target, value);
    }

    finish(raw_predictions(&values)?, &encoded)
}

/// Pipeline over a shared registry, able to fan the four models out.
#[derive(Clone)]
pub struct InferencePipeline {
    registry: Arc<ModelRegistry>,
}

impl InferencePipeline {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Sequential run on the caller's thread
    pub fn run(&self, subject: &SubjectInput) -> Result<PredictionResult> {
        run_pipeline(&self.registry, subject)
    }

    /// Run with the four models executing concurrently.
    ///
    /// Waits for all of them; the first failure aborts the rest and is
    /// returned, so no partial result is ever produced.
    pub async fn run_parallel(&self, subject: &SubjectInput) -> Result<PredictionResult> {
        let encoded = encode(&self.registry, subject)?;

        let mut tasks = JoinSet::new();
        let mut task_targets = HashMap::with_capacity(Target::ALL.len());
        for target in Target::ALL {
            let model = Arc::clone(self.registry.model(target));
            let features = encoded.features;
            let handle = tasks.spawn_blocking(move || {
                (target, predict_one(model.as_ref(), target, &features))
            });
            task_targets.insert(handle.id(), target);
        }

        let mut values = HashMap::with_capacity(Target::ALL.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok((target, result)) => result.map(|value| (target, value)),
                Err(join_error) => {
                    let target = *task_targets
                        .get(&join_error.id())
                        .expect("every spawned task id is registered");
                    Err(PredictError::inference(target, join_error))
                }
            };

            match outcome {
                Ok((target, value)) => {
                    values.insert(target, value);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        finish(raw_predictions(&values)?, &encoded)
    }
}

fn encode(registry: &ModelRegistry, subject: &SubjectInput) -> Result<EncodedSubject> {
    let encoded = FeatureEncoder::new(registry.vocabulary()).encode(subject)?;
    debug!(
        label = %encoded.combined_label,
        features = ?encoded.features.as_slice(),
        "Subject encoded"
    );
    Ok(encoded)
}

/// Invoke one model. Non-finite outputs are treated as failures.
fn predict_one(model: &dyn Regressor, target: Target, features: &EncodedFeatures) -> Result<f64> {
    let value = model
        .predict(features)
        .map_err(|e| PredictError::inference(target, e))?;

    if !value.is_finite() {
        return Err(PredictError::inference(
            target,
            anyhow!("model returned non-finite value {value}"),
        ));
    }

    Ok(value)
}

fn raw_predictions(values: &HashMap<Target, f64>) -> Result<RawPredictions> {
    let get = |target: Target| {
        values
            .get(&target)
            .copied()
            .ok_or_else(|| PredictError::inference(target, anyhow!("no prediction produced")))
    };

    Ok(RawPredictions {
        chest: get(Target::Chest)?,
        waist: get(Target::Waist)?,
        neck: get(Target::Neck)?,
        hip: get(Target::Hip)?,
    })
}

fn finish(raw: RawPredictions, encoded: &EncodedSubject) -> Result<PredictionResult> {
    debug!(
        chest = raw.chest,
        waist = raw.waist,
        neck = raw.neck,
        hip = raw.hip,
        "Raw model predictions"
    );

    let adjusted = apply_bias_correction(&raw, &encoded.combined_label);
    let result = PredictionResult::from_adjusted(&adjusted);

    info!(
        label = %encoded.combined_label,
        chest = result.chest_prediction,
        waist = result.waist_prediction,
        neck = result.neck_prediction,
        hip = result.hip_prediction,
        "Prediction complete"
    );

    Ok(result)
}
