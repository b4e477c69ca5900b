//! Synthetic training run
//!
//! Produces a model file of the right shape from randomly generated samples.
//! The labels carry no medical meaning.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::catalog::{DISEASES, FEATURE_COUNT, SYMPTOMS};
use crate::errors::{PredictorError, Result};
use crate::model::{ExtraTreesClassifier, FitParams, ModelSummary};

/// Inclusive bounds on the number of symptoms switched on per sample
pub const MIN_ACTIVE_SYMPTOMS: usize = 3;
pub const MAX_ACTIVE_SYMPTOMS: usize = 7;

#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub n_samples: usize,
    pub feature_count: usize,
    pub fit: FitParams,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            feature_count: FEATURE_COUNT,
            fit: FitParams::default(),
        }
    }
}

/// Random samples: uniform label, 3 to 7 distinct active symptoms per row
pub fn generate_training_data<R: Rng>(
    params: &TrainingParams,
    rng: &mut R,
) -> Result<(Vec<Vec<f32>>, Vec<usize>)> {
    let max_idx = SYMPTOMS.len().min(params.feature_count);
    if max_idx < MAX_ACTIVE_SYMPTOMS {
        return Err(PredictorError::training(format!(
            "need at least {} symptom features, have {}",
            MAX_ACTIVE_SYMPTOMS, max_idx
        )));
    }

    let mut x = Vec::with_capacity(params.n_samples);
    let mut y = Vec::with_capacity(params.n_samples);

    for _ in 0..params.n_samples {
        y.push(rng.random_range(0..DISEASES.len()));

        let mut row = vec![0.0_f32; params.feature_count];
        let n_active = rng.random_range(MIN_ACTIVE_SYMPTOMS..=MAX_ACTIVE_SYMPTOMS);
        for idx in rand::seq::index::sample(rng, max_idx, n_active) {
            row[idx] = 1.0;
        }
        x.push(row);
    }

    Ok((x, y))
}

/// Generate data, fit a forest and write it to `output`
pub fn train_and_save<P: AsRef<Path>>(params: &TrainingParams, output: P) -> Result<ModelSummary> {
    let output = output.as_ref();
    let mut rng = StdRng::seed_from_u64(params.fit.random_state);

    info!("Generating {} training samples...", params.n_samples);
    let (x, y) = generate_training_data(params, &mut rng)?;
    info!(
        "Training data shape: X: ({}, {}), y: ({},)",
        x.len(),
        params.feature_count,
        y.len()
    );

    info!(
        "Training ExtraTreesClassifier with {} estimators...",
        params.fit.n_estimators
    );
    let model = ExtraTreesClassifier::fit(&x, &y, DISEASES.len(), &params.fit)?;

    model.save(output)?;
    Ok(model.summary())
}
