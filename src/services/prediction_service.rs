//! Prediction service
//!
//! Encode symptoms, run the model, rank the classes. Shared by the HTTP
//! handler and the offline CLI commands.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{DEFAULT_TOP_K, DISEASES};
use crate::errors::{PredictorError, Result};
use crate::features::FeatureEncoder;
use crate::model::ProbabilityModel;
use crate::ranking::{DiseaseScore, top_k};

pub struct PredictionService {
    model: Arc<dyn ProbabilityModel>,
    encoder: FeatureEncoder,
    labels: Vec<String>,
    top_k: usize,
}

impl PredictionService {
    /// Build a service over `model` using the built-in disease labels
    pub fn new(model: Arc<dyn ProbabilityModel>) -> Result<Self> {
        Self::with_labels(model, DISEASES.iter().map(|d| d.to_string()).collect())
    }

    pub fn with_labels(model: Arc<dyn ProbabilityModel>, labels: Vec<String>) -> Result<Self> {
        if model.n_classes() > labels.len() {
            return Err(PredictorError::model_format(format!(
                "model predicts {} classes but only {} disease labels are known",
                model.n_classes(),
                labels.len()
            )));
        }
        let encoder = FeatureEncoder::new(model.n_features())?;

        Ok(Self {
            model,
            encoder,
            labels,
            top_k: DEFAULT_TOP_K,
        })
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn model(&self) -> &Arc<dyn ProbabilityModel> {
        &self.model
    }

    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Vec<DiseaseScore>> {
        let encoded = self.encoder.encode(symptoms);
        debug!(
            "Encoded {} symptoms into {} active features ({} unknown)",
            symptoms.len(),
            encoded.active_count(),
            encoded.unknown.len()
        );

        let proba = self.model.predict_proba(&encoded.features)?;
        if proba.len() != self.model.n_classes() {
            return Err(PredictorError::inference(format!(
                "model returned {} probabilities for {} classes",
                proba.len(),
                self.model.n_classes()
            )));
        }

        let ranked = top_k(&proba, self.labels.as_slice(), self.top_k)?;
        info!(
            "Prediction made: {}",
            ranked
                .first()
                .map(|s| format!("{} ({:.3})", s.disease, s.probability))
                .unwrap_or_else(|| "no candidates".to_string())
        );
        Ok(ranked)
    }
}
