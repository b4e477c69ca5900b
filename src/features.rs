//! Symptom to feature encoding
//!
//! A feature vector is a fixed-length binary vector, one slot per feature the
//! model was fit on. Slot `i` is 1 when `SYMPTOMS[i]` was reported.

use tracing::warn;

use crate::catalog::{self, SYMPTOMS};
use crate::errors::{PredictorError, Result};

/// Result of encoding a symptom list
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub features: Vec<f32>,
    /// Names that are not in the catalog, in request order
    pub unknown: Vec<String>,
}

impl Encoded {
    /// Number of features set to 1
    pub fn active_count(&self) -> usize {
        self.features.iter().filter(|v| **v != 0.0).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    feature_count: usize,
}

impl FeatureEncoder {
    pub fn new(feature_count: usize) -> Result<Self> {
        if feature_count < SYMPTOMS.len() {
            return Err(PredictorError::encoding(format!(
                "feature count {} is smaller than the symptom catalog ({})",
                feature_count,
                SYMPTOMS.len()
            )));
        }
        Ok(Self { feature_count })
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> Encoded {
        let mut features = vec![0.0_f32; self.feature_count];
        let mut unknown = Vec::new();

        for symptom in symptoms {
            let name = symptom.as_ref();
            match catalog::symptom_index(name) {
                Some(idx) => features[idx] = 1.0,
                None => {
                    warn!("Unknown symptom '{}'", name);
                    unknown.push(name.to_string());
                }
            }
        }

        Encoded { features, unknown }
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self {
            feature_count: catalog::FEATURE_COUNT,
        }
    }
}
