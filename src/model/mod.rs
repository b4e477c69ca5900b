//! Ensemble classifier
//!
//! An extremely randomized trees forest persisted as JSON. The service talks to
//! it through [`ProbabilityModel`] so the HTTP layer never depends on the
//! concrete forest.

mod fit;
mod forest;
mod tree;

pub use fit::FitParams;
pub use forest::{ExtraTreesClassifier, ModelSummary};
pub use tree::{Leaf, Node, Split, Tree};

use crate::errors::Result;

/// Anything that can turn a feature vector into per-class probabilities
pub trait ProbabilityModel: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// One probability per class, summing to 1
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f64>>;
}
