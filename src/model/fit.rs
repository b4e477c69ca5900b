//! Extremely randomized trees training
//!
//! Every tree sees the whole training set. At each node a random subset of
//! features is tried, each with a single threshold drawn uniformly between the
//! feature's minimum and maximum in that node, and the split with the lowest
//! weighted Gini impurity wins.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::forest::ExtraTreesClassifier;
use super::tree::{Leaf, Node, Split, Tree};
use crate::errors::{PredictorError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    pub n_estimators: usize,
    /// Candidate features per node; `None` means `floor(sqrt(n_features))`, at least 1
    pub max_features: Option<usize>,
    pub min_samples_split: usize,
    pub random_state: u64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_features: None,
            min_samples_split: 2,
            random_state: 42,
        }
    }
}

impl FitParams {
    fn resolved_max_features(&self, n_features: usize) -> usize {
        self.max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().floor() as usize)
            .clamp(1, n_features.max(1))
    }
}

/// Node-local view of the training data shared by the recursive builder
struct Builder<'a> {
    x: &'a [Vec<f32>],
    y: &'a [usize],
    n_classes: usize,
    max_features: usize,
    min_samples_split: usize,
}

impl ExtraTreesClassifier {
    pub fn fit(
        x: &[Vec<f32>],
        y: &[usize],
        n_classes: usize,
        params: &FitParams,
    ) -> Result<Self> {
        if x.is_empty() {
            return Err(PredictorError::training("no training samples"));
        }
        if x.len() != y.len() {
            return Err(PredictorError::training(format!(
                "{} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        if params.n_estimators == 0 {
            return Err(PredictorError::training("n_estimators must be at least 1"));
        }

        let n_features = x[0].len();
        if let Some(row) = x.iter().position(|row| row.len() != n_features) {
            return Err(PredictorError::training(format!(
                "sample {} has {} features, expected {}",
                row,
                x[row].len(),
                n_features
            )));
        }
        if let Some(label) = y.iter().find(|label| **label >= n_classes) {
            return Err(PredictorError::training(format!(
                "label {} out of range for {} classes",
                label, n_classes
            )));
        }

        let builder = Builder {
            x,
            y,
            n_classes,
            max_features: params.resolved_max_features(n_features),
            min_samples_split: params.min_samples_split.max(2),
        };

        let mut master = StdRng::seed_from_u64(params.random_state);
        let trees = (0..params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.random());
                builder.build_tree(&mut rng)
            })
            .collect::<Vec<_>>();

        debug!(
            "Fitted {} trees on {} samples ({} features, {} candidates per split)",
            trees.len(),
            x.len(),
            n_features,
            builder.max_features
        );

        Ok(Self {
            n_features,
            n_classes,
            trees,
        })
    }
}

impl Builder<'_> {
    fn build_tree<R: Rng>(&self, rng: &mut R) -> Tree {
        let mut nodes = Vec::new();
        let samples: Vec<usize> = (0..self.x.len()).collect();
        self.build_node(&mut nodes, samples, rng);
        Tree { nodes }
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<f64> {
        let mut counts = vec![0.0; self.n_classes];
        for &s in samples {
            counts[self.y[s]] += 1.0;
        }
        counts
    }

    /// Appends the subtree for `samples` and returns its root index
    fn build_node<R: Rng>(&self, nodes: &mut Vec<Node>, samples: Vec<usize>, rng: &mut R) -> usize {
        let counts = self.class_counts(&samples);
        let idx = nodes.len();
        nodes.push(Node::Leaf(Leaf {
            distribution: counts.clone(),
        }));

        let is_pure = counts.iter().filter(|c| **c > 0.0).count() <= 1;
        if samples.len() < self.min_samples_split || is_pure {
            return idx;
        }

        let Some((feature, threshold)) = self.pick_split(&samples, rng) else {
            return idx;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| self.x[s][feature] <= threshold);

        let left = self.build_node(nodes, left, rng);
        let right = self.build_node(nodes, right, rng);
        nodes[idx] = Node::Split(Split {
            feature,
            threshold,
            left,
            right,
        });
        idx
    }

    /// Draws random (feature, threshold) candidates and keeps the purest one.
    /// Constant features are skipped and do not count towards `max_features`.
    fn pick_split<R: Rng>(&self, samples: &[usize], rng: &mut R) -> Option<(usize, f32)> {
        let n_features = self.x[0].len();
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(rng);

        let mut best: Option<(usize, f32, f64)> = None;
        let mut tried = 0;

        for feature in order {
            if tried >= self.max_features {
                break;
            }

            let (min, max) = samples.iter().fold((f32::MAX, f32::MIN), |(lo, hi), &s| {
                let v = self.x[s][feature];
                (lo.min(v), hi.max(v))
            });
            if max <= min {
                continue;
            }
            tried += 1;

            let threshold = rng.random_range(min..max);
            let score = self.weighted_gini(samples, feature, threshold);
            if best.is_none_or(|(_, _, s)| score < s) {
                best = Some((feature, threshold, score));
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }

    fn weighted_gini(&self, samples: &[usize], feature: usize, threshold: f32) -> f64 {
        let mut left = vec![0.0; self.n_classes];
        let mut right = vec![0.0; self.n_classes];
        for &s in samples {
            if self.x[s][feature] <= threshold {
                left[self.y[s]] += 1.0;
            } else {
                right[self.y[s]] += 1.0;
            }
        }
        weighted_impurity(&left) + weighted_impurity(&right)
    }
}

/// `n * gini(counts)`, so two children can be summed directly
fn weighted_impurity(counts: &[f64]) -> f64 {
    let n: f64 = counts.iter().sum();
    if n == 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = counts.iter().map(|c| (c / n) * (c / n)).sum();
    n * (1.0 - sum_sq)
}
