use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ProbabilityModel, tree::Tree};
use crate::errors::{PredictorError, Result};

/// Forest of extremely randomized trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraTreesClassifier {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<Tree>,
}

/// Short description of a loaded model, used by health checks and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub n_features: usize,
    pub n_classes: usize,
    pub n_estimators: usize,
    pub max_depth: usize,
}

impl ExtraTreesClassifier {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(PredictorError::model_format("forest has no trees"));
        }
        if self.n_classes == 0 {
            return Err(PredictorError::model_format("forest has no classes"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|e| PredictorError::model_format(format!("tree {}: {}", idx, e.message())))?;
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictorError::file_operation(format!("failed to read {}: {}", path.display(), e))
        })?;
        let model: Self = serde_json::from_str(&content).map_err(|e| {
            PredictorError::model_format(format!("failed to parse {}: {}", path.display(), e))
        })?;
        model.validate()?;

        debug!(
            "Loaded model from {}: {} trees, {} features, {} classes",
            path.display(),
            model.trees.len(),
            model.n_features,
            model.n_classes
        );
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)?;
        info!("Model saved to {}", path.display());
        Ok(())
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            n_features: self.n_features,
            n_classes: self.n_classes,
            n_estimators: self.trees.len(),
            max_depth: self.trees.iter().map(Tree::depth).max().unwrap_or(0),
        }
    }
}

impl ProbabilityModel for ExtraTreesClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(PredictorError::inference(format!(
                "X has {} features, but the model is expecting {} features as input",
                features.len(),
                self.n_features
            )));
        }
        if self.trees.is_empty() {
            return Err(PredictorError::inference("model has no trees"));
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let tree_proba = tree.predict_proba(features, self.n_classes)?;
            for (acc, p) in proba.iter_mut().zip(tree_proba) {
                *acc += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Leaf, Node, Split};

    fn leaf(distribution: Vec<f64>) -> Node {
        Node::Leaf(Leaf { distribution })
    }

    fn forest() -> ExtraTreesClassifier {
        ExtraTreesClassifier {
            n_features: 2,
            n_classes: 3,
            trees: vec![
                Tree {
                    nodes: vec![
                        Node::Split(Split {
                            feature: 0,
                            threshold: 0.5,
                            left: 1,
                            right: 2,
                        }),
                        leaf(vec![1.0, 0.0, 0.0]),
                        leaf(vec![0.0, 1.0, 0.0]),
                    ],
                },
                Tree {
                    nodes: vec![leaf(vec![0.0, 1.0, 3.0])],
                },
            ],
        }
    }

    #[test]
    fn test_predict_proba_averages_trees() {
        let model = forest();
        let proba = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert_eq!(proba, vec![0.0, 0.625, 0.375]);
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_count_mismatch_is_error() {
        let err = forest().predict_proba(&[1.0]).unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("expecting 2 features"));
    }

    #[test]
    fn test_empty_forest_fails_validation() {
        let mut model = forest();
        model.trees.clear();
        assert!(model.validate().is_err());
        assert!(model.predict_proba(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        let model = forest();
        model.save(&path).unwrap();
        assert_eq!(ExtraTreesClassifier::load(&path).unwrap(), model);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        let err = ExtraTreesClassifier::load(&path).unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_summary() {
        let summary = forest().summary();
        assert_eq!(summary.n_estimators, 2);
        assert_eq!(summary.max_depth, 1);
    }
}
