use serde::{Deserialize, Serialize};

use crate::errors::{PredictorError, Result};

/// Internal node: samples with `x[feature] <= threshold` go left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    pub threshold: f32,
    pub left: usize,
    pub right: usize,
}

/// Terminal node holding per-class sample counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub distribution: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Split(Split),
    Leaf(Leaf),
}

/// A single decision tree stored as a flat node array; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Follow splits from the root to the leaf for `features`
    pub fn leaf_for(&self, features: &[f32]) -> Result<&Leaf> {
        let mut idx = 0;
        // 有效的树最多走 nodes.len() 步，超过说明存在环
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf(leaf)) => return Ok(leaf),
                Some(Node::Split(split)) => {
                    let value = features.get(split.feature).ok_or_else(|| {
                        PredictorError::inference(format!(
                            "split on feature {} but only {} features given",
                            split.feature,
                            features.len()
                        ))
                    })?;
                    idx = if *value <= split.threshold {
                        split.left
                    } else {
                        split.right
                    };
                }
                None => {
                    return Err(PredictorError::inference(format!(
                        "dangling node index {}",
                        idx
                    )));
                }
            }
        }
        Err(PredictorError::inference("cycle detected while walking tree"))
    }

    /// Normalised class distribution of the leaf reached by `features`
    pub fn predict_proba(&self, features: &[f32], n_classes: usize) -> Result<Vec<f64>> {
        let leaf = self.leaf_for(features)?;
        if leaf.distribution.len() != n_classes {
            return Err(PredictorError::inference(format!(
                "leaf has {} classes, forest expects {}",
                leaf.distribution.len(),
                n_classes
            )));
        }

        let total: f64 = leaf.distribution.iter().sum();
        if total <= 0.0 {
            return Err(PredictorError::inference("empty leaf distribution"));
        }
        Ok(leaf.distribution.iter().map(|c| c / total).collect())
    }

    /// Structural check used when loading a model file
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(PredictorError::model_format("tree has no nodes"));
        }
        let mut seen = vec![false; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split(split) => {
                    if split.feature >= n_features {
                        return Err(PredictorError::model_format(format!(
                            "node {} splits on feature {} (n_features = {})",
                            idx, split.feature, n_features
                        )));
                    }
                    // 子节点总是排在父节点之后
                    for child in [split.left, split.right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(PredictorError::model_format(format!(
                                "node {} has invalid child {}",
                                idx, child
                            )));
                        }
                        // 每个节点只能有一个父节点
                        if std::mem::replace(&mut seen[child], true) {
                            return Err(PredictorError::model_format(format!(
                                "node {} is shared by more than one parent",
                                child
                            )));
                        }
                    }
                }
                Node::Leaf(leaf) => {
                    if leaf.distribution.len() != n_classes {
                        return Err(PredictorError::model_format(format!(
                            "leaf {} has {} classes (n_classes = {})",
                            idx,
                            leaf.distribution.len(),
                            n_classes
                        )));
                    }
                    if leaf.distribution.iter().any(|c| !c.is_finite() || *c < 0.0) {
                        return Err(PredictorError::model_format(format!(
                            "leaf {} has a negative or non-finite count",
                            idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Longest root-to-leaf path, counted in splits
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        let mut visited = 0;

        while let Some((idx, depth)) = stack.pop() {
            // 结构异常的树也不会无限展开
            visited += 1;
            if visited > self.nodes.len() {
                break;
            }
            match self.nodes.get(idx) {
                Some(Node::Split(s)) if s.left > idx && s.right > idx => {
                    stack.push((s.left, depth + 1));
                    stack.push((s.right, depth + 1));
                }
                _ => max_depth = max_depth.max(depth),
            }
        }
        max_depth
    }
}
