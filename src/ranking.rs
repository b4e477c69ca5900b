//! Top-k selection over class probabilities

use serde::{Deserialize, Serialize};

use crate::errors::{PredictorError, Result};

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseScore {
    pub disease: String,
    pub probability: f64,
}

/// Class indices ordered by probability, highest first.
///
/// Equal probabilities rank the higher class index first. NaN is ordered with
/// `f64::total_cmp`, so it never panics.
pub fn rank_indices(probabilities: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| {
        probabilities[b]
            .total_cmp(&probabilities[a])
            .then_with(|| b.cmp(&a))
    });
    order
}

/// Pick the `k` most probable classes and attach their labels
pub fn top_k<L: AsRef<str>>(
    probabilities: &[f64],
    labels: &[L],
    k: usize,
) -> Result<Vec<DiseaseScore>> {
    rank_indices(probabilities)
        .into_iter()
        .take(k)
        .map(|idx| {
            let label = labels.get(idx).ok_or_else(|| {
                PredictorError::ranking(format!(
                    "no label for class {} ({} labels known)",
                    idx,
                    labels.len()
                ))
            })?;
            Ok(DiseaseScore {
                disease: label.as_ref().to_string(),
                probability: probabilities[idx],
            })
        })
        .collect()
}
