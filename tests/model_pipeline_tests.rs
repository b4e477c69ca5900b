//! End-to-end model tests
//!
//! Train a small synthetic forest, write it, load it back through the startup
//! search logic and predict with it.

use std::sync::Arc;

use disease_predictor::catalog::{DISEASES, FEATURE_COUNT};
use disease_predictor::features::FeatureEncoder;
use disease_predictor::model::{ExtraTreesClassifier, FitParams, ProbabilityModel};
use disease_predictor::runtime::lifetime::startup::locate_model;
use disease_predictor::services::PredictionService;
use disease_predictor::training::{TrainingParams, train_and_save};
use tempfile::TempDir;

fn small_params(seed: u64) -> TrainingParams {
    TrainingParams {
        n_samples: 200,
        fit: FitParams {
            n_estimators: 8,
            random_state: seed,
            ..FitParams::default()
        },
        ..TrainingParams::default()
    }
}

fn trained_model(dir: &TempDir) -> String {
    let path = dir.path().join("ExtraTrees.json");
    train_and_save(&small_params(42), &path).expect("training should succeed");
    path.to_string_lossy().to_string()
}

#[test]
fn test_trained_model_probabilities_sum_to_one() {
    let dir = TempDir::new().unwrap();
    let path = trained_model(&dir);
    let model = ExtraTreesClassifier::load(&path).unwrap();

    let encoded = FeatureEncoder::default().encode(&["itching", "skin_rash"]);
    let proba = model.predict_proba(&encoded.features).unwrap();

    assert_eq!(proba.len(), DISEASES.len());
    assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    let sum: f64 = proba.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
}

#[test]
fn test_prediction_is_deterministic_for_fixed_model() {
    let dir = TempDir::new().unwrap();
    let path = trained_model(&dir);

    let (_, model) = locate_model(&[path.as_str()]).unwrap();
    let service = PredictionService::new(Arc::new(model)).unwrap();

    let first = service.predict(&["itching", "skin_rash"]).unwrap();
    let second = service.predict(&["skin_rash", "itching", "itching"]).unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn test_same_seed_trains_identical_models() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    train_and_save(&small_params(7), &a).unwrap();
    train_and_save(&small_params(7), &b).unwrap();

    assert_eq!(
        ExtraTreesClassifier::load(&a).unwrap(),
        ExtraTreesClassifier::load(&b).unwrap()
    );
}

#[test]
fn test_locate_model_falls_back_to_later_candidates() {
    let dir = TempDir::new().unwrap();
    let path = trained_model(&dir);
    let missing = dir.path().join("missing.json").to_string_lossy().to_string();

    let (found, model) = locate_model(&[missing.as_str(), path.as_str()]).unwrap();
    assert_eq!(found, path);
    assert_eq!(model.n_features, FEATURE_COUNT);
}

#[test]
fn test_model_with_wrong_width_is_rejected_at_inference() {
    let dir = TempDir::new().unwrap();
    let path = trained_model(&dir);
    let model = ExtraTreesClassifier::load(&path).unwrap();

    let err = model.predict_proba(&vec![0.0; FEATURE_COUNT - 1]).unwrap_err();
    assert_eq!(err.code(), "E003");
}
