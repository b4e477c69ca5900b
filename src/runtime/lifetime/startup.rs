use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::services::ModelInfo;
use crate::config::get_config;
use crate::errors::PredictorError;
use crate::model::ExtraTreesClassifier;
use crate::services::PredictionService;

pub struct StartupContext {
    pub prediction_service: Arc<PredictionService>,
    pub model_info: ModelInfo,
}

/// Try each candidate path in order and return the first model that loads.
///
/// Paths that exist but fail to load are logged and skipped.
pub fn locate_model<P: AsRef<str>>(
    candidates: &[P],
) -> crate::errors::Result<(String, ExtraTreesClassifier)> {
    debug!("Searching for model...");
    for candidate in candidates {
        let path = candidate.as_ref();
        if !Path::new(path).exists() {
            debug!("No model at {}", path);
            continue;
        }

        info!("Found model at {}", path);
        match ExtraTreesClassifier::load(path) {
            Ok(model) => {
                info!("Model loaded successfully!");
                return Ok((path.to_string(), model));
            }
            Err(e) => warn!("Error loading model from {}: {}", path, e),
        }
    }

    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    let tried: Vec<&str> = candidates.iter().map(|p| p.as_ref()).collect();
    Err(PredictorError::model_not_found(format!(
        "could not find or load a model in any of {:?} (current directory: {})",
        tried, cwd
    )))
}

/// 准备服务器启动的上下文：加载模型并构建预测服务
pub fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    let config = get_config();

    let (path, model) = locate_model(config.model.candidate_paths().as_slice())
        .context("Failed to load the prediction model")?;
    let summary = model.summary();

    let prediction_service = PredictionService::new(Arc::new(model))
        .context("Model is incompatible with the disease catalog")?
        .with_top_k(config.model.top_k);

    info!(
        "Model ready: {} trees, {} features, {} classes (top_k = {})",
        summary.n_estimators,
        summary.n_features,
        summary.n_classes,
        prediction_service.top_k()
    );
    debug!("Startup preparation finished in {:?}", start_time.elapsed());

    Ok(StartupContext {
        prediction_service: Arc::new(prediction_service),
        model_info: ModelInfo { path, summary },
    })
}
