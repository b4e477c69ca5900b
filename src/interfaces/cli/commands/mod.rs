mod check;
mod config_gen;
mod predict;
mod train;

pub use check::run_check;
pub use config_gen::config_generate;
pub use predict::run_predict;
pub use train::run_train;

use std::sync::Arc;

use crate::config::get_config;
use crate::runtime::lifetime::startup::locate_model;
use crate::services::PredictionService;

use super::CliError;

/// Load a model (explicit path or configured search paths) and wrap it in a
/// prediction service
fn load_prediction_service(model: Option<String>) -> Result<PredictionService, CliError> {
    let config = get_config();
    let candidates = match model {
        Some(path) => vec![path],
        None => config.model.candidate_paths(),
    };

    let (_, model) = locate_model(candidates.as_slice())?;
    Ok(PredictionService::new(Arc::new(model))?.with_top_k(config.model.top_k))
}
