pub mod health;
pub mod predict;

pub use health::{AppStartTime, HealthService, ModelInfo, health_routes};
pub use predict::{ErrorResponse, PredictService, predict_routes};

/// Plain text returned by `GET /`
pub const HOME_BANNER: &str =
    "Disease prediction service. Use /predict endpoint to make predictions.";
