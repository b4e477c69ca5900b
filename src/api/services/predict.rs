use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::services::PredictionService;

/// Body returned with HTTP 500
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct PredictService;

impl PredictService {
    /// Banner for the root path
    pub async fn home() -> impl Responder {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(super::HOME_BANNER)
    }

    /// `POST /predict`
    ///
    /// The body is read as raw bytes and parsed as a JSON array whatever the
    /// Content-Type says. Items that are not strings can never name a symptom,
    /// so they are treated like unknown symptoms.
    pub async fn predict(
        body: web::Bytes,
        service: web::Data<Arc<PredictionService>>,
    ) -> impl Responder {
        let items: Vec<Value> = match serde_json::from_slice(&body) {
            Ok(items) => items,
            Err(e) => {
                error!("Error in predict route: invalid request body: {}", e);
                return Self::error_response(format!("invalid request body: {}", e));
            }
        };
        debug!("Received data: {:?}", items);

        let symptoms: Vec<String> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                other => {
                    warn!("Unknown symptom '{}'", other);
                    None
                }
            })
            .collect();

        match service.predict(symptoms.as_slice()) {
            Ok(ranked) => {
                debug!("Response: {:?}", ranked);
                HttpResponse::Ok().json(ranked)
            }
            Err(e) => {
                error!("Error in predict route: {}", e);
                Self::error_response(e.message().to_string())
            }
        }
    }

    fn error_response(message: String) -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(ErrorResponse {
            error: format!(
                "An error occurred while predicting the disease: {}",
                message
            ),
        })
    }
}

/// Prediction 路由配置
pub fn predict_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(PredictService::home))
        .route("/predict", web::post().to(PredictService::predict))
}
