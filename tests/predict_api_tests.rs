//! Prediction API tests
//!
//! POST /predict with a JSON symptom list -> top-5 `{disease, probability}`.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use disease_predictor::api::HEALTH_PREFIX;
use disease_predictor::api::middleware::RequestIdMiddleware;
use disease_predictor::api::services::{
    AppStartTime, ErrorResponse, HOME_BANNER, ModelInfo, health_routes, predict_routes,
};
use disease_predictor::catalog::{DISEASES, FEATURE_COUNT, symptom_index};
use disease_predictor::errors::{PredictorError, Result};
use disease_predictor::model::{ModelSummary, ProbabilityModel};
use disease_predictor::ranking::DiseaseScore;
use disease_predictor::services::PredictionService;

// =============================================================================
// Test Setup
// =============================================================================

/// Scores each class by how many of its "own" symptoms are present:
/// class `c` owns symptom index `c`, so reporting symptom `c` boosts class `c`.
struct OwnedSymptomModel;

impl ProbabilityModel for OwnedSymptomModel {
    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn n_classes(&self) -> usize {
        DISEASES.len()
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f64>> {
        let mut scores: Vec<f64> = (0..DISEASES.len())
            .map(|c| 1.0 + 10.0 * features[c] as f64)
            .collect();
        let total: f64 = scores.iter().sum();
        scores.iter_mut().for_each(|s| *s /= total);
        Ok(scores)
    }
}

/// Always fails, to exercise the 500 path
struct BrokenModel;

impl ProbabilityModel for BrokenModel {
    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn n_classes(&self) -> usize {
        DISEASES.len()
    }

    fn predict_proba(&self, _features: &[f32]) -> Result<Vec<f64>> {
        Err(PredictorError::inference("model exploded"))
    }
}

fn model_info() -> ModelInfo {
    ModelInfo {
        path: "memory".to_string(),
        summary: ModelSummary {
            n_features: FEATURE_COUNT,
            n_classes: DISEASES.len(),
            n_estimators: 1,
            max_depth: 0,
        },
    }
}

macro_rules! init_app {
    ($model:expr) => {
        init_app!($model, 64 * 1024)
    };
    ($model:expr, $payload_limit:expr) => {{
        let service = Arc::new(PredictionService::new(Arc::new($model)).unwrap());
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::PayloadConfig::new($payload_limit))
                .app_data(web::Data::new(service))
                .app_data(web::Data::new(model_info()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(web::scope(HEALTH_PREFIX).service(health_routes()))
                .service(predict_routes()),
        )
        .await
    }};
}

// =============================================================================
// Tests
// =============================================================================

#[actix_rt::test]
async fn test_home_banner() {
    let app = init_app!(OwnedSymptomModel);
    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, HOME_BANNER.as_bytes());
}

#[actix_rt::test]
async fn test_predict_returns_five_ranked_candidates() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(vec!["skin_rash", "nodal_skin_eruptions"])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ranked: Vec<DiseaseScore> = test::read_body_json(resp).await;
    assert_eq!(ranked.len(), 5);

    // 两个类别得分相同，下标大的排在前面
    assert_eq!(ranked[0].disease, DISEASES[2]);
    assert_eq!(ranked[1].disease, DISEASES[1]);
    assert!(ranked[0].probability > ranked[2].probability);
    assert!(ranked.windows(2).all(|w| w[0].probability >= w[1].probability));
}

#[actix_rt::test]
async fn test_predict_ignores_unknown_symptoms() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(vec!["itching", "definitely_not_a_symptom"])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ranked: Vec<DiseaseScore> = test::read_body_json(resp).await;
    assert_eq!(symptom_index("itching"), Some(0));
    assert_eq!(ranked[0].disease, DISEASES[0]);
}

#[actix_rt::test]
async fn test_predict_parses_body_without_json_content_type() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .insert_header(("Content-Type", "text/plain"))
        .set_payload(r#"["itching"]"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_predict_empty_list_still_ranks() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(Vec::<String>::new())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ranked: Vec<DiseaseScore> = test::read_body_json(resp).await;
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].disease, DISEASES[DISEASES.len() - 1]);
}

#[actix_rt::test]
async fn test_malformed_body_is_500_with_error_message() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(
        body.error
            .starts_with("An error occurred while predicting the disease:")
    );
}

#[actix_rt::test]
async fn test_inference_failure_is_500() {
    let app = init_app!(BrokenModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(vec!["itching"])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body.error,
        "An error occurred while predicting the disease: model exploded"
    );
}

#[actix_rt::test]
async fn test_predict_skips_non_string_items() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_payload(r#"[1, "itching", null, {"name": "skin_rash"}]"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ranked: Vec<DiseaseScore> = test::read_body_json(resp).await;
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].disease, DISEASES[0]);
    // skin_rash 在对象里，不算上报
    assert!(ranked[0].probability > ranked[1].probability);
}

#[actix_rt::test]
async fn test_non_array_body_is_500() {
    let app = init_app!(OwnedSymptomModel);
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(serde_json::json!({"symptoms": ["itching"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn test_oversized_body_is_rejected() {
    let app = init_app!(OwnedSymptomModel, 32);
    let symptoms: Vec<&str> = std::iter::repeat_n("itching", 20).collect();
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(symptoms)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // 限制以内照常处理
    let req = TestRequest::post()
        .uri("/predict")
        .set_json(vec!["itching"])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_get_predict_is_not_routed() {
    let app = init_app!(OwnedSymptomModel);
    let resp = test::call_service(&app, TestRequest::get().uri("/predict").to_request()).await;
    assert!(resp.status().is_client_error());
}

#[actix_rt::test]
async fn test_request_id_header_is_set_or_echoed() {
    let app = init_app!(OwnedSymptomModel);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert!(resp.headers().contains_key("x-request-id"));

    let req = TestRequest::get()
        .uri("/")
        .insert_header(("X-Request-ID", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let app = init_app!(OwnedSymptomModel);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"]["n_classes"], DISEASES.len());
    assert_eq!(body["model"]["path"], "memory");

    let resp =
        test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
