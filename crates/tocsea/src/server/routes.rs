use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tocsea_core::recommend::{validate_request, HealthResponse, RecommendationResponse};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::error::Error;
use crate::recommend::RecommendationService;

/// Build the API router. When `static_dir` is set, every other path is
/// served from it, with `index.html` at `/`.
pub fn router(service: Arc<RecommendationService>, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/recommendations", post(recommendations_handler))
        .route("/api/health", get(health_handler))
        .with_state(service);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
}

async fn recommendations_handler(
    State(service): State<Arc<RecommendationService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, Error> {
    let Json(body) = payload.map_err(|e| Error::InvalidBody(e.body_text()))?;
    let assessment = validate_request(&body)?;
    let response = service.recommend(&assessment).await?;
    Ok(Json(response))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown internal error".to_string()
    };

    Error::Internal(message).into_response()
}
