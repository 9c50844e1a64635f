//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use crate::service::DiagnosisService;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(service: DiagnosisService) -> Router {
    routes(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Create REST API router that serves the frontend from `static_dir` for
/// every path the API does not handle
pub fn create_router_with_static(service: DiagnosisService, static_dir: impl AsRef<Path>) -> Router {
    routes(service)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn routes(service: DiagnosisService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/test-db", get(test_db))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id/symptoms", post(record_symptoms))
        .route("/symptoms", get(list_symptoms))
        .route("/diagnosis/process", post(process_diagnosis))
        .route("/diagnosis/classify", post(classify))
        .route("/diagnoses", get(list_diagnoses))
        .route("/recommendations", get(list_recommendations))
        .route("/stats", get(stats))
        .with_state(state)
}
