//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cekgula_core::Symptom;
use cekgula_repository::{DiagnosisRecord, Recommendation, Stats, User};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Health check: a round-trip to the store
pub(super) async fn health(State(state): State<AppState>) -> Response {
    match state.service.store().ping().await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "DB ERROR").into_response()
        }
    }
}

pub(super) async fn test_db(
    State(state): State<AppState>,
) -> Result<Json<DbStatusResponse>, ServerError> {
    let result = state.service.store().select_two().await?;
    Ok(Json(DbStatusResponse {
        db: "connected",
        result,
    }))
}

pub(super) async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ServerError> {
    Ok(Json(state.service.store().list_users().await?))
}

pub(super) async fn create_user(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CreateUserPayload>,
) -> Result<Json<CreatedResponse>, ServerError> {
    let user = payload.into_new_user()?;
    let id = state.service.store().create_user(user).await?;

    info!("Created user {}", id);
    Ok(Json(CreatedResponse { success: true, id }))
}

pub(super) async fn list_symptoms(
    State(state): State<AppState>,
) -> Result<Json<Vec<Symptom>>, ServerError> {
    Ok(Json(state.service.store().list_symptoms().await?))
}

pub(super) async fn record_symptoms(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    JsonExtractor(payload): JsonExtractor<RecordSymptomsPayload>,
) -> Result<Json<RecordSymptomsResponse>, ServerError> {
    if payload.kode_gejala.is_empty() {
        return Err(ServerError::InvalidRequest("kode_gejala wajib".to_string()));
    }

    let recorded = state
        .service
        .store()
        .record_symptoms(user_id, &payload.kode_gejala)
        .await?;

    info!("Recorded {} symptoms for user {}", recorded, user_id);
    Ok(Json(RecordSymptomsResponse {
        success: true,
        user_id,
        recorded,
    }))
}

/// Forward-chaining diagnosis of a stored subject
#[axum::debug_handler]
pub(super) async fn process_diagnosis(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ProcessPayload>,
) -> Result<Json<DiagnosisResponse>, ServerError> {
    let user_id = payload.user_id()?;
    let request_id = Uuid::new_v4();

    info!(%request_id, "Processing diagnosis for user {}", user_id);
    let outcome = state
        .service
        .process(user_id)
        .instrument(info_span!("diagnosis", %request_id, user_id))
        .await?;

    Ok(Json(DiagnosisResponse {
        success: true,
        metode: METHOD,
        diagnosis_id: outcome.diagnosis_id,
        classification: outcome.classification,
    }))
}

/// Classify an inline fact list; nothing is persisted
pub(super) async fn classify(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ClassifyPayload>,
) -> Result<Json<ClassifyResponse>, ServerError> {
    info!("Classifying {} inline facts", payload.fakta.len());
    let classification = state.service.classify_facts(payload.fakta)?;

    Ok(Json(ClassifyResponse {
        success: true,
        metode: METHOD,
        classification,
    }))
}

pub(super) async fn list_diagnoses(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiagnosisRecord>>, ServerError> {
    Ok(Json(state.service.store().list_diagnoses().await?))
}

pub(super) async fn list_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recommendation>>, ServerError> {
    Ok(Json(state.service.store().list_recommendations().await?))
}

pub(super) async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, ServerError> {
    Ok(Json(state.service.store().stats().await?))
}
