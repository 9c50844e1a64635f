//! Integration tests for REST API endpoints
//!
//! Routers are built over a seeded in-memory store and driven with
//! `oneshot` requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cekgula_core::{Evaluator, ScoringPolicy};
use cekgula_repository::{DiagnosisStore, MemoryStore, NewUser};
use cekgula_server::api::{create_router, create_router_with_static};
use cekgula_server::DiagnosisService;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_service() -> (Arc<MemoryStore>, DiagnosisService) {
    let store = Arc::new(MemoryStore::seeded());
    let service = DiagnosisService::new(store.clone(), Evaluator::canonical());
    (store, service)
}

fn create_test_router() -> (Arc<MemoryStore>, Router) {
    let (store, service) = create_test_service();
    (store, create_router(service))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Create a user with the given observations, returning the user id
async fn user_with_symptoms(store: &MemoryStore, codes: &[&str]) -> i64 {
    let user_id = store
        .create_user(NewUser::new("Pasien Uji", 48, "L"))
        .await
        .unwrap();
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    if !codes.is_empty() {
        store.record_symptoms(user_id, &codes).await.unwrap();
    }
    user_id
}

#[tokio::test]
async fn test_health_returns_ok_text() {
    let (_, app) = create_test_router();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_db_endpoint() {
    let (_, app) = create_test_router();

    let (status, body) = get_json(&app, "/test-db").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "db": "connected", "result": 2 }));
}

#[tokio::test]
async fn test_process_scenarios() {
    let (store, app) = create_test_router();

    let cases: &[(&[&str], &str, f64)] = &[
        (&["G01", "G02", "G06"], "Tinggi", 13.0),
        (&["G01", "G06"], "Tinggi", 10.0),
        (&["G02", "G03"], "Sedang", 5.0),
        (&["G02", "G06"], "Sedang", 9.0),
        (&["G04", "G05"], "Rendah", 3.0),
        (&["G01"], "Rendah", 4.0),
    ];

    for (codes, level, score) in cases {
        let user_id = user_with_symptoms(&store, codes).await;

        let (status, body) =
            post_json(&app, "/diagnosis/process", json!({ "user_id": user_id })).await;

        assert_eq!(status, StatusCode::OK, "codes {:?}", codes);
        assert_eq!(body["success"], true);
        assert_eq!(body["metode"], "Forward Chaining");
        assert_eq!(body["tingkat_risiko"], *level, "codes {:?}", codes);
        assert_eq!(body["skor_akhir"].as_f64(), Some(*score), "codes {:?}", codes);
        assert_eq!(body["fakta"].as_array().unwrap().len(), codes.len());
    }

    let (_, history) = get_json(&app, "/diagnoses").await;
    assert_eq!(history.as_array().unwrap().len(), cases.len());
}

#[tokio::test]
async fn test_process_requires_user_id() {
    let (_, app) = create_test_router();

    let (status, body) = post_json(&app, "/diagnosis/process", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user_id wajib");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_process_accepts_string_user_id() {
    let (store, app) = create_test_router();
    let user_id = user_with_symptoms(&store, &["G01", "G06"]).await;

    let (status, body) = post_json(
        &app,
        "/diagnosis/process",
        json!({ "user_id": user_id.to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tingkat_risiko"], "Tinggi");

    let (status, body) =
        post_json(&app, "/diagnosis/process", json!({ "user_id": "satu" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user_id wajib");
}

#[tokio::test]
async fn test_process_without_symptoms_is_not_found() {
    let (store, app) = create_test_router();
    let user_id = user_with_symptoms(&store, &[]).await;

    let (status, body) =
        post_json(&app, "/diagnosis/process", json!({ "user_id": user_id })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Gejala tidak ditemukan");
    assert!(store.list_diagnoses().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_process_uses_configured_scoring() {
    let store = Arc::new(MemoryStore::seeded());
    let service = DiagnosisService::new(
        store.clone(),
        Evaluator::canonical().with_policy(ScoringPolicy::SumAll),
    );
    let app = create_router(service);
    let user_id = user_with_symptoms(&store, &["G06", "G06"]).await;

    let (status, body) =
        post_json(&app, "/diagnosis/process", json!({ "user_id": user_id })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skor_akhir"].as_f64(), Some(12.0));
    assert_eq!(body["fakta"], json!(["G06"]));
}

#[tokio::test]
async fn test_classify_inline_facts() {
    let (store, app) = create_test_router();

    let (status, body) = post_json(
        &app,
        "/diagnosis/classify",
        json!({
            "fakta": [
                { "kode_gejala": "G01", "bobot": "4.00" },
                { "kode_gejala": "G06", "bobot": 6 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tingkat_risiko"], "Tinggi");
    assert_eq!(body["skor_akhir"].as_f64(), Some(10.0));
    assert_eq!(body["fakta"], json!(["G01", "G06"]));
    assert!(body.get("diagnosis_id").is_none());
    assert!(store.list_diagnoses().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_classify_empty_facts_is_default() {
    let (_, app) = create_test_router();

    let (status, body) = post_json(&app, "/diagnosis/classify", json!({ "fakta": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tingkat_risiko"], "Rendah");
    assert_eq!(body["skor_akhir"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_classify_invalid_weight_is_unprocessable() {
    let (_, app) = create_test_router();

    let (status, body) = post_json(
        &app,
        "/diagnosis/classify",
        json!({ "fakta": [{ "kode_gejala": "G01", "bobot": "empat" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
}

#[tokio::test]
async fn test_classify_non_scalar_values_are_unprocessable() {
    let (_, app) = create_test_router();

    let bodies = [
        json!({ "fakta": [{ "kode_gejala": "G01", "bobot": true }] }),
        json!({ "fakta": [{ "kode_gejala": "G01", "bobot": [4] }] }),
        json!({ "fakta": [{ "kode_gejala": "G01", "bobot": { "nilai": 4 } }] }),
        json!({ "fakta": [{ "kode_gejala": 1, "bobot": 4 }] }),
    ];

    for body in bodies {
        let (status, response) = post_json(&app, "/diagnosis/classify", body.clone()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {}", body);
        assert!(response["error"].as_str().unwrap().starts_with("Invalid fact"));
    }
}

#[tokio::test]
async fn test_classify_missing_code_is_unprocessable() {
    let (_, app) = create_test_router();

    let (status, _) = post_json(
        &app,
        "/diagnosis/classify",
        json!({ "fakta": [{ "bobot": 4 }] }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (_, app) = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/diagnosis/process")
        .header("content-type", "application/json")
        .body(Body::from("{\"user_id\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn test_create_and_list_users() {
    let (_, app) = create_test_router();

    let (status, body) = post_json(
        &app,
        "/users",
        json!({ "nama_lengkap": "Dewi Lestari", "usia": 39, "jenis_kelamin": "P" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    let (status, users) = get_json(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"].as_i64(), Some(id));
    assert_eq!(users[0]["nama_lengkap"], "Dewi Lestari");
}

#[tokio::test]
async fn test_create_user_incomplete() {
    let (_, app) = create_test_router();

    let (status, body) =
        post_json(&app, "/users", json!({ "nama_lengkap": "Dewi", "usia": 39 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Data tidak lengkap");
}

#[tokio::test]
async fn test_record_symptoms_then_process() {
    let (store, app) = create_test_router();
    let user_id = user_with_symptoms(&store, &[]).await;

    let (status, body) = post_json(
        &app,
        &format!("/users/{}/symptoms", user_id),
        json!({ "kode_gejala": ["G02", "G03"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], 2);

    let (status, body) =
        post_json(&app, "/diagnosis/process", json!({ "user_id": user_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tingkat_risiko"], "Sedang");
}

#[tokio::test]
async fn test_record_unknown_symptom_is_rejected() {
    let (store, app) = create_test_router();
    let user_id = user_with_symptoms(&store, &[]).await;

    let (status, body) = post_json(
        &app,
        &format!("/users/{}/symptoms", user_id),
        json!({ "kode_gejala": ["G01", "G42"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("G42"));
    assert!(store.load_facts(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_record_symptoms_unknown_user() {
    let (_, app) = create_test_router();

    let (status, _) = post_json(
        &app,
        "/users/404/symptoms",
        json!({ "kode_gejala": ["G01"] }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let (_, app) = create_test_router();

    let (status, symptoms) = get_json(&app, "/symptoms").await;
    assert_eq!(status, StatusCode::OK);
    let symptoms = symptoms.as_array().unwrap();
    assert_eq!(symptoms.len(), 6);
    assert_eq!(symptoms[0]["kode_gejala"], "G01");
    assert_eq!(symptoms[5]["bobot"].as_f64(), Some(6.0));

    let (status, recommendations) = get_json(&app, "/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recommendations.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_stats_counts() {
    let (store, app) = create_test_router();
    let user_id = user_with_symptoms(&store, &["G01"]).await;
    post_json(&app, "/diagnosis/process", json!({ "user_id": user_id })).await;

    let (status, stats) = get_json(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "total_users": 1,
            "total_diagnoses": 1,
            "total_recommendations": 3,
            "total_symptoms": 6
        })
    );
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Cek Gula</h1>").unwrap();

    let (_, service) = create_test_service();
    let app = create_router_with_static(service, dir.path());

    let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Cek Gula</h1>");

    let (status, _) = get_json(&app, "/symptoms").await;
    assert_eq!(status, StatusCode::OK);
}
