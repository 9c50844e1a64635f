//! Custom extractors
//!
//! Malformed bodies are answered with the same `{error, status}` shape as
//! every other API error instead of axum's plain-text rejections.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::json;

/// JSON extractor with uniform 400 bodies
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => return Ok(Self(value)),
            Err(rejection) => rejection,
        };

        let error_message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Data JSON tidak valid: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => format!("JSON tidak valid: {}", err.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                "Header 'Content-Type: application/json' wajib".to_string()
            }
            other => format!("Gagal membaca JSON: {}", other.body_text()),
        };
        tracing::debug!("Rejected request body: {}", error_message);

        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": error_message,
                "status": 400,
            })),
        ))
    }
}
