//! REST API type definitions
//!
//! Field names are the Indonesian column names the assessment frontend
//! already reads.

use crate::error::ServerError;
use crate::service::DiagnosisService;
use cekgula_core::{RawFact, RiskClassification};
use cekgula_repository::NewUser;
use serde::{Deserialize, Serialize};

/// Name of the inference method echoed in diagnosis responses
pub const METHOD: &str = "Forward Chaining";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: DiagnosisService,
}

/// `POST /users` body
///
/// Every field is optional at the JSON level so that missing data gets the
/// same 400 as empty data.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserPayload {
    #[serde(default)]
    pub nama_lengkap: Option<String>,

    #[serde(default)]
    pub usia: Option<i32>,

    #[serde(default)]
    pub jenis_kelamin: Option<String>,
}

impl CreateUserPayload {
    /// Validate into a [`NewUser`]; empty strings and a zero age count as missing
    pub fn into_new_user(self) -> Result<NewUser, ServerError> {
        let nama = self.nama_lengkap.filter(|s| !s.trim().is_empty());
        let usia = self.usia.filter(|u| *u != 0);
        let jenis_kelamin = self.jenis_kelamin.filter(|s| !s.trim().is_empty());

        match (nama, usia, jenis_kelamin) {
            (Some(nama), Some(usia), Some(jenis_kelamin)) => {
                Ok(NewUser::new(nama, usia, jenis_kelamin))
            }
            _ => Err(ServerError::InvalidRequest("Data tidak lengkap".to_string())),
        }
    }
}

/// `{success, id}`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

/// `POST /users/:id/symptoms` body
#[derive(Debug, Deserialize)]
pub struct RecordSymptomsPayload {
    #[serde(default)]
    pub kode_gejala: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordSymptomsResponse {
    pub success: bool,
    pub user_id: i64,
    pub recorded: usize,
}

/// A user id as sent by the frontend: a number or a numeric form string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserIdInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl UserIdInput {
    fn as_id(&self) -> Option<i64> {
        match self {
            UserIdInput::Number(id) => Some(*id),
            UserIdInput::Text(s) => s.trim().parse().ok(),
            UserIdInput::Other(_) => None,
        }
    }
}

/// `POST /diagnosis/process` body
#[derive(Debug, Default, Deserialize)]
pub struct ProcessPayload {
    #[serde(default)]
    pub user_id: Option<UserIdInput>,
}

impl ProcessPayload {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id: Some(UserIdInput::Number(user_id)),
        }
    }

    /// The requested id; absent, zero and non-numeric values are all rejected
    pub fn user_id(&self) -> Result<i64, ServerError> {
        self.user_id
            .as_ref()
            .and_then(UserIdInput::as_id)
            .filter(|id| *id != 0)
            .ok_or_else(|| ServerError::InvalidRequest("user_id wajib".to_string()))
    }
}

/// Persisted diagnosis:
/// `{success, metode, diagnosis_id, tingkat_risiko, skor_akhir, fakta}`
#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub success: bool,
    pub metode: &'static str,
    pub diagnosis_id: i64,
    #[serde(flatten)]
    pub classification: RiskClassification,
}

/// `POST /diagnosis/classify` body
#[derive(Debug, Deserialize)]
pub struct ClassifyPayload {
    #[serde(default)]
    pub fakta: Vec<RawFact>,
}

/// Stateless classification: `{success, metode, tingkat_risiko, skor_akhir, fakta}`
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub metode: &'static str,
    #[serde(flatten)]
    pub classification: RiskClassification,
}

/// `GET /test-db`
#[derive(Debug, Serialize)]
pub struct DbStatusResponse {
    pub db: &'static str,
    pub result: i64,
}
