//! Row models
//!
//! Field names follow the existing table columns, which are also the JSON
//! field names the frontend reads.

use cekgula_core::RiskLevel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Assessed person (`users` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nama_lengkap: String,
    pub usia: i32,
    pub jenis_kelamin: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for creating a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub nama_lengkap: String,
    pub usia: i32,
    pub jenis_kelamin: String,
}

impl NewUser {
    pub fn new(nama_lengkap: impl Into<String>, usia: i32, jenis_kelamin: impl Into<String>) -> Self {
        Self {
            nama_lengkap: nama_lengkap.into(),
            usia,
            jenis_kelamin: jenis_kelamin.into(),
        }
    }
}

/// Appended classification record (`diagnoses` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub id: i64,
    pub user_id: i64,
    pub tingkat_risiko: RiskLevel,
    pub skor_akhir: f64,
    pub created_at: Option<NaiveDateTime>,
}

/// Advice text attached to a risk level (`recommendations` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub tingkat_risiko: Option<String>,
    pub rekomendasi: String,
}

impl Recommendation {
    pub fn new(id: i64, tingkat_risiko: Option<RiskLevel>, rekomendasi: impl Into<String>) -> Self {
        Self {
            id,
            tingkat_risiko: tingkat_risiko.map(|l| l.label().to_string()),
            rekomendasi: rekomendasi.into(),
        }
    }
}

/// Row counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_users: i64,
    pub total_diagnoses: i64,
    pub total_recommendations: i64,
    pub total_symptoms: i64,
}
