//! In-memory store
//!
//! Mirrors the MySQL tables with vectors behind a single `RwLock`. Suitable
//! for tests and local development; data is lost when the process exits.

use async_trait::async_trait;
use cekgula_core::{RawCode, RawFact, RawWeight, RiskClassification, RiskLevel, Symptom};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{DiagnosisRecord, NewUser, Recommendation, Stats, User};
use crate::traits::DiagnosisStore;
use crate::{RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    symptoms: Vec<Symptom>,
    /// (user_id, symptom_id)
    observations: Vec<(i64, i64)>,
    diagnoses: Vec<DiagnosisRecord>,
    recommendations: Vec<Recommendation>,
}

/// In-memory [`DiagnosisStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with [`default_catalog`] and [`default_recommendations`]
    pub fn seeded() -> Self {
        Self::new()
            .with_catalog(default_catalog())
            .with_recommendations(default_recommendations())
    }

    /// Replace the symptom catalog
    pub fn with_catalog(mut self, symptoms: Vec<Symptom>) -> Self {
        self.state.get_mut().symptoms = symptoms;
        self
    }

    /// Replace the recommendations
    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.state.get_mut().recommendations = recommendations;
        self
    }
}

/// The catalog shipped with the assessment form
pub fn default_catalog() -> Vec<Symptom> {
    vec![
        Symptom::new(1, "G01", "Sering merasa haus", 4.0).with_severity("Sedang"),
        Symptom::new(2, "G02", "Sering buang air kecil", 3.0).with_severity("Sedang"),
        Symptom::new(3, "G03", "Mudah lapar", 2.0).with_severity("Ringan"),
        Symptom::new(4, "G04", "Penglihatan kabur", 2.0).with_severity("Ringan"),
        Symptom::new(5, "G05", "Mudah lelah", 1.0).with_severity("Ringan"),
        Symptom::new(6, "G06", "Luka sulit sembuh", 6.0).with_severity("Berat"),
    ]
}

/// One recommendation per risk level
pub fn default_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            1,
            Some(RiskLevel::Low),
            "Pertahankan pola makan seimbang dan aktivitas fisik rutin.",
        ),
        Recommendation::new(
            2,
            Some(RiskLevel::Medium),
            "Kurangi asupan gula dan lakukan cek gula darah berkala.",
        ),
        Recommendation::new(
            3,
            Some(RiskLevel::High),
            "Segera konsultasikan ke dokter untuk pemeriksaan gula darah.",
        ),
    ]
}

fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i64) -> i64 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

#[async_trait]
impl DiagnosisStore for MemoryStore {
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }

    async fn select_two(&self) -> RepositoryResult<i64> {
        Ok(2)
    }

    async fn load_facts(&self, user_id: i64) -> RepositoryResult<Vec<RawFact>> {
        let state = self.state.read().await;

        let facts = state
            .observations
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, sid)| state.symptoms.iter().find(|s| s.id == *sid))
            .map(|s| RawFact {
                code: Some(RawCode::Text(s.code.clone())),
                weight: Some(RawWeight::Number(s.weight)),
            })
            .collect();

        Ok(facts)
    }

    async fn persist_result(
        &self,
        user_id: i64,
        classification: &RiskClassification,
    ) -> RepositoryResult<i64> {
        let mut state = self.state.write().await;

        let id = next_id(&state.diagnoses, |d| d.id);
        state.diagnoses.push(DiagnosisRecord {
            id,
            user_id,
            tingkat_risiko: classification.level,
            skor_akhir: classification.score,
            created_at: Some(Utc::now().naive_utc()),
        });

        tracing::debug!("Stored diagnosis {} for user {}", id, user_id);
        Ok(id)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let state = self.state.read().await;

        let mut users = state.users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn create_user(&self, user: NewUser) -> RepositoryResult<i64> {
        let mut state = self.state.write().await;

        let id = next_id(&state.users, |u| u.id);
        state.users.push(User {
            id,
            nama_lengkap: user.nama_lengkap,
            usia: user.usia,
            jenis_kelamin: user.jenis_kelamin,
            created_at: Some(Utc::now().naive_utc()),
        });

        Ok(id)
    }

    async fn list_symptoms(&self) -> RepositoryResult<Vec<Symptom>> {
        let state = self.state.read().await;

        let mut symptoms = state.symptoms.clone();
        symptoms.sort_by_key(|s| s.id);
        Ok(symptoms)
    }

    async fn record_symptoms(&self, user_id: i64, codes: &[String]) -> RepositoryResult<usize> {
        let mut state = self.state.write().await;

        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(RepositoryError::NotFound {
                entity: "User",
                id: user_id,
            });
        }

        let symptom_ids = codes
            .iter()
            .map(|code| {
                state
                    .symptoms
                    .iter()
                    .find(|s| &s.code == code)
                    .map(|s| s.id)
                    .ok_or_else(|| RepositoryError::UnknownSymptom(code.clone()))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        state
            .observations
            .extend(symptom_ids.iter().map(|sid| (user_id, *sid)));

        Ok(symptom_ids.len())
    }

    async fn list_diagnoses(&self) -> RepositoryResult<Vec<DiagnosisRecord>> {
        let state = self.state.read().await;

        let mut diagnoses = state.diagnoses.clone();
        diagnoses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(diagnoses)
    }

    async fn list_recommendations(&self) -> RepositoryResult<Vec<Recommendation>> {
        let state = self.state.read().await;
        Ok(state.recommendations.clone())
    }

    async fn stats(&self) -> RepositoryResult<Stats> {
        let state = self.state.read().await;

        Ok(Stats {
            total_users: state.users.len() as i64,
            total_diagnoses: state.diagnoses.len() as i64,
            total_recommendations: state.recommendations.len() as i64,
            total_symptoms: state.symptoms.len() as i64,
        })
    }
}
