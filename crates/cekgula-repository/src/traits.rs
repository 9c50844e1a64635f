//! Store trait
//!
//! [`DiagnosisStore`] is the seam between the diagnosis service and whatever
//! holds the data. Facts come back unparsed ([`RawFact`]) because weight
//! coercion belongs to the core's fact set boundary, not to the store.

use async_trait::async_trait;
use cekgula_core::{RawFact, RiskClassification, Symptom};

use crate::models::{DiagnosisRecord, NewUser, Recommendation, Stats, User};
use crate::RepositoryResult;

/// Storage operations used by the diagnosis service and the CRUD endpoints
#[async_trait]
pub trait DiagnosisStore: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> RepositoryResult<()>;

    /// Evaluate `SELECT 1 + 1` on the backing store
    async fn select_two(&self) -> RepositoryResult<i64>;

    /// Observation rows for a subject joined with the catalog; empty when the
    /// subject has reported nothing (or does not exist)
    async fn load_facts(&self, user_id: i64) -> RepositoryResult<Vec<RawFact>>;

    /// Append a classification record, returning its id. Prior records are
    /// left untouched.
    async fn persist_result(
        &self,
        user_id: i64,
        classification: &RiskClassification,
    ) -> RepositoryResult<i64>;

    /// Users, newest first
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;

    /// Insert a user, returning its id
    async fn create_user(&self, user: NewUser) -> RepositoryResult<i64>;

    /// Symptom catalog ordered by id
    async fn list_symptoms(&self) -> RepositoryResult<Vec<Symptom>>;

    /// Append observations for a subject by symptom code, returning the
    /// number of rows written. Fails without writing anything when the user
    /// or any code is unknown.
    async fn record_symptoms(&self, user_id: i64, codes: &[String]) -> RepositoryResult<usize>;

    /// Classification history, newest first
    async fn list_diagnoses(&self) -> RepositoryResult<Vec<DiagnosisRecord>>;

    async fn list_recommendations(&self) -> RepositoryResult<Vec<Recommendation>>;

    async fn stats(&self) -> RepositoryResult<Stats>;
}
