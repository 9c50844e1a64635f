//! Diagnosis service
//!
//! Glue between the store and the evaluator: load a subject's observations,
//! classify them and append the result to the history.

use cekgula_core::{CoreError, Evaluator, RawFact, RiskClassification};
use cekgula_repository::{DiagnosisStore, RepositoryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors of a diagnosis run
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The subject has no recorded observations
    #[error("Gejala tidak ditemukan (user {0})")]
    NoFactsForSubject(i64),

    /// A fact row failed validation
    #[error(transparent)]
    InvalidFact(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A persisted classification
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOutcome {
    pub diagnosis_id: i64,
    pub classification: RiskClassification,
}

/// Runs classifications against a store
#[derive(Clone)]
pub struct DiagnosisService {
    store: Arc<dyn DiagnosisStore>,
    evaluator: Arc<Evaluator>,
}

impl DiagnosisService {
    pub fn new(store: Arc<dyn DiagnosisStore>, evaluator: Evaluator) -> Self {
        Self {
            store,
            evaluator: Arc::new(evaluator),
        }
    }

    pub fn store(&self) -> &Arc<dyn DiagnosisStore> {
        &self.store
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Classify a subject's recorded observations and persist the result
    ///
    /// Nothing is written when the subject has no observations or a row
    /// fails validation.
    pub async fn process(&self, user_id: i64) -> ServiceResult<DiagnosisOutcome> {
        let raw = self.store.load_facts(user_id).await?;
        if raw.is_empty() {
            return Err(ServiceError::NoFactsForSubject(user_id));
        }
        debug!("Loaded {} fact rows for user {}", raw.len(), user_id);

        let classification = self.evaluator.classify_raw(raw)?;
        let diagnosis_id = self.store.persist_result(user_id, &classification).await?;

        info!(
            "User {} classified {} (score {}, rule {})",
            user_id,
            classification.level,
            classification.score,
            classification.matched_rule.as_deref().unwrap_or("default")
        );

        Ok(DiagnosisOutcome {
            diagnosis_id,
            classification,
        })
    }

    /// Classify an inline fact list without touching the store
    pub fn classify_facts(&self, raw: Vec<RawFact>) -> ServiceResult<RiskClassification> {
        Ok(self.evaluator.classify_raw(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cekgula_core::{RiskLevel, RuleSet, ScoringPolicy};
    use cekgula_repository::{MemoryStore, NewUser};

    async fn service_with_user(codes: &[&str]) -> (DiagnosisService, i64) {
        let store = Arc::new(MemoryStore::seeded());
        let user_id = store
            .create_user(NewUser::new("Rina", 52, "P"))
            .await
            .unwrap();
        if !codes.is_empty() {
            let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
            store.record_symptoms(user_id, &codes).await.unwrap();
        }

        (DiagnosisService::new(store, Evaluator::canonical()), user_id)
    }

    #[tokio::test]
    async fn test_process_persists_classification() {
        let (service, user_id) = service_with_user(&["G01", "G02", "G06"]).await;

        let outcome = service.process(user_id).await.unwrap();
        assert_eq!(outcome.classification.level, RiskLevel::High);
        assert_eq!(outcome.classification.score, 13.0);

        let history = service.store().list_diagnoses().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, outcome.diagnosis_id);
        assert_eq!(history[0].user_id, user_id);
        assert_eq!(history[0].tingkat_risiko, RiskLevel::High);
    }

    #[tokio::test]
    async fn test_process_without_facts_writes_nothing() {
        let (service, user_id) = service_with_user(&[]).await;

        let err = service.process(user_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoFactsForSubject(id) if id == user_id));
        assert!(service.store().list_diagnoses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_appends_history() {
        let (service, user_id) = service_with_user(&["G02", "G03"]).await;

        let first = service.process(user_id).await.unwrap();
        let second = service.process(user_id).await.unwrap();

        assert_eq!(first.classification, second.classification);
        assert_ne!(first.diagnosis_id, second.diagnosis_id);
        assert_eq!(service.store().list_diagnoses().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_process_repeated_observation_scoring() {
        let (service, user_id) = service_with_user(&["G01", "G01"]).await;
        let outcome = service.process(user_id).await.unwrap();
        assert_eq!(outcome.classification.score, 4.0);
        assert_eq!(outcome.classification.facts, vec!["G01"]);

        let store = service.store().clone();
        let summing = DiagnosisService::new(
            store,
            Evaluator::canonical().with_policy(ScoringPolicy::SumAll),
        );
        let outcome = summing.process(user_id).await.unwrap();
        assert_eq!(outcome.classification.score, 8.0);
    }

    #[tokio::test]
    async fn test_classify_facts_is_stateless() {
        let (service, _) = service_with_user(&[]).await;

        let classification = service
            .classify_facts(vec![RawFact::new("G02", "3.00"), RawFact::new("G06", 6.0)])
            .unwrap();

        assert_eq!(classification.level, RiskLevel::Medium);
        assert_eq!(classification.score, 9.0);
        assert!(service.store().list_diagnoses().await.unwrap().is_empty());
    }

    #[test]
    fn test_classify_facts_rejects_bad_weight() {
        let service = DiagnosisService::new(
            Arc::new(MemoryStore::new()),
            Evaluator::new(RuleSet::legacy_narrow()).unwrap(),
        );

        let err = service
            .classify_facts(vec![RawFact::new("G01", "banyak")])
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidFact(CoreError::InvalidFact(_))));
    }
}
