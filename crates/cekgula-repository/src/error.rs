//! Error types for the storage layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Symptom code not present in the catalog
    #[error("Unknown symptom code: {0}")]
    UnknownSymptom(String),

    /// Stored data that cannot be mapped to a model
    #[error("Invalid stored data: {0}")]
    Invalid(String),

    /// Database error (when the mysql feature is enabled)
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<cekgula_core::CoreError> for RepositoryError {
    fn from(err: cekgula_core::CoreError) -> Self {
        RepositoryError::Invalid(err.to_string())
    }
}
