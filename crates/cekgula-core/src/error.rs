//! Error types for cekgula Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A fact that cannot take part in classification (empty code, non-numeric weight)
    #[error("Invalid fact: {0}")]
    InvalidFact(String),

    /// A rule table that violates its structural constraints
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A risk label outside Rendah/Sedang/Tinggi
    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
