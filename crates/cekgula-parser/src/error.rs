//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error while reading a rule set file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Rule set parsed but failed validation
    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(#[from] cekgula_core::CoreError),

    /// Requested rule set id not present in the document
    #[error("Rule set not found: {0}")]
    RuleSetNotFound(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
