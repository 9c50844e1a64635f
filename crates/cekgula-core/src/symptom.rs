//! Symptom catalog entries

use crate::fact::Fact;
use serde::{Deserialize, Serialize};

/// Symptom catalog entry (`symptoms` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    /// Row id
    pub id: i64,

    /// Unique short code, e.g. "G01"
    #[serde(rename = "kode_gejala")]
    pub code: String,

    /// Display name
    #[serde(rename = "nama_gejala")]
    pub name: String,

    /// Free-text description
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,

    /// Severity category as stored in the catalog
    #[serde(rename = "tingkat_keparahan", default)]
    pub severity: Option<String>,

    /// Non-negative weight used additively in scoring
    #[serde(rename = "bobot")]
    pub weight: f64,
}

impl Symptom {
    /// Create a catalog entry
    pub fn new(id: i64, code: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: None,
            severity: None,
            weight,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the severity category
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// The fact this symptom contributes when a subject reports it
    pub fn to_fact(&self) -> Fact {
        Fact {
            code: self.code.clone(),
            weight: self.weight,
        }
    }
}
