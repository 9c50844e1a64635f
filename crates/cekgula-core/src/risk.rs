//! Risk levels and the classification value object

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered risk level (Low < Medium < High)
///
/// The Indonesian labels are the wire values consumed by the existing
/// frontend and stored in `diagnoses.tingkat_risiko`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    #[serde(rename = "Rendah")]
    Low,
    #[serde(rename = "Sedang")]
    Medium,
    #[serde(rename = "Tinggi")]
    High,
}

impl RiskLevel {
    /// Wire label for this level
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Rendah",
            RiskLevel::Medium => "Sedang",
            RiskLevel::High => "Tinggi",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Rendah" => Ok(RiskLevel::Low),
            "Sedang" => Ok(RiskLevel::Medium),
            "Tinggi" => Ok(RiskLevel::High),
            other => Err(CoreError::UnknownRiskLevel(other.to_string())),
        }
    }
}

/// Result of one classification run
///
/// Serializes to the wire shape `{tingkat_risiko, skor_akhir, fakta}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskClassification {
    /// Derived risk level
    #[serde(rename = "tingkat_risiko")]
    pub level: RiskLevel,

    /// Sum of the weights that took part in scoring
    #[serde(rename = "skor_akhir")]
    pub score: f64,

    /// Distinct fact codes in first-seen order
    #[serde(rename = "fakta")]
    pub facts: Vec<String>,

    /// Id of the rule that fired, `None` when the default applied
    #[serde(skip)]
    pub matched_rule: Option<String>,
}

impl RiskClassification {
    /// Create a classification
    pub fn new(level: RiskLevel, score: f64, facts: Vec<String>) -> Self {
        Self {
            level,
            score,
            facts,
            matched_rule: None,
        }
    }

    /// Record the rule that produced the level
    pub fn with_matched_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.matched_rule = Some(rule_id.into());
        self
    }

    /// Whether the rule table's default produced the level
    pub fn is_default(&self) -> bool {
        self.matched_rule.is_none()
    }
}
