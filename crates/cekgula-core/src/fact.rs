//! Observed facts and fact sets
//!
//! A fact is one observed symptom code with its weight. Storage hands weights
//! over as numbers or as numeric strings (MySQL DECIMAL columns come back as
//! text), so parsing happens here, once, at the fact set boundary. Everything
//! past [`FactSet`] works with validated `f64` weights.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A weight as it arrives from storage or from a request body
///
/// Any JSON shape deserializes; shapes other than a number or a string are
/// kept as [`RawWeight::Other`] and rejected by [`RawWeight::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawWeight {
    /// Parse into a finite, non-negative weight
    pub fn parse(&self) -> Result<f64> {
        let value = match self {
            RawWeight::Number(n) => *n,
            RawWeight::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                CoreError::InvalidFact(format!("weight '{}' is not numeric", s))
            })?,
            RawWeight::Other(v) => {
                return Err(CoreError::InvalidFact(format!("weight {} is not numeric", v)))
            }
        };

        if !value.is_finite() {
            return Err(CoreError::InvalidFact(format!(
                "weight {} is not a finite number",
                value
            )));
        }
        if value < 0.0 {
            return Err(CoreError::InvalidFact(format!(
                "weight {} is negative",
                value
            )));
        }

        Ok(value)
    }
}

impl From<f64> for RawWeight {
    fn from(value: f64) -> Self {
        RawWeight::Number(value)
    }
}

impl From<&str> for RawWeight {
    fn from(value: &str) -> Self {
        RawWeight::Text(value.to_string())
    }
}

impl From<String> for RawWeight {
    fn from(value: String) -> Self {
        RawWeight::Text(value)
    }
}

/// A symptom code as it arrives in a request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for RawCode {
    fn from(value: &str) -> Self {
        RawCode::Text(value.to_string())
    }
}

impl From<String> for RawCode {
    fn from(value: String) -> Self {
        RawCode::Text(value)
    }
}

/// Unvalidated fact (`{kode_gejala, bobot}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    #[serde(rename = "kode_gejala", default)]
    pub code: Option<RawCode>,

    #[serde(rename = "bobot", default)]
    pub weight: Option<RawWeight>,
}

impl RawFact {
    pub fn new(code: impl Into<String>, weight: impl Into<RawWeight>) -> Self {
        Self {
            code: Some(RawCode::Text(code.into())),
            weight: Some(weight.into()),
        }
    }

    /// Validate into a [`Fact`]
    pub fn parse(&self) -> Result<Fact> {
        let code = match &self.code {
            Some(RawCode::Text(code)) if !code.trim().is_empty() => code.clone(),
            Some(RawCode::Other(v)) => {
                return Err(CoreError::InvalidFact(format!(
                    "symptom code {} is not a string",
                    v
                )))
            }
            _ => return Err(CoreError::InvalidFact("symptom code is empty".to_string())),
        };

        let weight = self
            .weight
            .as_ref()
            .ok_or_else(|| CoreError::InvalidFact(format!("weight for '{}' is missing", code)))?
            .parse()
            .map_err(|e| match e {
                CoreError::InvalidFact(msg) => {
                    CoreError::InvalidFact(format!("{} (symptom '{}')", msg, code))
                }
                other => other,
            })?;

        Ok(Fact { code, weight })
    }
}

/// Validated fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "kode_gejala")]
    pub code: String,

    #[serde(rename = "bobot")]
    pub weight: f64,
}

impl Fact {
    pub fn new(code: impl Into<String>, weight: f64) -> Self {
        Self {
            code: code.into(),
            weight,
        }
    }
}

/// The facts observed for one subject at classification time
///
/// Keeps every observation row in arrival order. Whether repeated codes count
/// once or once per row is decided by the evaluator's scoring policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSet {
    rows: Vec<Fact>,
}

impl FactSet {
    /// Create an empty fact set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from facts, rejecting empty codes and unusable weights
    pub fn new(facts: Vec<Fact>) -> Result<Self> {
        for fact in &facts {
            if fact.code.trim().is_empty() {
                return Err(CoreError::InvalidFact("symptom code is empty".to_string()));
            }
            RawWeight::Number(fact.weight).parse().map_err(|e| match e {
                CoreError::InvalidFact(msg) => {
                    CoreError::InvalidFact(format!("{} (symptom '{}')", msg, fact.code))
                }
                other => other,
            })?;
        }

        Ok(Self { rows: facts })
    }

    /// Build from raw `(code, weight)` pairs as delivered by storage or a request
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawFact>,
    {
        let rows = raw
            .into_iter()
            .map(|r| r.parse())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Every observation row in arrival order
    pub fn rows(&self) -> &[Fact] {
        &self.rows
    }

    /// First occurrence of each code, in first-seen order
    pub fn distinct(&self) -> Vec<&Fact> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|f| seen.insert(f.code.as_str()))
            .collect()
    }

    /// Distinct codes in first-seen order
    pub fn codes(&self) -> Vec<String> {
        self.distinct().into_iter().map(|f| f.code.clone()).collect()
    }

    /// Set of distinct codes for antecedent matching
    pub fn code_set(&self) -> HashSet<&str> {
        self.rows.iter().map(|f| f.code.as_str()).collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rows.iter().any(|f| f.code == code)
    }

    /// Number of observation rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Combine two fact sets, keeping `self`'s rows first
    pub fn union(&self, other: &FactSet) -> FactSet {
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        FactSet { rows }
    }
}

impl FromIterator<Fact> for FactSet {
    /// Collect without validation; use [`FactSet::new`] for untrusted facts
    fn from_iter<T: IntoIterator<Item = Fact>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
