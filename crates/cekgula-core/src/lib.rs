//! cekgula Core - facts, rule sets and the forward-chaining evaluator
//!
//! This crate holds everything the risk classification needs and nothing
//! that performs I/O:
//! - Symptom catalog entries and observed facts
//! - Rule tables as data (ordered antecedent/consequent pairs)
//! - The evaluator that walks a rule table over a fact set
//! - Error types

pub mod error;
pub mod evaluator;
pub mod fact;
pub mod risk;
pub mod rule;
pub mod symptom;

// Re-export commonly used types
pub use error::CoreError;
pub use evaluator::{classify, Evaluator, ScoringPolicy};
pub use fact::{Fact, FactSet, RawCode, RawFact, RawWeight};
pub use risk::{RiskClassification, RiskLevel};
pub use rule::{Rule, RuleSet};
pub use symptom::Symptom;
