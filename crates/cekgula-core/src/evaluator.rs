//! Forward-chaining evaluator
//!
//! Walks a [`RuleSet`] top to bottom over a [`FactSet`] and returns the first
//! consequent whose antecedent is satisfied, together with the summed weight
//! of the facts. Pure and synchronous: no I/O, no shared mutable state, so an
//! `Evaluator` can sit behind an `Arc` and serve any number of callers.

use crate::error::Result;
use crate::fact::{FactSet, RawFact};
use crate::risk::RiskClassification;
use crate::rule::RuleSet;
use serde::{Deserialize, Serialize};

/// How repeated observations of the same code are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Each distinct code counts once (first-seen weight)
    #[default]
    Dedup,

    /// Every observation row counts, repeated codes included
    SumAll,
}

/// Rule set plus scoring policy
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    ruleset: RuleSet,
    policy: ScoringPolicy,
}

impl Evaluator {
    /// Create an evaluator over a validated rule set
    pub fn new(ruleset: RuleSet) -> Result<Self> {
        ruleset.validate()?;
        Ok(Self {
            ruleset,
            policy: ScoringPolicy::default(),
        })
    }

    /// Evaluator over the canonical table with dedup scoring
    pub fn canonical() -> Self {
        Self {
            ruleset: RuleSet::canonical(),
            policy: ScoringPolicy::default(),
        }
    }

    /// Set the scoring policy
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Classify a fact set
    ///
    /// An empty fact set yields the default level with score 0; rejecting
    /// subjects without observations is the caller's decision.
    pub fn classify(&self, facts: &FactSet) -> RiskClassification {
        let codes = facts.code_set();
        let score = self.score(facts);

        match self.ruleset.first_match(&codes) {
            Some(rule) => {
                log::debug!(
                    "Rule '{}' of '{}' fired: {} (score {})",
                    rule.id,
                    self.ruleset.id,
                    rule.consequent,
                    score
                );
                RiskClassification::new(rule.consequent, score, facts.codes())
                    .with_matched_rule(rule.id.clone())
            }
            None => {
                log::debug!(
                    "No rule of '{}' fired, default {} (score {})",
                    self.ruleset.id,
                    self.ruleset.default,
                    score
                );
                RiskClassification::new(self.ruleset.default, score, facts.codes())
            }
        }
    }

    /// Validate raw facts and classify them
    pub fn classify_raw<I>(&self, raw: I) -> Result<RiskClassification>
    where
        I: IntoIterator<Item = RawFact>,
    {
        let facts = FactSet::from_raw(raw)?;
        Ok(self.classify(&facts))
    }

    /// Summed weight under the configured policy, in arrival order
    pub fn score(&self, facts: &FactSet) -> f64 {
        match self.policy {
            ScoringPolicy::Dedup => facts.distinct().iter().map(|f| f.weight).sum(),
            ScoringPolicy::SumAll => facts.rows().iter().map(|f| f.weight).sum(),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Classify with the canonical table and dedup scoring
pub fn classify(facts: &FactSet) -> RiskClassification {
    Evaluator::canonical().classify(facts)
}
