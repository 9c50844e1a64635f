//! Rule tables
//!
//! A rule set is an ordered list of IF-THEN rules plus a default level.
//! Rules are plain data; the evaluator owns the matching loop, so a table can
//! be swapped, versioned or loaded from a file without touching it.

use crate::error::{CoreError, Result};
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the five-rule table used by default
pub const CANONICAL: &str = "canonical";

/// Name of the two-rule table found in older deployments
pub const LEGACY_NARROW: &str = "legacy_narrow";

/// One IF-THEN rule: all antecedent codes present => consequent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule id within its rule set
    pub id: String,

    /// Symptom codes that must all be present
    #[serde(rename = "when")]
    pub antecedent: Vec<String>,

    /// Level produced when the antecedent holds
    #[serde(rename = "then")]
    pub consequent: RiskLevel,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    /// Create a new rule
    pub fn new<I, S>(id: impl Into<String>, antecedent: I, consequent: RiskLevel) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule {
            id: id.into(),
            antecedent: antecedent.into_iter().map(Into::into).collect(),
            consequent,
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set containment test, exact and case-sensitive
    pub fn matches(&self, codes: &HashSet<&str>) -> bool {
        self.antecedent.iter().all(|c| codes.contains(c.as_str()))
    }
}

/// Ordered rule table, evaluated top to bottom, first match wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Unique identifier for this rule set
    pub id: String,

    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rules in evaluation order
    pub rules: Vec<Rule>,

    /// Level when no rule matches
    #[serde(default)]
    pub default: RiskLevel,
}

impl RuleSet {
    /// Create an empty rule set defaulting to Low
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            rules: Vec::new(),
            default: RiskLevel::Low,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a rule at the end of the table
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace all rules
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Set the default level
    pub fn with_default(mut self, default: RiskLevel) -> Self {
        self.default = default;
        self
    }

    /// The five-rule table
    ///
    /// Antecedents overlap (rule 1 is a superset of rule 2), so the order of
    /// this list is the tie-break.
    pub fn canonical() -> Self {
        RuleSet::new(CANONICAL)
            .with_name("Forward chaining risiko diabetes")
            .add_rule(Rule::new("R1", ["G01", "G02", "G06"], RiskLevel::High))
            .add_rule(Rule::new("R2", ["G01", "G06"], RiskLevel::High))
            .add_rule(Rule::new("R3", ["G02", "G03"], RiskLevel::Medium))
            .add_rule(Rule::new("R4", ["G02", "G06"], RiskLevel::Medium))
            .with_default(RiskLevel::Low)
    }

    /// The two-rule table: G01 and G02 => High, G01 => Medium
    pub fn legacy_narrow() -> Self {
        RuleSet::new(LEGACY_NARROW)
            .with_name("Forward chaining (legacy)")
            .add_rule(Rule::new("R1", ["G01", "G02"], RiskLevel::High))
            .add_rule(Rule::new("R2", ["G01"], RiskLevel::Medium))
            .with_default(RiskLevel::Low)
    }

    /// Look up a built-in rule set by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            CANONICAL => Some(Self::canonical()),
            LEGACY_NARROW => Some(Self::legacy_narrow()),
            _ => None,
        }
    }

    /// Names accepted by [`RuleSet::builtin`]
    pub fn builtin_names() -> &'static [&'static str] {
        &[CANONICAL, LEGACY_NARROW]
    }

    /// First rule whose antecedent is contained in `codes`
    pub fn first_match(&self, codes: &HashSet<&str>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(codes))
    }

    /// Check structural constraints
    ///
    /// A catch-all is expressed through `default`, never through a rule with
    /// an empty antecedent.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidRule("rule set id is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(CoreError::InvalidRule(format!(
                    "rule set '{}' contains a rule without id",
                    self.id
                )));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CoreError::InvalidRule(format!(
                    "duplicate rule id '{}' in rule set '{}'",
                    rule.id, self.id
                )));
            }
            if rule.antecedent.is_empty() {
                return Err(CoreError::InvalidRule(format!(
                    "rule '{}' has an empty antecedent",
                    rule.id
                )));
            }
            if rule.antecedent.iter().any(|c| c.trim().is_empty()) {
                return Err(CoreError::InvalidRule(format!(
                    "rule '{}' has an empty symptom code",
                    rule.id
                )));
            }
        }

        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::canonical()
    }
}
