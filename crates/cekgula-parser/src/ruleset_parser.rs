//! Rule set parser
//!
//! Parses YAML rule set definitions into validated [`RuleSet`] values.
//!
//! ```yaml
//! version: "0.1"
//! ruleset:
//!   id: canonical
//!   name: Forward chaining risiko diabetes
//!   rules:
//!     - id: R1
//!       when: [G01, G02, G06]
//!       then: Tinggi
//!   default: Rendah
//! ```

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use cekgula_core::{RiskLevel, Rule, RuleSet};
use serde_yaml::Value as YamlValue;
use std::path::Path;

/// Rule set parser
pub struct RulesetParser;

impl RulesetParser {
    /// Parse a rule set from YAML string
    pub fn parse(yaml_str: &str) -> Result<RuleSet> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse every rule set in a multi-document YAML string
    pub fn parse_all(yaml_str: &str) -> Result<Vec<RuleSet>> {
        YamlParser::parse_multi_document(yaml_str)?
            .iter()
            .map(Self::parse_from_yaml)
            .collect()
    }

    /// Read a file and return the rule set with the given id, or the only
    /// rule set in the file when `id` is `None`
    pub fn parse_file(path: impl AsRef<Path>, id: Option<&str>) -> Result<RuleSet> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut rulesets = Self::parse_all(&content)?;

        log::info!(
            "Loaded {} rule set(s) from {}",
            rulesets.len(),
            path.display()
        );

        match id {
            Some(id) => rulesets
                .into_iter()
                .find(|r| r.id == id)
                .ok_or_else(|| ParseError::RuleSetNotFound(id.to_string())),
            None if rulesets.len() == 1 => Ok(rulesets.remove(0)),
            None => Err(ParseError::InvalidValue {
                field: "ruleset".to_string(),
                message: format!(
                    "{} contains {} rule sets, an id is required",
                    path.display(),
                    rulesets.len()
                ),
            }),
        }
    }

    /// Parse a rule set from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<RuleSet> {
        // Get the "ruleset" object
        let ruleset_obj = yaml.get("ruleset").ok_or_else(|| ParseError::MissingField {
            field: "ruleset".to_string(),
        })?;

        let id = YamlParser::get_string(ruleset_obj, "id")?;
        let name = YamlParser::get_optional_string(ruleset_obj, "name");
        let description = YamlParser::get_optional_string(ruleset_obj, "description");

        let rules = YamlParser::get_array(ruleset_obj, "rules")?
            .iter()
            .map(Self::parse_rule)
            .collect::<Result<Vec<_>>>()?;

        let default = match YamlParser::get_optional_string(ruleset_obj, "default") {
            Some(label) => Self::parse_level("default", &label)?,
            None => RiskLevel::Low,
        };

        let ruleset = RuleSet {
            id,
            name,
            description,
            rules,
            default,
        };
        ruleset.validate()?;

        Ok(ruleset)
    }

    /// Parse a single rule
    fn parse_rule(yaml: &YamlValue) -> Result<Rule> {
        let id = YamlParser::get_string(yaml, "id")?;
        let antecedent = YamlParser::get_string_array(yaml, "when")?;
        let then = YamlParser::get_string(yaml, "then")?;
        let consequent = Self::parse_level("then", &then)?;

        let mut rule = Rule::new(id, antecedent, consequent);
        if let Some(description) = YamlParser::get_optional_string(yaml, "description") {
            rule = rule.with_description(description);
        }

        Ok(rule)
    }

    /// Parse a wire risk label
    fn parse_level(field: &str, label: &str) -> Result<RiskLevel> {
        label.parse::<RiskLevel>().map_err(|_| ParseError::InvalidValue {
            field: field.to_string(),
            message: format!(
                "Unknown risk level '{}', expected Rendah, Sedang or Tinggi",
                label
            ),
        })
    }
}
