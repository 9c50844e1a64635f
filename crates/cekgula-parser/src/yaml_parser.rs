//! YAML Parser
//!
//! Small helpers for pulling typed fields out of `serde_yaml::Value` trees.

use crate::error::{ParseError, Result};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Parse a stream of `---`-separated documents
    ///
    /// Empty documents (a leading `---`, trailing separators) are skipped.
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        let mut documents = Vec::new();

        for document in serde_yaml::Deserializer::from_str(yaml_str) {
            let value = YamlValue::deserialize(document)?;
            if !value.is_null() {
                documents.push(value);
            }
        }

        Ok(documents)
    }

    /// Get required string field
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get optional string field
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get required array field
    pub fn get_array<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        obj.get(field)
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get a required array of strings, rejecting non-string items
    pub fn get_string_array(obj: &YamlValue, field: &str) -> Result<Vec<String>> {
        Self::get_array(obj, field)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| ParseError::InvalidValue {
                        field: field.to_string(),
                        message: format!("expected string, got {}", Self::to_string(item)),
                    })
            })
            .collect()
    }

    /// Render a value for error messages
    pub fn to_string(value: &YamlValue) -> String {
        match value {
            YamlValue::Null => "null".to_string(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::Number(n) => n.to_string(),
            YamlValue::String(s) => s.clone(),
            _ => serde_yaml::to_string(value).unwrap_or_default().trim().to_string(),
        }
    }

    /// Check if field exists
    pub fn has_field(obj: &YamlValue, field: &str) -> bool {
        obj.get(field).is_some()
    }
}
