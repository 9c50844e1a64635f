//! cekgula Parser - YAML rule set documents
//!
//! Rule tables live in versioned YAML files so a deployment can switch or
//! compare tables without a rebuild. This crate turns those documents into
//! validated [`cekgula_core::RuleSet`] values.

pub mod error;
pub mod ruleset_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use ruleset_parser::RulesetParser;
pub use yaml_parser::YamlParser;
