//! Evaluator and store initialization
//!
//! Turns the server configuration into the two collaborators of the
//! diagnosis service.

use crate::config::{RulesetSource, ServerConfig, StoreType};
use anyhow::Result;
use cekgula_core::{Evaluator, RuleSet};
use cekgula_parser::RulesetParser;
use cekgula_repository::{DiagnosisStore, MemoryStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the evaluator from the configured rule table and scoring policy
pub fn init_evaluator(config: &ServerConfig) -> Result<Evaluator> {
    let ruleset = match &config.ruleset {
        RulesetSource::Builtin { name } => RuleSet::builtin(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown builtin rule set '{}' (available: {})",
                name,
                RuleSet::builtin_names().join(", ")
            )
        })?,
        RulesetSource::File { path, id } => {
            info!("Loading rule set from {:?}", path);
            RulesetParser::parse_file(path, id.as_deref())?
        }
    };

    info!(
        "Rule set '{}' with {} rules, default {}, scoring {:?}",
        ruleset.id,
        ruleset.rules.len(),
        ruleset.default,
        config.scoring
    );

    Ok(Evaluator::new(ruleset)?.with_policy(config.scoring))
}

/// Open the configured store
pub async fn init_store(config: &ServerConfig) -> Result<Arc<dyn DiagnosisStore>> {
    match config.store {
        StoreType::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::seeded()))
        }
        StoreType::MySql => open_mysql(config).await,
    }
}

#[cfg(feature = "mysql")]
async fn open_mysql(config: &ServerConfig) -> Result<Arc<dyn DiagnosisStore>> {
    let db = &config.database;
    info!("Connecting to MySQL at {}:{}/{}", db.host, db.port, db.name);

    let store = cekgula_repository::MySqlStore::with_max_connections(
        &db.connection_url(),
        db.max_connections,
    )
    .await?;

    Ok(Arc::new(store))
}

#[cfg(not(feature = "mysql"))]
async fn open_mysql(_config: &ServerConfig) -> Result<Arc<dyn DiagnosisStore>> {
    Err(anyhow::anyhow!(
        "MySQL store requested but the server was built without the 'mysql' feature"
    ))
}
