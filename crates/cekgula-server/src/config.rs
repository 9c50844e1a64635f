//! Server configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `config/server.{yaml,toml,json}` (optional)
//! 3. `CEKGULA_*` environment variables (`CEKGULA_DATABASE__HOST=...`)
//! 4. the legacy deployment variables `PORT`, `DB_HOST`, `DB_PORT`,
//!    `DB_USER`, `DB_PASSWORD`, `DB_NAME`

use cekgula_core::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backing store for users, catalog and diagnoses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    /// In-process store seeded with the default catalog
    Memory,
    /// MySQL database
    #[default]
    MySql,
}

/// MySQL connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,

    /// Pool size
    pub max_connections: u32,

    /// Full connection URL; takes precedence over the individual fields
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            name: "cekgula".to_string(),
            max_connections: 10,
            url: None,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL for sqlx, with user, password and database name
    /// percent-encoded
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let user = urlencoding::encode(&self.user);
        let name = urlencoding::encode(&self.name);
        if self.password.is_empty() {
            format!("mysql://{}@{}:{}/{}", user, self.host, self.port, name)
        } else {
            format!(
                "mysql://{}:{}@{}:{}/{}",
                user,
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                name
            )
        }
    }
}

/// Where the rule table comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RulesetSource {
    /// One of the rule sets compiled into the binary
    Builtin {
        #[serde(default = "default_ruleset_name")]
        name: String,
    },
    /// A YAML rule set file
    File {
        path: PathBuf,
        /// Rule set id, required when the file holds several
        #[serde(default)]
        id: Option<String>,
    },
}

fn default_ruleset_name() -> String {
    cekgula_core::rule::CANONICAL.to_string()
}

impl Default for RulesetSource {
    fn default() -> Self {
        RulesetSource::Builtin {
            name: default_ruleset_name(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Backing store
    pub store: StoreType,

    /// MySQL settings, used when `store` is `mysql`
    pub database: DatabaseConfig,

    /// Rule table to classify with
    pub ruleset: RulesetSource,

    /// Scoring of repeated observations
    pub scoring: ScoringPolicy,

    /// Directory with the static frontend, served for unmatched paths
    pub static_dir: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreType::default(),
            database: DatabaseConfig::default(),
            ruleset: RulesetSource::default(),
            scoring: ScoringPolicy::default(),
            static_dir: None,
            log_level: "info".to_string(),
        }
    }
}

/// Environment variables of the original deployment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyEnv {
    pub port: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
}

impl LegacyEnv {
    /// Read from the process environment
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Self {
            port: var("PORT"),
            db_host: var("DB_HOST"),
            db_port: var("DB_PORT"),
            db_user: var("DB_USER"),
            db_password: var("DB_PASSWORD"),
            db_name: var("DB_NAME"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::from_sources("config/server", &LegacyEnv::from_env())
    }

    /// Merge an optional config file, `CEKGULA_*` variables and legacy variables
    pub fn from_sources(config_file: &str, legacy: &LegacyEnv) -> anyhow::Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix("CEKGULA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("port", legacy.port.clone())?
            .set_override_option("database.host", legacy.db_host.clone())?
            .set_override_option("database.port", legacy.db_port.clone())?
            .set_override_option("database.user", legacy.db_user.clone())?
            .set_override_option("database.password", legacy.db_password.clone())?
            .set_override_option("database.name", legacy.db_name.clone())?
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?;

        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// `host:port` to bind
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
