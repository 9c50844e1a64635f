//! Storage layer for cekgula
//!
//! The classifier itself never touches storage. This crate provides what the
//! diagnosis service needs around it:
//!
//! - **[`DiagnosisStore`]**: async trait for loading a subject's facts,
//!   appending classification records and the plain catalog reads
//! - **[`MemoryStore`]**: in-process store for tests and local development
//! - **`MySqlStore`** (feature `mysql`): the production MySQL schema via sqlx
//!
//! # Quick Start
//!
//! ```no_run
//! use cekgula_repository::{DiagnosisStore, MemoryStore, NewUser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::seeded();
//!     let user_id = store
//!         .create_user(NewUser::new("Siti Aminah", 45, "P"))
//!         .await?;
//!     store
//!         .record_symptoms(user_id, &["G01".to_string(), "G06".to_string()])
//!         .await?;
//!
//!     let facts = store.load_facts(user_id).await?;
//!     assert_eq!(facts.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod models;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod traits;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::MemoryStore;
pub use models::{DiagnosisRecord, NewUser, Recommendation, Stats, User};
#[cfg(feature = "mysql")]
pub use mysql::MySqlStore;
pub use traits::DiagnosisStore;
