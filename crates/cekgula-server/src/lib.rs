//! cekgula HTTP server library
//!
//! REST API, diagnosis service and configuration, exposed for the binary
//! and for tests.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod service;

pub use service::{DiagnosisOutcome, DiagnosisService, ServiceError};
