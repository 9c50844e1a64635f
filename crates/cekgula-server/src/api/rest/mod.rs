//! REST API implementation
//!
//! - types: request/response payloads
//! - extractors: JSON extractor with uniform error bodies
//! - handlers: endpoint handlers
//! - router: route table, middleware and static fallback

mod extractors;
mod handlers;
mod router;
pub mod types;

pub use extractors::JsonExtractor;
pub use router::{create_router, create_router_with_static};
pub use types::{
    AppState, ClassifyPayload, ClassifyResponse, CreateUserPayload, CreatedResponse,
    DiagnosisResponse, ProcessPayload, RecordSymptomsPayload, RecordSymptomsResponse,
};
