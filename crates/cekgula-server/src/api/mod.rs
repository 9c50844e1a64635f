//! API layer

pub mod rest;

pub use rest::{create_router, create_router_with_static};
