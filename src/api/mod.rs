//! Backend API layer
//!
//! `transport` turns HTTP outcomes into typed results, `resources` describes
//! each backend resource and `client` runs the shared request pipeline.

pub mod client;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::{ApiClient, ApiConfig, ResourceClient};
pub use resources::{Resource, ResourceKind};
