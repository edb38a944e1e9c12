//! Axum middleware for the REST API.

pub mod tenant;

pub use tenant::{TenantBinding, bind_tenant};
