//! Axum extractors for tenant-aware handlers.

pub mod tenant;

pub use tenant::CurrentTenant;
