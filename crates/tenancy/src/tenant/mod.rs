//! Tenant identity and account lookup.
//!
//! # Core Types
//!
//! - [`TenantId`] - Opaque tenant identifier
//! - [`Account`] - The externally managed record behind a tenant, carrying
//!   the domain/subdomain strings used for request resolution
//! - [`AccountDirectory`] - Lookup collaborator consumed by the resolver
//!
//! Accounts are created and destroyed by the host application; this crate
//! only reads their identity and domain set.

mod account;
mod id;

pub use account::{Account, AccountDirectory, InMemoryAccountDirectory};
pub use id::TenantId;
