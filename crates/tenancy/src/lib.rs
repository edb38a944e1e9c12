//! Tessera Tenancy Engine
//!
//! This crate enforces tenant isolation for multi-tenant applications:
//! every stored record belongs to exactly one tenant, and all data access
//! is implicitly and verifiably scoped to a single "current tenant" for
//! the duration of a logical operation (one HTTP request, one job, one
//! test).
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identity ([`TenantId`]), the [`Account`] record
//!   behind a tenant, and the [`AccountDirectory`] lookup collaborator
//! - [`context`] - The per-execution-unit [`TenantContext`] with nestable
//!   scoped activation and override modes
//! - [`scope`] - The read-path [`ScopePolicy`] deciding how reads are
//!   filtered
//! - [`guard`] - The write-path [`AccessGuard`], unconditional regardless
//!   of read-scope mode
//! - [`resolver`] - Host-based [`TenantResolver`]
//! - [`record`] - The tenant-owned [`StoredRecord`] model
//! - [`store`] - The [`RecordStorage`] trait wiring every read and write
//!   through policy and guard, plus the in-memory backend
//! - [`error`] - [`MissingTenantError`] (read path) and
//!   [`InvalidTenantAccess`] (write path), kept strictly apart
//!
//! # Design
//!
//! The read policy and the write guard are deliberately asymmetric. Reads
//! may be relaxed, always explicitly and always scoped: the default scope
//! can be disabled, or a block can opt into
//! [`with_read_across_tenant`](context::TenantContext::with_read_across_tenant).
//! Writes have exactly one enforcement mode. No read-side override widens
//! what a write may touch, so granting a reporting job unscoped reads can
//! never let it corrupt another tenant's data.
//!
//! Scoped state is stack-disciplined and restored even when the body
//! fails:
//!
//! ```
//! use tessera_tenancy::context::TenantContext;
//! use tessera_tenancy::tenant::TenantId;
//!
//! let context = TenantContext::new();
//! context.activate(TenantId::new("t1"), || {
//!     context.activate(TenantId::new("t2"), || {
//!         assert_eq!(context.current(), Some(TenantId::new("t2")));
//!     });
//!     assert_eq!(context.current(), Some(TenantId::new("t1")));
//! });
//! assert_eq!(context.current(), None);
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tessera_tenancy::context::TenantContext;
//! use tessera_tenancy::store::{MemoryBackend, RecordStorage};
//! use tessera_tenancy::tenant::TenantId;
//! use serde_json::json;
//!
//! # async fn example() -> tessera_tenancy::error::StoreResult<()> {
//! let backend = MemoryBackend::new();
//! let context = TenantContext::new();
//!
//! let scope = context.enter(TenantId::new("acme"));
//! backend
//!     .insert(&context, "users", json!({"name": "Ada"}))
//!     .await?;
//! assert_eq!(backend.count(&context, "users").await?, 1);
//! drop(scope);
//!
//! // With no tenant active, guarded reads fail closed.
//! assert!(backend.count(&context, "users").await.is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod context;
pub mod error;
pub mod guard;
pub mod record;
pub mod resolver;
pub mod scope;
pub mod store;
pub mod tenant;

// Re-export commonly used types at crate root
pub use context::{DefaultScopeMode, TenantContext};
pub use error::{InvalidTenantAccess, MissingTenantError, StoreError, StoreResult};
pub use guard::AccessGuard;
pub use record::StoredRecord;
pub use resolver::TenantResolver;
pub use scope::{ReadScope, ScopePolicy};
pub use store::{MemoryBackend, RecordStorage};
pub use tenant::{Account, AccountDirectory, InMemoryAccountDirectory, TenantId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
