//! Storage traits and backends for tenant-owned records.
//!
//! [`RecordStorage`] is the managed data-access path: every read consults
//! [`ScopePolicy`] and every mutation passes [`AccessGuard`] before any
//! persistence side effect is applied. Backends implement the trait; the
//! hook wiring is part of the contract, not an optional layer, so there
//! is no bypass path for raw or field-level writes.
//!
//! [`ScopePolicy`]: crate::scope::ScopePolicy
//! [`AccessGuard`]: crate::guard::AccessGuard

mod memory;

pub use memory::MemoryBackend;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::context::TenantContext;
use crate::error::StoreResult;
use crate::record::StoredRecord;

/// Storage for tenant-owned records.
///
/// Every operation takes the execution unit's [`TenantContext`] as its
/// first parameter. Reads (find/list/count) are filtered per the scope
/// policy and fail with [`MissingTenantError`] when no tenant is
/// resolvable and no override applies. Mutations (insert/update/
/// update_fields/delete) are authorized by the access guard and fail with
/// [`InvalidTenantAccess`] before any state change; a rejected mutation
/// leaves the record exactly as it was.
///
/// [`MissingTenantError`]: crate::error::MissingTenantError
/// [`InvalidTenantAccess`]: crate::error::InvalidTenantAccess
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a new record owned by the current tenant, with a generated ID.
    async fn insert(
        &self,
        context: &TenantContext,
        record_type: &str,
        content: Value,
    ) -> StoreResult<StoredRecord>;

    /// Inserts a new record owned by the current tenant, with the given ID.
    async fn insert_with_id(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        content: Value,
    ) -> StoreResult<StoredRecord>;

    /// Finds a record by ID within the active read scope.
    ///
    /// Records outside the scope are simply not visible: the result is
    /// `Ok(None)`, indistinguishable from a record that does not exist.
    async fn find(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
    ) -> StoreResult<Option<StoredRecord>>;

    /// Lists all records of a type within the active read scope.
    async fn list(
        &self,
        context: &TenantContext,
        record_type: &str,
    ) -> StoreResult<Vec<StoredRecord>>;

    /// Counts records of a type within the active read scope.
    async fn count(&self, context: &TenantContext, record_type: &str) -> StoreResult<usize>;

    /// Replaces a record's content (full-object save).
    async fn update(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        content: Value,
    ) -> StoreResult<StoredRecord>;

    /// Updates individual fields of a record (partial / column-level save).
    ///
    /// Routes through the same guard as a full save; field-level writes
    /// are not an escape hatch.
    async fn update_fields(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<StoredRecord>;

    /// Deletes a record. A delete is a write and is guarded as one.
    async fn delete(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
    ) -> StoreResult<()>;
}
