//! In-memory record storage.
//!
//! [`MemoryBackend`] is the reference implementation of the
//! [`RecordStorage`] hook wiring. It holds records in a `BTreeMap` behind
//! a `parking_lot::RwLock`, which keeps listings deterministic and makes
//! the backend cheap to construct in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::error::{InvalidTenantAccess, RecordError, StoreResult};
use crate::guard::AccessGuard;
use crate::record::StoredRecord;
use crate::scope::ScopePolicy;
use crate::store::RecordStorage;
use crate::tenant::TenantId;

type RecordKey = (String, String);

/// In-memory [`RecordStorage`] backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<BTreeMap<RecordKey, StoredRecord>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records across all tenants.
    ///
    /// Maintenance-facing; not part of the managed data-access path.
    pub fn total_records(&self) -> usize {
        self.records.read().len()
    }

    /// The current tenant, required before any mutation may proceed.
    fn writing_tenant(context: &TenantContext) -> Result<TenantId, InvalidTenantAccess> {
        context.current().ok_or(InvalidTenantAccess::NoActiveTenant)
    }

    fn key(record_type: &str, id: &str) -> RecordKey {
        (record_type.to_string(), id.to_string())
    }

    fn insert_record(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: String,
        content: Value,
    ) -> StoreResult<StoredRecord> {
        let owner = Self::writing_tenant(context)?;
        AccessGuard::authorize_write(context, &owner)?;

        let mut records = self.records.write();
        let key = Self::key(record_type, &id);
        if records.contains_key(&key) {
            return Err(RecordError::AlreadyExists {
                record_type: record_type.to_string(),
                id,
            }
            .into());
        }

        let record = StoredRecord::new(record_type, id, owner.clone(), content);
        debug!(tenant_id = %owner, record_type, id = record.id(), "Inserted record");
        records.insert(key, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl RecordStorage for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(
        &self,
        context: &TenantContext,
        record_type: &str,
        content: Value,
    ) -> StoreResult<StoredRecord> {
        self.insert_record(context, record_type, Uuid::new_v4().to_string(), content)
    }

    async fn insert_with_id(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        content: Value,
    ) -> StoreResult<StoredRecord> {
        self.insert_record(context, record_type, id.to_string(), content)
    }

    async fn find(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
    ) -> StoreResult<Option<StoredRecord>> {
        let scope = ScopePolicy::resolve_read_filter(context)?;
        let records = self.records.read();
        Ok(records
            .get(&Self::key(record_type, id))
            .filter(|record| scope.permits(record.tenant_id()))
            .cloned())
    }

    async fn list(
        &self,
        context: &TenantContext,
        record_type: &str,
    ) -> StoreResult<Vec<StoredRecord>> {
        let scope = ScopePolicy::resolve_read_filter(context)?;
        let records = self.records.read();
        Ok(records
            .range(Self::key(record_type, "")..)
            .take_while(|((rtype, _), _)| rtype == record_type)
            .map(|(_, record)| record)
            .filter(|record| scope.permits(record.tenant_id()))
            .cloned()
            .collect())
    }

    async fn count(&self, context: &TenantContext, record_type: &str) -> StoreResult<usize> {
        Ok(self.list(context, record_type).await?.len())
    }

    async fn update(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        content: Value,
    ) -> StoreResult<StoredRecord> {
        let mut records = self.records.write();
        let record = records.get_mut(&Self::key(record_type, id)).ok_or_else(|| {
            RecordError::NotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            }
        })?;

        // Guard runs before the record is touched.
        AccessGuard::authorize_write(context, record.tenant_id())?;
        record.replace_content(content);
        debug!(record_type, id, version = record.version(), "Updated record");
        Ok(record.clone())
    }

    async fn update_fields(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<StoredRecord> {
        let mut records = self.records.write();
        let record = records.get_mut(&Self::key(record_type, id)).ok_or_else(|| {
            RecordError::NotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            }
        })?;

        AccessGuard::authorize_write(context, record.tenant_id())?;
        record.merge_fields(&fields);
        debug!(record_type, id, version = record.version(), "Updated record fields");
        Ok(record.clone())
    }

    async fn delete(
        &self,
        context: &TenantContext,
        record_type: &str,
        id: &str,
    ) -> StoreResult<()> {
        let mut records = self.records.write();
        let key = Self::key(record_type, id);
        let record = records.get(&key).ok_or_else(|| RecordError::NotFound {
            record_type: record_type.to_string(),
            id: id.to_string(),
        })?;

        AccessGuard::authorize_write(context, record.tenant_id())?;
        records.remove(&key);
        debug!(record_type, id, "Deleted record");
        Ok(())
    }
}
