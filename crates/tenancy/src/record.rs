//! Tenant-owned record type.
//!
//! [`StoredRecord`] wraps arbitrary JSON content with the persistence
//! metadata the enforcement engine needs: the record's type and ID, the
//! owning tenant, a version counter, and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tenant::TenantId;

/// A record owned by exactly one tenant.
///
/// The owning tenant is set at creation and is immutable: there is no
/// setter, and reassigning ownership is not a supported operation. Every
/// read or write of a stored record through [`RecordStorage`] passes the
/// scope policy or the access guard.
///
/// [`RecordStorage`]: crate::store::RecordStorage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// The record type (e.g. "users").
    record_type: String,

    /// The record's logical ID.
    id: String,

    /// The tenant that owns this record. Immutable.
    tenant_id: TenantId,

    /// The record content as JSON.
    content: Value,

    /// Version counter, incremented on every committed mutation.
    version: u64,

    /// When the record was first created.
    created_at: DateTime<Utc>,

    /// When the record was last modified.
    last_modified: DateTime<Utc>,
}

impl StoredRecord {
    /// Creates a new record at version 1, owned by `tenant_id`.
    pub fn new(
        record_type: impl Into<String>,
        id: impl Into<String>,
        tenant_id: TenantId,
        content: Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            record_type: record_type.into(),
            id: id.into(),
            tenant_id,
            content,
            version: 1,
            created_at: now,
            last_modified: now,
        }
    }

    /// Returns the record type.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Returns the record's logical ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the owning tenant.
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the record content.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns the version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the record was last modified.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Replaces the whole content, bumping version and timestamp.
    pub(crate) fn replace_content(&mut self, content: Value) {
        self.content = content;
        self.version += 1;
        self.last_modified = Utc::now();
    }

    /// Merges the given fields into the content (shallow, field-level),
    /// bumping version and timestamp.
    ///
    /// Non-object content is promoted to an object first so a field-level
    /// update always lands.
    pub(crate) fn merge_fields(&mut self, fields: &Map<String, Value>) {
        if !self.content.is_object() {
            self.content = Value::Object(Map::new());
        }
        if let Some(object) = self.content.as_object_mut() {
            for (key, value) in fields {
                object.insert(key.clone(), value.clone());
            }
        }
        self.version += 1;
        self.last_modified = Utc::now();
    }
}
