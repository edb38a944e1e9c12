//! Error types for the tenancy engine.
//!
//! Two contract-violation errors are kept strictly apart and never
//! conflated:
//!
//! - [`MissingTenantError`] - read path only: no tenant is resolvable and
//!   no override applies. Recoverable by activating a tenant or opting
//!   into an override; never auto-retried.
//! - [`InvalidTenantAccess`] - write path only: the mutation target's
//!   owning tenant does not match the active context (or no tenant is
//!   active). The mutation must not be committed.
//!
//! Both indicate a missing activation call in the surrounding code or a
//! genuine cross-tenant access attempt, not a transient failure.

// Error variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::tenant::TenantId;

/// The primary error type for storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Read attempted with no resolvable tenant and no override.
    #[error(transparent)]
    MissingTenant(#[from] MissingTenantError),

    /// Write attempted across the tenant boundary.
    #[error(transparent)]
    InvalidAccess(#[from] InvalidTenantAccess),

    /// Record state errors.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Raised from the read path when no current tenant is set, default
/// scoping is enforced, and read-across-tenant has not been granted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("current tenant is missing")]
pub struct MissingTenantError;

/// Raised from the write path when a mutation targets a record the
/// active context may not touch.
///
/// This check has exactly one enforcement mode: it is independent of the
/// default scope mode and of read-across-tenant, so relaxing reads can
/// never widen writes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTenantAccess {
    /// No tenant is active; writes always require one.
    #[error("invalid tenant access: write attempted with no active tenant")]
    NoActiveTenant,

    /// The record belongs to a different tenant than the active one.
    #[error("invalid tenant access: record owned by {record_tenant} but current tenant is {current}")]
    TenantMismatch {
        current: TenantId,
        record_tenant: TenantId,
    },
}

/// Errors related to record state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The requested record was not found (within the active scope).
    #[error("record not found: {record_type}/{id}")]
    NotFound { record_type: String, id: String },

    /// A record with the given ID already exists.
    #[error("record already exists: {record_type}/{id}")]
    AlreadyExists { record_type: String, id: String },
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tenant_display() {
        assert_eq!(MissingTenantError.to_string(), "current tenant is missing");
    }

    #[test]
    fn test_invalid_access_display() {
        let err = InvalidTenantAccess::TenantMismatch {
            current: TenantId::new("facebook"),
            record_tenant: TenantId::new("amazon"),
        };
        assert!(err.to_string().contains("owned by amazon"));
        assert!(err.to_string().contains("current tenant is facebook"));

        let err = InvalidTenantAccess::NoActiveTenant;
        assert!(err.to_string().contains("no active tenant"));
    }

    #[test]
    fn test_record_error_display() {
        let err = RecordError::NotFound {
            record_type: "users".to_string(),
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "record not found: users/7");
    }

    #[test]
    fn test_store_error_kinds_stay_distinct() {
        let read: StoreError = MissingTenantError.into();
        assert!(matches!(read, StoreError::MissingTenant(_)));

        let write: StoreError = InvalidTenantAccess::NoActiveTenant.into();
        assert!(matches!(write, StoreError::InvalidAccess(_)));
    }
}
