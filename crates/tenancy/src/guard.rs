//! Write-path access guard.
//!
//! [`AccessGuard`] validates, at write time, that a record's owning tenant
//! matches the active tenant. Unlike the read-side [`ScopePolicy`], it has
//! exactly one enforcement mode: the default scope mode and
//! read-across-tenant never relax it. That asymmetry is deliberate - a
//! read override can therefore never be leveraged to corrupt another
//! tenant's data.
//!
//! [`ScopePolicy`]: crate::scope::ScopePolicy

use crate::context::TenantContext;
use crate::error::InvalidTenantAccess;
use crate::tenant::TenantId;

/// Authorizes mutations against a record's owning tenant.
///
/// The persistence layer invokes [`authorize_write`](Self::authorize_write)
/// on every mutation path (insert, full replace, partial update, delete)
/// before any persistence side effect is applied. There is no bypass path.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Authorizes a write to a record owned by `record_tenant`.
    ///
    /// Fails with [`InvalidTenantAccess`] when no tenant is active, even
    /// if reads are globally unscoped or read-across-tenant is allowed,
    /// and when the active tenant does not own the record.
    pub fn authorize_write(
        context: &TenantContext,
        record_tenant: &TenantId,
    ) -> Result<(), InvalidTenantAccess> {
        match context.current() {
            None => Err(InvalidTenantAccess::NoActiveTenant),
            Some(current) if &current != record_tenant => {
                Err(InvalidTenantAccess::TenantMismatch {
                    current,
                    record_tenant: record_tenant.clone(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}
