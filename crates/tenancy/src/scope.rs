//! Read-path scoping policy.
//!
//! [`ScopePolicy`] decides, immediately before any read against a
//! tenant-owned record type, whether the read must be filtered by the
//! current tenant and whether an unscoped read is currently permitted.
//! The persistence layer consults it on every find/list/count; there is
//! no read path around it.

use crate::context::{DefaultScopeMode, TenantContext};
use crate::error::MissingTenantError;
use crate::tenant::TenantId;

/// The filter a read must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadScope {
    /// Only records owned by this tenant are visible.
    Tenant(TenantId),
    /// All tenants' records are visible.
    Unscoped,
}

impl ReadScope {
    /// Returns `true` if the given owner is visible under this scope.
    pub fn permits(&self, owner: &TenantId) -> bool {
        match self {
            ReadScope::Tenant(tenant) => tenant == owner,
            ReadScope::Unscoped => true,
        }
    }
}

/// Decides the read filter from the context's current state.
///
/// Default-scope-on fails closed: with scoping enforced and no tenant
/// active, reads error instead of silently widening to every tenant.
/// The opt-outs (`Disabled` mode, read-across-tenant) are narrow, scoped,
/// and must be deliberately requested by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopePolicy;

impl ScopePolicy {
    /// Resolves the filter for a read under the given context.
    ///
    /// Decision order:
    /// 1. default scope `Disabled` - unscoped, regardless of other state
    /// 2. a current tenant is active - filter by it
    /// 3. read-across-tenant granted - unscoped
    /// 4. otherwise - [`MissingTenantError`]; the read must not proceed
    pub fn resolve_read_filter(context: &TenantContext) -> Result<ReadScope, MissingTenantError> {
        let snapshot = context.snapshot();

        if snapshot.default_scope == DefaultScopeMode::Disabled {
            return Ok(ReadScope::Unscoped);
        }
        if let Some(current) = snapshot.current {
            return Ok(ReadScope::Tenant(current));
        }
        if snapshot.read_across_tenant {
            return Ok(ReadScope::Unscoped);
        }
        Err(MissingTenantError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id)
    }

    #[test]
    fn test_enforced_with_tenant_filters() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            let scope = ScopePolicy::resolve_read_filter(&context).unwrap();
            assert_eq!(scope, ReadScope::Tenant(tenant("t1")));
        });
    }

    #[test]
    fn test_enforced_without_tenant_fails() {
        let context = TenantContext::new();
        assert_eq!(
            ScopePolicy::resolve_read_filter(&context),
            Err(MissingTenantError)
        );
    }

    #[test]
    fn test_disabled_is_unscoped_regardless() {
        let context = TenantContext::with_default_scope_mode(DefaultScopeMode::Disabled);
        assert_eq!(
            ScopePolicy::resolve_read_filter(&context).unwrap(),
            ReadScope::Unscoped
        );

        // Disabled wins even with a tenant active.
        context.activate(tenant("t1"), || {
            assert_eq!(
                ScopePolicy::resolve_read_filter(&context).unwrap(),
                ReadScope::Unscoped
            );
        });
    }

    #[test]
    fn test_read_across_without_tenant_is_unscoped() {
        let context = TenantContext::new();
        context.with_read_across_tenant(|| {
            assert_eq!(
                ScopePolicy::resolve_read_filter(&context).unwrap(),
                ReadScope::Unscoped
            );
        });
    }

    #[test]
    fn test_current_tenant_precedes_read_across() {
        let context = TenantContext::new();
        context.with_read_across_tenant(|| {
            context.activate(tenant("t1"), || {
                let scope = ScopePolicy::resolve_read_filter(&context).unwrap();
                assert_eq!(scope, ReadScope::Tenant(tenant("t1")));
            });
        });
    }

    #[test]
    fn test_permits() {
        assert!(ReadScope::Unscoped.permits(&tenant("anyone")));
        assert!(ReadScope::Tenant(tenant("t1")).permits(&tenant("t1")));
        assert!(!ReadScope::Tenant(tenant("t1")).permits(&tenant("t2")));
    }
}
