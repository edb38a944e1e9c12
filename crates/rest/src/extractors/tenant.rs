//! Current tenant extractor.
//!
//! Gives handlers read-only access to the request's tenant binding: the
//! per-request [`TenantContext`] and the resolved account. This is the
//! one sanctioned way to ask "who is the tenant for this request" from
//! handler code.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tessera_tenancy::context::TenantContext;
use tessera_tenancy::tenant::{Account, TenantId};

use crate::error::RestError;
use crate::middleware::TenantBinding;

/// Axum extractor for the request's tenant binding.
///
/// Requires the [`bind_tenant`] middleware to be installed; extraction
/// fails with a 500 otherwise, since that is a wiring bug rather than a
/// client error.
///
/// # Example
///
/// ```rust,ignore
/// use tessera_rest::extractors::CurrentTenant;
///
/// async fn handler(tenant: CurrentTenant) {
///     if let Some(account) = tenant.current_tenant_account() {
///         println!("Serving {}", account.name);
///     }
/// }
/// ```
///
/// [`bind_tenant`]: crate::middleware::bind_tenant
#[derive(Debug, Clone)]
pub struct CurrentTenant {
    binding: TenantBinding,
}

impl CurrentTenant {
    /// The account the request host resolved to, if any.
    ///
    /// This reflects the request binding only. It does not change when
    /// handler code nests a different tenant activation on the context.
    pub fn current_tenant_account(&self) -> Option<&Account> {
        self.binding.account()
    }

    /// The identifier of the bound tenant, if any.
    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.binding.account().map(|account| &account.id)
    }

    /// The request's tenant context, for passing to storage operations.
    pub fn context(&self) -> &Arc<TenantContext> {
        self.binding.context()
    }
}

impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let binding =
            parts
                .extensions
                .get::<TenantBinding>()
                .cloned()
                .ok_or_else(|| RestError::Internal {
                    message: "tenant binding middleware is not installed".to_string(),
                })?;
        Ok(CurrentTenant { binding })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_for(account: Option<Account>) -> CurrentTenant {
        let context = Arc::new(TenantContext::new());
        CurrentTenant {
            binding: TenantBinding::new(context, account),
        }
    }

    #[test]
    fn test_bound_account_is_visible() {
        let account = Account::with_subdomain("amazon", "Amazon", "amazon");
        let tenant = binding_for(Some(account.clone()));
        assert_eq!(tenant.current_tenant_account(), Some(&account));
        assert_eq!(tenant.tenant_id(), Some(&TenantId::new("amazon")));
    }

    #[test]
    fn test_unbound_request_has_no_account() {
        let tenant = binding_for(None);
        assert_eq!(tenant.current_tenant_account(), None);
        assert_eq!(tenant.tenant_id(), None);
    }

    #[test]
    fn test_accessor_is_fixed_under_nested_activation() {
        let account = Account::with_subdomain("amazon", "Amazon", "amazon");
        let tenant = binding_for(Some(account.clone()));

        let _outer = tenant.context().enter(TenantId::new("amazon"));
        {
            let _inner = tenant.context().enter(TenantId::new("facebook"));
            // The context current moved, the binding did not.
            assert_eq!(tenant.context().current(), Some(TenantId::new("facebook")));
            assert_eq!(tenant.current_tenant_account(), Some(&account));
        }
    }
}
