//! Tenant resolution from request host information.
//!
//! [`TenantResolver`] maps an inbound request's host parts - its ordered
//! subdomains and its domain - to a tenant, by consulting an
//! [`AccountDirectory`]. Absence is not an error: the request binder
//! decides whether an unresolved tenant is fatal for the current route.

use std::sync::Arc;

use tracing::debug;

use crate::tenant::{Account, AccountDirectory, TenantId};

/// Resolves host parts to a tenant through an account directory.
///
/// The matching precedence is owned by the directory implementation (see
/// [`AccountDirectory`]); this resolver only defines the request shape
/// and absence handling.
#[derive(Clone)]
pub struct TenantResolver {
    directory: Arc<dyn AccountDirectory>,
}

impl TenantResolver {
    /// Creates a resolver backed by the given directory.
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Resolves the full account for the given host parts, if any.
    pub async fn resolve_account(&self, subdomains: &[String], domain: &str) -> Option<Account> {
        let account = self
            .directory
            .find_by_subdomains_or_domain(subdomains, domain)
            .await;
        match &account {
            Some(account) => {
                debug!(tenant_id = %account.id, domain, "Resolved tenant from host");
            }
            None => {
                debug!(domain, ?subdomains, "No tenant matches host");
            }
        }
        account
    }

    /// Resolves just the tenant identifier for the given host parts.
    pub async fn resolve(&self, subdomains: &[String], domain: &str) -> Option<TenantId> {
        self.resolve_account(subdomains, domain)
            .await
            .map(|account| account.id)
    }
}

impl std::fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantResolver").finish_non_exhaustive()
    }
}
