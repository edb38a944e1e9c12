//! Account model and lookup collaborator.
//!
//! An [`Account`] is the externally managed record behind a tenant: the
//! tenant identifier plus the domain/subdomain strings used to resolve
//! inbound requests to it. This crate only reads accounts; provisioning
//! and lifecycle belong to the host application.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::id::TenantId;

/// An account that owns a tenant's data partition.
///
/// Resolution matches either the account's `subdomain` under the
/// application domain (`acme` for `acme.example.com`) or its custom apex
/// `domain` (`acme-corp.com`). Either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The tenant identifier this account owns.
    pub id: TenantId,
    /// Human-readable account name.
    pub name: String,
    /// Subdomain under the application domain, if any.
    #[serde(default)]
    pub subdomain: Option<String>,
    /// Custom apex domain, if any.
    #[serde(default)]
    pub domain: Option<String>,
}

impl Account {
    /// Creates an account reachable via a subdomain of the app domain.
    pub fn with_subdomain(
        id: impl Into<TenantId>,
        name: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subdomain: Some(subdomain.into()),
            domain: None,
        }
    }

    /// Creates an account reachable via a custom apex domain.
    pub fn with_domain(
        id: impl Into<TenantId>,
        name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subdomain: None,
            domain: Some(domain.into()),
        }
    }
}

/// Lookup collaborator mapping host parts to an account.
///
/// Implementations own the matching policy. The bundled
/// [`InMemoryAccountDirectory`] applies this precedence:
///
/// 1. the first request subdomain (in order) with an exact
///    account-subdomain match,
/// 2. otherwise an account whose custom `domain` equals the request
///    domain,
/// 3. otherwise no match.
///
/// Among accounts that match the same rule, the first registered wins.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Finds the account for the given ordered subdomains and domain.
    ///
    /// Returns `None` when nothing matches; lookup failure is not an
    /// error here, callers decide whether an absent tenant is fatal.
    async fn find_by_subdomains_or_domain(
        &self,
        subdomains: &[String],
        domain: &str,
    ) -> Option<Account>;
}

/// In-memory account directory.
///
/// Suitable for tests and for deployments that seed accounts at startup
/// (e.g. from a JSON file). Registration order is lookup precedence
/// order within each matching rule.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts.into_iter().collect()),
        }
    }

    /// Registers an account.
    pub fn register(&self, account: Account) {
        self.accounts.write().push(account);
    }

    /// Returns the number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Returns `true` if no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_subdomains_or_domain(
        &self,
        subdomains: &[String],
        domain: &str,
    ) -> Option<Account> {
        let accounts = self.accounts.read();

        // Subdomain matches take precedence, in request order.
        for sub in subdomains {
            if let Some(account) = accounts
                .iter()
                .find(|a| a.subdomain.as_deref() == Some(sub.as_str()))
            {
                return Some(account.clone());
            }
        }

        accounts
            .iter()
            .find(|a| a.domain.as_deref() == Some(domain))
            .cloned()
    }
}
