//! Application state for the REST API.
//!
//! This module defines the shared application state that is available to
//! all request handlers: the storage backend, the tenant resolver, and
//! the server configuration.

use std::sync::Arc;

use tessera_tenancy::resolver::TenantResolver;
use tessera_tenancy::store::RecordStorage;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RecordStorage`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tessera_rest::{AppState, ServerConfig};
/// use tessera_tenancy::resolver::TenantResolver;
/// use tessera_tenancy::store::MemoryBackend;
/// use tessera_tenancy::tenant::InMemoryAccountDirectory;
///
/// let directory = Arc::new(InMemoryAccountDirectory::new());
/// let resolver = TenantResolver::new(directory);
/// let state = AppState::new(
///     Arc::new(MemoryBackend::new()),
///     resolver,
///     ServerConfig::default(),
/// );
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Resolves request hosts to tenant accounts.
    resolver: TenantResolver,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            resolver: self.resolver.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecordStorage> AppState<S> {
    /// Creates a new AppState with the given storage, resolver, and
    /// configuration.
    pub fn new(storage: Arc<S>, resolver: TenantResolver, config: ServerConfig) -> Self {
        Self {
            storage,
            resolver,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the tenant resolver.
    pub fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the configured application domain, if any.
    pub fn app_domain(&self) -> Option<&str> {
        self.config.app_domain.as_deref()
    }
}
