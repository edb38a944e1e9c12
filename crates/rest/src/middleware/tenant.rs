//! Tenant binding middleware.
//!
//! Binds every inbound request to a tenant: the request `Host` header is
//! parsed into subdomains and a domain, resolved to an account, and the
//! matched tenant is activated on a fresh per-request [`TenantContext`]
//! for the duration of the request. Downstream handlers reach the
//! binding through the [`CurrentTenant`] extractor.
//!
//! An unresolved host is not rejected here: the request proceeds with no
//! active tenant, and scoped reads then fail closed in the storage
//! layer. Routes that can serve anonymous hosts (health checks, admin
//! surfaces using read-across) keep working.
//!
//! [`CurrentTenant`]: crate::extractors::CurrentTenant

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tessera_tenancy::context::TenantContext;
use tessera_tenancy::store::RecordStorage;
use tessera_tenancy::tenant::Account;
use tracing::debug;

use crate::host::HostParts;
use crate::state::AppState;

/// The per-request tenant binding placed in request extensions.
///
/// Holds the request's own [`TenantContext`] and the account the host
/// resolved to, if any. Cloning shares the same context.
#[derive(Debug, Clone)]
pub struct TenantBinding {
    context: Arc<TenantContext>,
    account: Option<Account>,
}

impl TenantBinding {
    /// Creates a binding for the given context and resolved account.
    pub fn new(context: Arc<TenantContext>, account: Option<Account>) -> Self {
        Self { context, account }
    }

    /// The request's tenant context.
    pub fn context(&self) -> &Arc<TenantContext> {
        &self.context
    }

    /// The account the request host resolved to, if any.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }
}

/// Middleware that resolves and activates the request's tenant.
///
/// Install with `axum::middleware::from_fn_with_state`. The activation
/// is held open across the downstream handler and released when the
/// response is ready, so nothing from one request leaks into the next.
pub async fn bind_tenant<S>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: RecordStorage + 'static,
{
    let context = Arc::new(TenantContext::with_default_scope_mode(
        state.config().default_scope,
    ));

    let account = match request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|host| HostParts::parse(host, state.app_domain()))
    {
        Some(parts) => {
            state
                .resolver()
                .resolve_account(&parts.subdomains, &parts.domain)
                .await
        }
        None => {
            debug!("Request carries no parsable Host header");
            None
        }
    };

    request
        .extensions_mut()
        .insert(TenantBinding::new(Arc::clone(&context), account.clone()));

    match account {
        Some(account) => {
            debug!(tenant_id = %account.id, "Binding request to tenant");
            let _scope = context.enter(account.id.clone());
            next.run(request).await
        }
        None => next.run(request).await,
    }
}
