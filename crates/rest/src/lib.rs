//! # tessera-rest - HTTP request binding for the Tessera tenant engine
//!
//! This crate is the web face of the Tessera multi-tenant record engine.
//! It binds every inbound HTTP request to a tenant resolved from the
//! request `Host` header, activates that tenant on a per-request
//! [`TenantContext`], and exposes record CRUD endpoints whose reads and
//! writes are scoped and guarded by the tenancy layer.
//!
//! ## Features
//!
//! - **Host-based tenant binding**: subdomains under the application
//!   domain and custom apex domains both resolve to tenant accounts
//! - **Per-request isolation**: each request gets its own context; the
//!   activation is released when the response is ready
//! - **Fail-closed reads**: a request from an unresolvable host gets 400
//!   on scoped reads, never another tenant's data
//! - **Guarded writes**: cross-tenant writes are rejected with 403 before
//!   any state change
//! - **Admin read-across**: explicit cross-tenant counts without ever
//!   relaxing the write guard
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_rest::{ServerConfig, create_app};
//! use tessera_tenancy::resolver::TenantResolver;
//! use tessera_tenancy::store::MemoryBackend;
//! use tessera_tenancy::tenant::{Account, InMemoryAccountDirectory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let directory = InMemoryAccountDirectory::new();
//!     directory.register(Account::with_subdomain("amazon", "Amazon", "amazon"));
//!
//!     let resolver = TenantResolver::new(Arc::new(directory));
//!     let app = create_app(MemoryBackend::new(), resolver);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | create | POST | `/records/{type}` |
//! | read | GET | `/records/{type}/{id}` |
//! | list | GET | `/records/{type}` |
//! | count | GET | `/records/{type}/$count` |
//! | update | PUT | `/records/{type}/{id}` |
//! | patch | PATCH | `/records/{type}/{id}` |
//! | delete | DELETE | `/records/{type}/{id}` |
//! | count (read-across) | GET | `/admin/records/{type}/$count` |
//! | current tenant | GET | `/tenant` |
//! | health | GET | `/health` |
//!
//! ## Error Handling
//!
//! Errors are returned as JSON bodies with a machine-readable code:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | missing-tenant | Scoped read with no resolvable tenant |
//! | 400 | bad-request | Malformed request |
//! | 403 | invalid-tenant-access | Write refused by the tenant guard |
//! | 404 | not-found | Record absent or outside the read scope |
//! | 409 | conflict | Record ID already exists |
//! | 500 | internal | Internal server error |
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, resolver, configuration)
//! - [`host`] - `Host` header decomposition
//! - [`middleware`] - Tenant binding middleware
//! - [`extractors`] - The [`CurrentTenant`] accessor for handlers
//! - [`handlers`] - Record, admin, and health handlers
//! - [`error`] - HTTP error mapping
//! - [`routing`] - Route configuration
//!
//! [`TenantContext`]: tessera_tenancy::context::TenantContext
//! [`CurrentTenant`]: extractors::CurrentTenant

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod host;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tessera_tenancy::resolver::TenantResolver;
use tessera_tenancy::store::RecordStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default
/// settings. For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S, resolver: TenantResolver) -> Router
where
    S: RecordStorage + 'static,
{
    create_app_with_config(storage, resolver, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up the routes, the tenant binding middleware, and the configured
/// middleware stack (tracing, timeout, CORS).
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tessera_rest::{ServerConfig, create_app_with_config};
/// use tessera_tenancy::resolver::TenantResolver;
/// use tessera_tenancy::store::MemoryBackend;
/// use tessera_tenancy::tenant::InMemoryAccountDirectory;
///
/// let resolver = TenantResolver::new(Arc::new(InMemoryAccountDirectory::new()));
/// let config = ServerConfig {
///     app_domain: Some("example.com".to_string()),
///     ..Default::default()
/// };
/// let app = create_app_with_config(MemoryBackend::new(), resolver, config);
/// ```
pub fn create_app_with_config<S>(
    storage: S,
    resolver: TenantResolver,
    config: ServerConfig,
) -> Router
where
    S: RecordStorage + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), resolver, config.clone());

    // Build the router and bind tenants before any handler runs
    let router = routing::create_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(state, middleware::bind_tenant::<S>),
    );

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tessera_rest={level},tessera_tenancy={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
