//! Route configuration.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tessera_tenancy::store::RecordStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all REST API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /tenant` - The request's resolved tenant account
///
/// ## Records
/// - `POST /records/{type}` - Create
/// - `GET /records/{type}` - List (tenant-scoped)
/// - `GET /records/{type}/$count` - Count (tenant-scoped)
/// - `GET /records/{type}/{id}` - Read
/// - `PUT /records/{type}/{id}` - Update
/// - `PATCH /records/{type}/{id}` - Field-level update
/// - `DELETE /records/{type}/{id}` - Delete
///
/// ## Admin
/// - `GET /admin/records/{type}/$count` - Count with read-across
///   (spans all tenants when the host binds none)
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RecordStorage + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/tenant", get(handlers::current_tenant_handler))
        // Record routes
        .route("/records/{record_type}", post(handlers::create_record::<S>))
        .route("/records/{record_type}", get(handlers::list_records::<S>))
        .route(
            "/records/{record_type}/$count",
            get(handlers::count_records::<S>),
        )
        .route(
            "/records/{record_type}/{id}",
            get(handlers::read_record::<S>),
        )
        .route(
            "/records/{record_type}/{id}",
            put(handlers::update_record::<S>),
        )
        .route(
            "/records/{record_type}/{id}",
            patch(handlers::patch_record::<S>),
        )
        .route(
            "/records/{record_type}/{id}",
            delete(handlers::delete_record::<S>),
        )
        // Admin routes
        .route(
            "/admin/records/{record_type}/$count",
            get(handlers::count_all_records::<S>),
        )
        // State
        .with_state(state)
}
