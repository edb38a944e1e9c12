//! End-to-end tenant isolation properties against the in-memory backend.
//!
//! Covers the contract the engine guarantees to the persistence layer:
//! scoped reads never leak another tenant's records, writes are rejected
//! before any state change when the tenant does not match, and read-side
//! overrides never widen what a write may touch.

use serde_json::json;
use tessera_tenancy::context::{DefaultScopeMode, TenantContext};
use tessera_tenancy::error::{InvalidTenantAccess, MissingTenantError, StoreError};
use tessera_tenancy::store::{MemoryBackend, RecordStorage};
use tessera_tenancy::tenant::TenantId;

fn tenant(id: &str) -> TenantId {
    TenantId::new(id)
}

/// Seeds a `users` record owned by `owner`.
async fn seed_user(backend: &MemoryBackend, owner: &str, id: &str, name: &str) {
    let context = TenantContext::new();
    let _scope = context.enter(tenant(owner));
    backend
        .insert_with_id(&context, "users", id, json!({"name": name}))
        .await
        .expect("failed to seed user");
}

async fn seeded_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    seed_user(&backend, "amazon", "7", "Jeff Bezos").await;
    seed_user(&backend, "amazon", "8", "Andy Jassy").await;
    seed_user(&backend, "facebook", "9", "Mark Zuckerberg").await;
    backend
}

mod read_isolation {
    use super::*;

    #[tokio::test]
    async fn scoped_reads_return_only_the_active_tenants_records() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let _scope = context.enter(tenant("amazon"));
        let records = backend.list(&context, "users").await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.tenant_id() == &tenant("amazon")));
        assert_eq!(backend.count(&context, "users").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn a_foreign_record_is_invisible_by_id() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let _scope = context.enter(tenant("facebook"));
        assert!(backend.find(&context, "users", "7").await.unwrap().is_none());
        assert!(backend.find(&context, "users", "9").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_tenant_fails_closed() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let err = backend.count(&context, "users").await.unwrap_err();
        assert!(matches!(err, StoreError::MissingTenant(MissingTenantError)));
        let err = backend.list(&context, "users").await.unwrap_err();
        assert!(matches!(err, StoreError::MissingTenant(MissingTenantError)));
        let err = backend.find(&context, "users", "7").await.unwrap_err();
        assert!(matches!(err, StoreError::MissingTenant(MissingTenantError)));
    }
}

mod write_guard {
    use super::*;

    #[tokio::test]
    async fn write_without_active_tenant_is_rejected_and_record_unchanged() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let err = backend
            .update(&context, "users", "7", json!({"name": "X"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidAccess(InvalidTenantAccess::NoActiveTenant)
        ));

        let _scope = context.enter(tenant("amazon"));
        let record = backend.find(&context, "users", "7").await.unwrap().unwrap();
        assert_eq!(record.content()["name"], "Jeff Bezos");
        assert_eq!(record.version(), 1);
    }

    #[tokio::test]
    async fn write_under_the_wrong_tenant_is_rejected_and_record_unchanged() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        {
            let _scope = context.enter(tenant("facebook"));
            let err = backend
                .update(&context, "users", "7", json!({"name": "X"}))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                StoreError::InvalidAccess(InvalidTenantAccess::TenantMismatch { .. })
            ));
        }

        let _scope = context.enter(tenant("amazon"));
        let record = backend.find(&context, "users", "7").await.unwrap().unwrap();
        assert_eq!(record.content()["name"], "Jeff Bezos");
        assert_eq!(record.version(), 1);
    }

    #[tokio::test]
    async fn every_mutation_path_is_guarded() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();
        let _scope = context.enter(tenant("facebook"));

        let full = backend
            .update(&context, "users", "7", json!({"name": "X"}))
            .await;
        assert!(matches!(full, Err(StoreError::InvalidAccess(_))));

        let fields = json!({"name": "X"});
        let partial = backend
            .update_fields(&context, "users", "7", fields.as_object().unwrap().clone())
            .await;
        assert!(matches!(partial, Err(StoreError::InvalidAccess(_))));

        let delete = backend.delete(&context, "users", "7").await;
        assert!(matches!(delete, Err(StoreError::InvalidAccess(_))));
    }

    #[tokio::test]
    async fn matching_tenant_update_succeeds_and_is_readable() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let _scope = context.enter(tenant("amazon"));
        let updated = backend
            .update(&context, "users", "7", json!({"name": "X"}))
            .await
            .unwrap();
        assert_eq!(updated.version(), 2);

        let record = backend.find(&context, "users", "7").await.unwrap().unwrap();
        assert_eq!(record.content()["name"], "X");
    }
}

mod nesting {
    use super::*;

    #[tokio::test]
    async fn inner_activation_shadows_and_restores() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            context.activate(tenant("t2"), || {
                assert_eq!(context.current(), Some(tenant("t2")));
            });
            assert_eq!(context.current(), Some(tenant("t1")));
        });
        assert_eq!(context.current(), None);
    }

    #[tokio::test]
    async fn outer_tenant_survives_an_inner_panic() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                context.activate(tenant("t2"), || panic!("handler failed"));
            }))
            .is_err();
            assert!(panicked);
            assert_eq!(context.current(), Some(tenant("t1")));
        });
        assert_eq!(context.current(), None);
    }

    #[tokio::test]
    async fn nested_activation_scopes_storage_reads() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let _outer = context.enter(tenant("amazon"));
        assert_eq!(backend.count(&context, "users").await.unwrap(), 2);
        {
            let _inner = context.enter(tenant("facebook"));
            assert_eq!(backend.count(&context, "users").await.unwrap(), 1);
        }
        assert_eq!(backend.count(&context, "users").await.unwrap(), 2);
    }
}

mod scope_overrides {
    use super::*;

    #[tokio::test]
    async fn disabled_default_scope_unscopes_reads_but_not_writes() {
        let backend = seeded_backend().await;
        let context = TenantContext::with_default_scope_mode(DefaultScopeMode::Disabled);

        // All tenants visible, no tenant required.
        assert_eq!(backend.count(&context, "users").await.unwrap(), 3);
        assert!(backend.find(&context, "users", "9").await.unwrap().is_some());

        // Writes are still guarded.
        let err = backend
            .update(&context, "users", "7", json!({"name": "X"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidAccess(_)));
    }

    #[tokio::test]
    async fn read_across_tenant_permits_reads_but_not_writes() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let _grant = context.enter_read_across_tenant();
        assert_eq!(backend.count(&context, "users").await.unwrap(), 3);

        let err = backend
            .update(&context, "users", "7", json!({"name": "X"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidAccess(InvalidTenantAccess::NoActiveTenant)
        ));
    }

    #[tokio::test]
    async fn guarded_count_versus_read_across_count() {
        let backend = seeded_backend().await;
        let context = TenantContext::new();

        let err = backend.count(&context, "users").await.unwrap_err();
        assert!(matches!(err, StoreError::MissingTenant(_)));

        let count = {
            let _grant = context.enter_read_across_tenant();
            backend.count(&context, "users").await.unwrap()
        };
        assert_eq!(count, 3);

        // The grant does not outlive its scope.
        assert!(backend.count(&context, "users").await.is_err());
    }
}
