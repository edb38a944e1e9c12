//! Execution-scoped tenant context.
//!
//! This module defines [`TenantContext`], the per-execution-unit holder of
//! the currently active tenant and the scope override flags. One context
//! instance belongs to exactly one logical execution unit (one inbound
//! request, one test, one background job); concurrent units each get their
//! own instance and never observe each other's state.
//!
//! Scoped state changes are stack-disciplined: [`TenantContext::activate`],
//! [`TenantContext::with_read_across_tenant`], and
//! [`TenantContext::with_default_scope`] push the previous value, run the
//! body, and restore on the way out. Restoration is guaranteed on normal
//! return, early return, and panic, because it happens in the drop of a
//! [`ScopeGuard`]. The guard-returning `enter_*` variants serve scopes that
//! must span `await` points, such as the request binder holding an
//! activation open for a whole request.
//!
//! # Examples
//!
//! ```
//! use tessera_tenancy::context::TenantContext;
//! use tessera_tenancy::tenant::TenantId;
//!
//! let context = TenantContext::new();
//! context.activate(TenantId::new("t1"), || {
//!     context.activate(TenantId::new("t2"), || {
//!         assert_eq!(context.current(), Some(TenantId::new("t2")));
//!     });
//!     assert_eq!(context.current(), Some(TenantId::new("t1")));
//! });
//! assert_eq!(context.current(), None);
//! ```

use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

/// Whether reads are filtered by the current tenant by default.
///
/// `Enforced` is the safety default: reads fail closed when no tenant is
/// active. `Disabled` turns off read-side filtering entirely. Neither mode
/// affects the write guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultScopeMode {
    /// Reads are filtered by the current tenant; missing tenant is an error.
    #[default]
    Enforced,
    /// Reads are unscoped; all tenants' records are visible.
    Disabled,
}

impl fmt::Display for DefaultScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultScopeMode::Enforced => write!(f, "enforced"),
            DefaultScopeMode::Disabled => write!(f, "disabled"),
        }
    }
}

impl FromStr for DefaultScopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enforced" => Ok(DefaultScopeMode::Enforced),
            "disabled" => Ok(DefaultScopeMode::Disabled),
            other => Err(format!(
                "invalid scope mode '{other}', expected 'enforced' or 'disabled'"
            )),
        }
    }
}

/// Atomic snapshot of the scope-relevant context state.
///
/// Consumers that need more than one field (the scope policy reads all
/// three) take a snapshot instead of separate accessor calls, so the view
/// is consistent under a single lock acquisition.
#[derive(Debug, Clone)]
pub struct ScopeSnapshot {
    /// The active tenant, or `None`.
    pub current: Option<TenantId>,
    /// The effective default scope mode.
    pub default_scope: DefaultScopeMode,
    /// Whether unscoped reads without a tenant are currently permitted.
    pub read_across_tenant: bool,
}

/// A pushed scope frame: the value shadowed by the matching override.
#[derive(Debug)]
enum Frame {
    Activation { previous: Option<TenantId> },
    ReadAcross { previous: bool },
    DefaultScope { previous: DefaultScopeMode },
}

#[derive(Debug)]
struct Inner {
    current: Option<TenantId>,
    default_scope: DefaultScopeMode,
    read_across_tenant: bool,
    stack: Vec<Frame>,
}

/// Per-execution-unit holder of the active tenant and override flags.
///
/// The context uses interior mutability so it can be shared (via `Arc`)
/// between the request binder, handlers, and the storage layer within one
/// execution unit. It is *not* meant for concurrent mutation from
/// multiple units; overlapping non-nested scopes from concurrent code
/// paths inside one unit are a caller bug (asserted in debug builds).
#[derive(Debug)]
pub struct TenantContext {
    inner: Mutex<Inner>,
}

impl TenantContext {
    /// Creates a context with no active tenant and enforced default scope.
    pub fn new() -> Self {
        Self::with_default_scope_mode(DefaultScopeMode::default())
    }

    /// Creates a context with the given startup default scope mode.
    ///
    /// This is the configuration surface for the process-level default;
    /// the mode remains overridable per block via
    /// [`with_default_scope`](Self::with_default_scope).
    pub fn with_default_scope_mode(mode: DefaultScopeMode) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: None,
                default_scope: mode,
                read_across_tenant: false,
                stack: Vec::new(),
            }),
        }
    }

    /// Returns the active tenant, or `None`. Never mutates.
    pub fn current(&self) -> Option<TenantId> {
        self.inner.lock().current.clone()
    }

    /// Returns the effective default scope mode.
    pub fn default_scope_mode(&self) -> DefaultScopeMode {
        self.inner.lock().default_scope
    }

    /// Returns `true` if unscoped reads without a tenant are permitted.
    pub fn read_across_tenant_allowed(&self) -> bool {
        self.inner.lock().read_across_tenant
    }

    /// Takes a consistent snapshot of the scope-relevant state.
    pub fn snapshot(&self) -> ScopeSnapshot {
        let inner = self.inner.lock();
        ScopeSnapshot {
            current: inner.current.clone(),
            default_scope: inner.default_scope,
            read_across_tenant: inner.read_across_tenant,
        }
    }

    /// Runs `body` with `tenant` as the current tenant.
    ///
    /// The previous tenant is restored when `body` finishes, whether it
    /// returns normally, propagates an error through its return value, or
    /// panics. Activations nest; the inner tenant shadows the outer.
    pub fn activate<R>(&self, tenant: TenantId, body: impl FnOnce() -> R) -> R {
        let _scope = self.enter(tenant);
        body()
    }

    /// Activates `tenant` until the returned guard is dropped.
    ///
    /// Guards must be dropped in LIFO order; use this form only where a
    /// closure cannot express the scope (e.g. across `await`).
    pub fn enter(&self, tenant: TenantId) -> ScopeGuard<'_> {
        let mut inner = self.inner.lock();
        let previous = inner.current.replace(tenant);
        inner.stack.push(Frame::Activation { previous });
        ScopeGuard {
            context: self,
            depth: inner.stack.len(),
        }
    }

    /// Runs `body` with unscoped reads permitted even without a tenant.
    ///
    /// Independent of the current tenant; may be combined with or without
    /// an active activation. The write guard is unaffected.
    pub fn with_read_across_tenant<R>(&self, body: impl FnOnce() -> R) -> R {
        let _scope = self.enter_read_across_tenant();
        body()
    }

    /// Permits read-across-tenant until the returned guard is dropped.
    pub fn enter_read_across_tenant(&self) -> ScopeGuard<'_> {
        let mut inner = self.inner.lock();
        let previous = std::mem::replace(&mut inner.read_across_tenant, true);
        inner.stack.push(Frame::ReadAcross { previous });
        ScopeGuard {
            context: self,
            depth: inner.stack.len(),
        }
    }

    /// Runs `body` under the given default scope mode.
    pub fn with_default_scope<R>(&self, mode: DefaultScopeMode, body: impl FnOnce() -> R) -> R {
        let _scope = self.enter_default_scope(mode);
        body()
    }

    /// Sets the default scope mode until the returned guard is dropped.
    pub fn enter_default_scope(&self, mode: DefaultScopeMode) -> ScopeGuard<'_> {
        let mut inner = self.inner.lock();
        let previous = std::mem::replace(&mut inner.default_scope, mode);
        inner.stack.push(Frame::DefaultScope { previous });
        ScopeGuard {
            context: self,
            depth: inner.stack.len(),
        }
    }

    /// Pops the top frame and restores the value it shadowed.
    fn exit(&self, depth: usize) {
        let mut inner = self.inner.lock();
        debug_assert_eq!(
            inner.stack.len(),
            depth,
            "scope guards dropped out of LIFO order"
        );
        match inner.stack.pop() {
            Some(Frame::Activation { previous }) => inner.current = previous,
            Some(Frame::ReadAcross { previous }) => inner.read_across_tenant = previous,
            Some(Frame::DefaultScope { previous }) => inner.default_scope = previous,
            None => debug_assert!(false, "scope guard dropped on an empty stack"),
        }
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the shadowed context state when dropped.
///
/// Returned by the `enter_*` methods on [`TenantContext`]. Dropping the
/// guard ends the scope; drops must happen in reverse acquisition order.
#[must_use = "the scope ends as soon as this guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    context: &'a TenantContext,
    depth: usize,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.context.exit(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id)
    }

    #[test]
    fn test_fresh_context_is_empty() {
        let context = TenantContext::new();
        assert_eq!(context.current(), None);
        assert_eq!(context.default_scope_mode(), DefaultScopeMode::Enforced);
        assert!(!context.read_across_tenant_allowed());
    }

    #[test]
    fn test_activate_sets_and_restores() {
        let context = TenantContext::new();
        let result = context.activate(tenant("t1"), || {
            assert_eq!(context.current(), Some(tenant("t1")));
            42
        });
        assert_eq!(result, 42);
        assert_eq!(context.current(), None);
    }

    #[test]
    fn test_nesting_inner_shadows_outer() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            context.activate(tenant("t2"), || {
                assert_eq!(context.current(), Some(tenant("t2")));
            });
            assert_eq!(context.current(), Some(tenant("t1")));
        });
        assert_eq!(context.current(), None);
    }

    #[test]
    fn test_restores_after_inner_panic() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                context.activate(tenant("t2"), || panic!("boom"));
            }));
            assert!(result.is_err());
            assert_eq!(context.current(), Some(tenant("t1")));
        });
        assert_eq!(context.current(), None);
    }

    #[test]
    fn test_restores_after_error_return() {
        let context = TenantContext::new();
        let result: Result<(), &str> = context.activate(tenant("t1"), || Err("nope"));
        assert_eq!(result, Err("nope"));
        assert_eq!(context.current(), None);
    }

    #[test]
    fn test_read_across_tenant_scoped() {
        let context = TenantContext::new();
        context.with_read_across_tenant(|| {
            assert!(context.read_across_tenant_allowed());
            // nests; restoring the inner scope keeps the outer grant
            context.with_read_across_tenant(|| {
                assert!(context.read_across_tenant_allowed());
            });
            assert!(context.read_across_tenant_allowed());
        });
        assert!(!context.read_across_tenant_allowed());
    }

    #[test]
    fn test_read_across_independent_of_activation() {
        let context = TenantContext::new();
        context.with_read_across_tenant(|| {
            assert_eq!(context.current(), None);
            context.activate(tenant("t1"), || {
                assert!(context.read_across_tenant_allowed());
                assert_eq!(context.current(), Some(tenant("t1")));
            });
        });
    }

    #[test]
    fn test_default_scope_override_restores() {
        let context = TenantContext::new();
        context.with_default_scope(DefaultScopeMode::Disabled, || {
            assert_eq!(context.default_scope_mode(), DefaultScopeMode::Disabled);
        });
        assert_eq!(context.default_scope_mode(), DefaultScopeMode::Enforced);
    }

    #[test]
    fn test_startup_default_scope_mode() {
        let context = TenantContext::with_default_scope_mode(DefaultScopeMode::Disabled);
        assert_eq!(context.default_scope_mode(), DefaultScopeMode::Disabled);
        context.with_default_scope(DefaultScopeMode::Enforced, || {
            assert_eq!(context.default_scope_mode(), DefaultScopeMode::Enforced);
        });
        assert_eq!(context.default_scope_mode(), DefaultScopeMode::Disabled);
    }

    #[test]
    fn test_guard_form_spans_statements() {
        let context = TenantContext::new();
        {
            let _scope = context.enter(tenant("t1"));
            assert_eq!(context.current(), Some(tenant("t1")));
            let _inner = context.enter_read_across_tenant();
            assert!(context.read_across_tenant_allowed());
        }
        assert_eq!(context.current(), None);
        assert!(!context.read_across_tenant_allowed());
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let context = TenantContext::new();
        context.activate(tenant("t1"), || {
            context.with_read_across_tenant(|| {
                let snap = context.snapshot();
                assert_eq!(snap.current, Some(tenant("t1")));
                assert_eq!(snap.default_scope, DefaultScopeMode::Enforced);
                assert!(snap.read_across_tenant);
            });
        });
    }

    #[test]
    fn test_contexts_are_independent() {
        let a = TenantContext::new();
        let b = TenantContext::new();
        a.activate(tenant("t1"), || {
            assert_eq!(b.current(), None);
        });
    }

    #[test]
    fn test_scope_mode_parse() {
        assert_eq!(
            "enforced".parse::<DefaultScopeMode>().unwrap(),
            DefaultScopeMode::Enforced
        );
        assert_eq!(
            "Disabled".parse::<DefaultScopeMode>().unwrap(),
            DefaultScopeMode::Disabled
        );
        assert!("sometimes".parse::<DefaultScopeMode>().is_err());
    }
}
