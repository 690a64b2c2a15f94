#![forbid(unsafe_code)]

//! The store facade and selection resolver.
//!
//! A [`StateProvider`] scopes the binding layer to one store plus an
//! optional mount point. It is a cheap shared handle: clones see the same
//! configuration, and reconfiguring through any clone (the process-wide
//! provider does this) is visible to all of them.
//!
//! With no mount point the whole store state is the tree selectors resolve
//! against. With a mount point, the tree is the value under that top-level
//! key; a missing mount point is a lookup miss that resolves every binding
//! to absent, never a hard error.

use core::cell::RefCell;
use std::rc::Rc;

use provide_state_core::{ResolvedValues, SelectorMap, Value};

use crate::compose::{BindOptions, Provided, ViewComponent};
use crate::error::ProvideStateError;
use crate::observe;
use crate::store::{Store, Subscription};

struct ProviderInner {
    store: Option<Rc<dyn Store>>,
    mount_point: Option<String>,
}

/// Facade over one store and an optional mount-point key.
///
/// ```ignore
/// let provider = StateProvider::with_mount_point(store, "app");
/// let values = provider.select(&selectors)?;
/// ```
#[derive(Clone)]
pub struct StateProvider {
    inner: Rc<RefCell<ProviderInner>>,
}

impl StateProvider {
    /// Provider over the whole store state.
    #[must_use]
    pub fn new(store: Rc<dyn Store>) -> Self {
        Self::build(Some(store), None)
    }

    /// Provider over the subtree under `mount_point`.
    #[must_use]
    pub fn with_mount_point(store: Rc<dyn Store>, mount_point: impl Into<String>) -> Self {
        Self::build(Some(store), Some(mount_point.into()))
    }

    /// Provider with no store yet. Every operation fails with
    /// [`ProvideStateError::StoreNotConfigured`] until
    /// [`set_store`](Self::set_store) runs. This is how the process-wide
    /// default provider starts life.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::build(None, None)
    }

    fn build(store: Option<Rc<dyn Store>>, mount_point: Option<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ProviderInner { store, mount_point })),
        }
    }

    /// The single reconfiguration entry point: swap in a store (and mount
    /// point) on this provider and every clone of it.
    pub fn set_store(&self, store: Rc<dyn Store>, mount_point: Option<&str>) {
        tracing::debug!(mount_point, "provider store configured");
        let mut inner = self.inner.borrow_mut();
        inner.store = Some(store);
        inner.mount_point = mount_point.map(str::to_owned);
    }

    /// Whether a store has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.borrow().store.is_some()
    }

    /// The configured mount-point key, if any.
    #[must_use]
    pub fn mount_point(&self) -> Option<String> {
        self.inner.borrow().mount_point.clone()
    }

    pub(crate) fn store(&self) -> Result<Rc<dyn Store>, ProvideStateError> {
        self.inner
            .borrow()
            .store
            .clone()
            .ok_or(ProvideStateError::StoreNotConfigured)
    }

    /// The state tree this provider resolves selectors against.
    ///
    /// A configured-but-missing mount point yields `Value::Null`, so every
    /// downstream resolution comes back absent.
    pub fn state(&self) -> Result<Value, ProvideStateError> {
        let store = self.store()?;
        let root = store.state();
        let mount_point = self.inner.borrow().mount_point.clone();
        Ok(match mount_point {
            Some(key) => root.get(&key).cloned().unwrap_or(Value::Null),
            None => root,
        })
    }

    /// Resolve a selector map against the current state tree.
    ///
    /// Every selector is normalized, its fully-scoped path walked, and one
    /// entry produced per binding name. A missing path yields `None` for
    /// that binding, silently.
    pub fn select(&self, selectors: &SelectorMap) -> Result<ResolvedValues, ProvideStateError> {
        let tree = self.state()?;
        Ok(selectors
            .iter()
            .map(|(name, selector)| {
                let path = selector.normalize();
                (name.clone(), tree.get_path(&path).cloned())
            })
            .collect())
    }

    /// Observe a dynamic selector set as the store changes.
    ///
    /// The baseline is resolved immediately; afterwards `on_change` fires
    /// synchronously, exactly once per store notification whose resolved
    /// set differs from the last delivered one, with the full new set.
    pub fn observe(
        &self,
        resolve_bindings: impl Fn() -> SelectorMap + 'static,
        on_change: impl Fn(&ResolvedValues) + 'static,
    ) -> Result<Subscription, ProvideStateError> {
        observe::observe(self, resolve_bindings, on_change)
    }

    /// Wrap a view component so that mounting it binds the declared
    /// selectors to its input props. See [`Provided`].
    #[must_use]
    pub fn provide<C: ViewComponent + 'static>(
        &self,
        component: C,
        options: BindOptions,
    ) -> Provided<C> {
        Provided::new(self.clone(), component, options)
    }

    /// Dispatch an action to the configured store.
    pub fn dispatch(&self, action: Value) -> Result<(), ProvideStateError> {
        self.store()?.dispatch(action);
        Ok(())
    }
}

impl core::fmt::Debug for StateProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StateProvider")
            .field("configured", &inner.store.is_some())
            .field("mount_point", &inner.mount_point)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
