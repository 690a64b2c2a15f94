#![forbid(unsafe_code)]

//! The process-wide default provider.
//!
//! One unconfigured [`StateProvider`] is created lazily per thread and
//! lives for the rest of the process; [`set_store`] is its single
//! reconfiguration entry point. The free functions here mirror the
//! provider's own surface for module-level ergonomics.
//!
//! Prefer passing a provider instance explicitly; the singleton is an
//! opt-in convenience. Everything in this layer is single-threaded
//! (`Rc`-based), so the default provider is thread-local by construction.

use std::rc::Rc;

use provide_state_core::{ResolvedValues, SelectorMap};

use crate::compose::{BindOptions, Provided, ViewComponent};
use crate::error::ProvideStateError;
use crate::provider::StateProvider;
use crate::store::{Store, Subscription};

thread_local! {
    static GLOBAL_PROVIDER: StateProvider = StateProvider::unconfigured();
}

/// A handle to the default provider, for explicit-passing style.
#[must_use]
pub fn provider() -> StateProvider {
    GLOBAL_PROVIDER.with(Clone::clone)
}

/// Configure (or reconfigure) the default provider's store and mount
/// point. Must run before any other function here is used.
pub fn set_store(store: Rc<dyn Store>, mount_point: Option<&str>) {
    provider().set_store(store, mount_point);
}

/// [`StateProvider::select`] on the default provider.
pub fn select_from_store(selectors: &SelectorMap) -> Result<ResolvedValues, ProvideStateError> {
    provider().select(selectors)
}

/// [`StateProvider::observe`] on the default provider.
pub fn observe(
    resolve_bindings: impl Fn() -> SelectorMap + 'static,
    on_change: impl Fn(&ResolvedValues) + 'static,
) -> Result<Subscription, ProvideStateError> {
    provider().observe(resolve_bindings, on_change)
}

/// [`StateProvider::provide`] on the default provider.
#[must_use]
pub fn provide_state<C: ViewComponent + 'static>(
    component: C,
    options: BindOptions,
) -> Provided<C> {
    provider().provide(component, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
