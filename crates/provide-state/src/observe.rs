#![forbid(unsafe_code)]

//! The change observer: a resolve-and-compare loop over a store
//! subscription.
//!
//! Observation wraps a provider's resolver in equality-based suppression:
//! on every store notification the selector set is recomputed (it may
//! depend on external mutable inputs, so it is re-resolved from scratch
//! each time), resolved against the current tree, and deep-compared
//! against the last delivered set. Only a genuine delta reaches the
//! callback.
//!
//! # Invariants
//!
//! 1. The baseline is established at `observe` time, before any store
//!    notification; the callback never fires for the initial resolution.
//! 2. Per notification, the callback fires at most once, synchronously,
//!    with exactly the new resolved set; the baseline is replaced before
//!    the callback runs.
//! 3. An unchanged resolved set never reaches the callback, no matter how
//!    many notifications fire.
//! 4. Notifications are handled in store delivery order; this layer adds
//!    no reordering or batching.
//! 5. No observer state is borrowed across the callback, so a re-entrant
//!    store mutation from inside the callback follows the store's own
//!    synchronous notification semantics, unguarded.
//!
//! # Failure Modes
//!
//! - A panic in the selector-set closure or in comparison propagates out
//!   of the triggering notification; the baseline is left untouched.
//! - A provider whose store is unconfigured fails `observe` up front. If
//!   the store is swapped out from under a live observer, that
//!   notification is dropped with a warning rather than a stale delivery.

use core::cell::RefCell;
use std::rc::Rc;

use provide_state_core::{ResolvedValues, SelectorMap};

use crate::error::ProvideStateError;
use crate::provider::StateProvider;
use crate::store::{Listener, Subscription};

pub(crate) fn observe(
    provider: &StateProvider,
    resolve_bindings: impl Fn() -> SelectorMap + 'static,
    on_change: impl Fn(&ResolvedValues) + 'static,
) -> Result<Subscription, ProvideStateError> {
    let store = provider.store()?;
    let baseline = RefCell::new(provider.select(&resolve_bindings())?);
    tracing::debug!(
        bindings = baseline.borrow().len(),
        "observer baseline established"
    );

    let provider = provider.clone();
    let listener: Listener = Rc::new(move || {
        let next = match provider.select(&resolve_bindings()) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(%error, "dropping store notification");
                return;
            }
        };

        let changed = *baseline.borrow() != next;
        if changed {
            tracing::trace!(bindings = next.len(), "observer delivering change");
            *baseline.borrow_mut() = next.clone();
            on_change(&next);
        } else {
            tracing::trace!("observer suppressed unchanged values");
        }
    });

    Ok(store.subscribe(listener))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
