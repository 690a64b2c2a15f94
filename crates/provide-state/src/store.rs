#![forbid(unsafe_code)]

//! The store contract and the subscription guard.
//!
//! The store itself is an external collaborator: this layer only needs a
//! state snapshot, synchronous change notification, and an action sink.
//! Providers hold stores behind `Rc<dyn Store>`; one store may back any
//! number of providers and observers concurrently, each with its own
//! listener registration.
//!
//! # Invariants
//!
//! 1. Listeners take no arguments and are invoked synchronously after
//!    every state transition, in registration order.
//! 2. [`Subscription::unsubscribe`] is idempotent: the second and later
//!    calls are no-ops, and no callback fires after the first call.
//! 3. Dropping a [`Subscription`] releases the registration exactly as an
//!    explicit `unsubscribe` would.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use provide_state_core::Value;

/// A store change listener. Receives no arguments; reads fresh state from
/// the store it subscribed to.
pub type Listener = Rc<dyn Fn()>;

/// The external state container this layer binds against.
pub trait Store {
    /// Current state tree snapshot.
    fn state(&self) -> Value;

    /// Register `listener` to run after every state transition. The
    /// returned guard owns the registration.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Feed an action into the store. Called by composed action props at
    /// invocation time; this layer never interprets actions.
    fn dispatch(&self, action: Value);
}

/// Owns one listener registration on a store.
///
/// Cancellation runs at most once, on the first of either an explicit
/// [`unsubscribe`](Self::unsubscribe) call or drop.
pub struct Subscription {
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    /// Wrap the store-side cancellation routine.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: RefCell::new(Some(Box::new(cancel))),
        }
    }

    /// Release the registration. Safe to call any number of times; only
    /// the first call runs the cancellation.
    pub fn unsubscribe(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether the registration is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.borrow().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Test doubles (feature = "test-helpers")
// ---------------------------------------------------------------------------

/// In-memory store for tests and examples.
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing {
    //! A minimal single-threaded [`Store`] implementation.
    //!
    //! Not a state-management framework: just enough store to exercise the
    //! binding layer. Supports seeding state, replacing it (with
    //! notification), notifying without a change (exercises suppression),
    //! an optional reducer applied on dispatch, and a log of every
    //! dispatched action.

    use super::{Listener, Store, Subscription};
    use core::cell::RefCell;
    use std::rc::Rc;

    use provide_state_core::Value;

    type Reducer = Box<dyn Fn(&Value, &Value) -> Value>;

    struct MemoryStoreInner {
        state: Value,
        listeners: Vec<(u64, Listener)>,
        next_listener_id: u64,
        dispatched: Vec<Value>,
        reducer: Option<Reducer>,
    }

    /// A shareable in-memory store. Cloning shares the same state.
    #[derive(Clone)]
    pub struct MemoryStore {
        inner: Rc<RefCell<MemoryStoreInner>>,
    }

    impl MemoryStore {
        /// Store seeded with `state`; dispatch records actions but leaves
        /// the state untouched.
        #[must_use]
        pub fn new(state: Value) -> Self {
            Self {
                inner: Rc::new(RefCell::new(MemoryStoreInner {
                    state,
                    listeners: Vec::new(),
                    next_listener_id: 0,
                    dispatched: Vec::new(),
                    reducer: None,
                })),
            }
        }

        /// Store seeded with `state` and a reducer applied on dispatch.
        #[must_use]
        pub fn with_reducer(
            state: Value,
            reducer: impl Fn(&Value, &Value) -> Value + 'static,
        ) -> Self {
            let store = Self::new(state);
            store.inner.borrow_mut().reducer = Some(Box::new(reducer));
            store
        }

        /// Replace the state snapshot and notify all listeners.
        pub fn replace_state(&self, state: Value) {
            self.inner.borrow_mut().state = state;
            self.notify();
        }

        /// Notify all listeners without changing state. Real stores do
        /// this whenever a transition leaves a watched slice untouched.
        pub fn notify(&self) {
            let listeners: Vec<Listener> = self
                .inner
                .borrow()
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in listeners {
                listener();
            }
        }

        /// Every action dispatched so far, in order.
        #[must_use]
        pub fn dispatched(&self) -> Vec<Value> {
            self.inner.borrow().dispatched.clone()
        }

        /// Number of live listener registrations.
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.inner.borrow().listeners.len()
        }
    }

    impl Store for MemoryStore {
        fn state(&self) -> Value {
            self.inner.borrow().state.clone()
        }

        fn subscribe(&self, listener: Listener) -> Subscription {
            let id = {
                let mut inner = self.inner.borrow_mut();
                let id = inner.next_listener_id;
                inner.next_listener_id += 1;
                inner.listeners.push((id, listener));
                id
            };
            let weak = Rc::downgrade(&self.inner);
            Subscription::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .borrow_mut()
                        .listeners
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })
        }

        fn dispatch(&self, action: Value) {
            {
                let mut inner = self.inner.borrow_mut();
                inner.dispatched.push(action.clone());
                if let Some(reducer) = inner.reducer.take() {
                    let next = reducer(&inner.state, &action);
                    inner.state = next;
                    inner.reducer = Some(reducer);
                }
            }
            // Redux semantics: listeners run after every dispatch, even
            // when the reduced state is unchanged.
            self.notify();
        }
    }

    impl core::fmt::Debug for MemoryStore {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            let inner = self.inner.borrow();
            f.debug_struct("MemoryStore")
                .field("listeners", &inner.listeners.len())
                .field("dispatched", &inner.dispatched.len())
                .finish()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use core::cell::Cell;
    use provide_state_core::Value;

    #[test]
    fn unsubscribe_is_idempotent() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        assert!(subscription.is_active());
        subscription.unsubscribe();
        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn drop_cancels_once() {
        let calls = Rc::new(Cell::new(0u32));
        {
            let counter = Rc::clone(&calls);
            let subscription = Subscription::new(move || counter.set(counter.get() + 1));
            subscription.unsubscribe();
        }
        // Drop after an explicit unsubscribe must not cancel again.
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn memory_store_notifies_subscribers() {
        let store = MemoryStore::new(Value::map([("n", Value::from(1))]));
        let seen = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&seen);
        let _subscription = store.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        store.replace_state(Value::map([("n", Value::from(2))]));
        store.notify();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn memory_store_subscription_drop_removes_listener() {
        let store = MemoryStore::new(Value::Null);
        let seen = Rc::new(Cell::new(0u32));
        {
            let counter = Rc::clone(&seen);
            let _subscription = store.subscribe(Rc::new(move || counter.set(counter.get() + 1)));
            store.notify();
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
        store.notify();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn memory_store_reducer_and_log() {
        let store = MemoryStore::with_reducer(Value::from(0), |state, action| {
            match (state.as_int(), action.as_str()) {
                (Some(n), Some("increment")) => Value::from(n + 1),
                _ => state.clone(),
            }
        });

        store.dispatch(Value::from("increment"));
        store.dispatch(Value::from("increment"));
        assert_eq!(store.state(), Value::from(2));
        assert_eq!(store.dispatched().len(), 2);
    }

    #[test]
    fn memory_store_dispatch_notifies_even_without_change() {
        let store = MemoryStore::new(Value::from(0));
        let seen = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&seen);
        let _subscription = store.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        store.dispatch(Value::from("noop"));
        assert_eq!(seen.get(), 1);
    }
}
