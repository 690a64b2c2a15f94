#![forbid(unsafe_code)]

//! Selector-based bindings from a global state store to view components,
//! without a tree-propagated context mechanism.
//!
//! A component declares which slices of state it needs as path-like
//! selectors, optionally scoped under a dynamic prefix, and receives those
//! slices as input props. When the relevant slices change, and only then,
//! the component re-renders.
//!
//! The pieces, leaf first:
//!
//! - [`Selector`] / [`Path`] / [`join_selectors`]: selector normalization
//!   and scope joining (re-exported from `provide-state-core`).
//! - [`Store`]: the external state container contract, with the
//!   [`Subscription`] guard for listener registrations.
//! - [`StateProvider`]: the store facade and selection resolver, scoped to
//!   one store plus an optional mount point.
//! - [`StateProvider::observe`]: the change observer, an equality-
//!   suppressed resolve-and-compare loop over the store's notifications.
//! - [`StateProvider::provide`]: the binding composer, wrapping a
//!   [`ViewComponent`] into a [`Provided`] that subscribes on mount,
//!   re-renders on every relevant change, and unsubscribes on unmount.
//! - [`global`]: a process-wide default provider, configured once via
//!   [`global::set_store`].
//!
//! # Usage
//!
//! ```ignore
//! use provide_state::{BindOptions, Props, StateProvider};
//! use std::rc::Rc;
//!
//! let provider = StateProvider::with_mount_point(store, "app");
//!
//! let wrapped = provider.provide(
//!     UserBadge::default(),
//!     BindOptions::new()
//!         .within_from_props(|props| {
//!             Selector::from(vec![
//!                 "users".to_owned(),
//!                 props["user_id"].as_str().unwrap_or_default().to_owned(),
//!             ])
//!         })
//!         .bind("name", "info.name")
//!         .action("rename", |props, args| {
//!             Value::map([
//!                 ("type", Value::from("RENAME_USER")),
//!                 ("user_id", props["user_id"].clone()),
//!                 ("name", args.first().cloned().unwrap_or(Value::Null)),
//!             ])
//!         }),
//! );
//!
//! wrapped.mount(Props::new().update("user_id".into(), Value::from("42")))?;
//! // ... store changes under users.42 re-render UserBadge ...
//! wrapped.unmount();
//! ```

pub mod compose;
pub mod error;
pub mod global;
mod observe;
pub mod provider;
pub mod store;

pub use compose::{
    ActionBuilder, ActionDispatcher, Bind, BindOptions, CHILDREN_PROP, ComponentHandle, Prop,
    Props, Provided, RenderProps, ViewComponent,
};
pub use error::ProvideStateError;
pub use provider::StateProvider;
pub use store::{Listener, Store, Subscription};

pub use provide_state_core::{
    InvalidSelectorError, Path, ResolvedValues, Selector, SelectorMap, Value, join_selectors,
    normalize_selector,
};

#[cfg(any(test, feature = "test-helpers"))]
pub use store::testing::MemoryStore;
