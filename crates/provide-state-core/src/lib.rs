#![forbid(unsafe_code)]

//! Core data layer for `provide-state`: canonical selector paths and the
//! immutable value tree they resolve against.
//!
//! This crate is pure data with no runtime state:
//!
//! - [`Path`]: the canonical selector form (ordered string segments).
//! - [`Selector`]: the three accepted selector shapes, normalized once at
//!   the boundary via [`Selector::normalize`].
//! - [`join_selectors`]: scope-prefix concatenation.
//! - [`Value`]: the persistent nested tree selectors walk, with total
//!   structural equality for change suppression.
//! - [`InvalidSelectorError`]: the only error this layer can raise.
//!
//! The binding layer proper (store facade, change observer, component
//! composition) lives in the `provide-state` crate.

pub mod error;
pub mod path;
pub mod selector;
pub mod value;

pub use error::InvalidSelectorError;
pub use path::Path;
pub use selector::{Selector, SelectorMap, join_selectors, normalize_selector};
pub use value::{ResolvedValues, Value};
