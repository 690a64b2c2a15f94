#![forbid(unsafe_code)]

//! Error types for the binding layer.
//!
//! Missing paths and missing mount points are lookup misses, never errors;
//! the only provider-level failure is using a provider before a store has
//! been configured.

use thiserror::Error;

/// Errors raised by [`StateProvider`](crate::StateProvider) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProvideStateError {
    /// The provider was used before `set_store` configured a store.
    #[error("state provider has no store configured; call set_store before use")]
    StoreNotConfigured,
}
