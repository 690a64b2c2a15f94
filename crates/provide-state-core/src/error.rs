#![forbid(unsafe_code)]

//! Error types for the core data layer.

use thiserror::Error;

use crate::Value;

/// A value could not be interpreted as a selector.
///
/// Raised synchronously at the dynamic boundary (converting a runtime
/// [`Value`] into a [`Selector`](crate::Selector)), never deferred into
/// resolution. Carries the offending value for diagnostics.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("invalid selector: expected a string or a sequence of segments, got {value:?}")]
pub struct InvalidSelectorError {
    /// The value that could not be interpreted as a selector.
    pub value: Value,
}

impl InvalidSelectorError {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}
