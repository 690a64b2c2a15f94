#![forbid(unsafe_code)]

//! Selector normalization and joining.
//!
//! A [`Selector`] identifies a location in a nested state tree. Three input
//! shapes are accepted, resolved once at the boundary into a tagged sum
//! rather than inspected repeatedly downstream:
//!
//! - [`Selector::Text`]: a dot-delimited string, `"a.b.c"`.
//! - [`Selector::Segments`]: an explicit segment list, `["a", "b", "c"]`.
//! - [`Selector::Canonical`]: an already-normalized [`Path`].
//!
//! # Invariants
//!
//! 1. Normalization is idempotent: `normalize` of an already-canonical
//!    selector returns an equal path.
//! 2. Text splitting preserves empty segments: `"a..b"` normalizes to
//!    `["a", "", "b"]` and `""` normalizes to `[""]`. No trimming, no
//!    filtering.
//! 3. [`join_selectors`] equals normalizing each argument independently and
//!    concatenating in argument order; joining nothing yields the empty
//!    path.
//!
//! # Failure Modes
//!
//! Within the typed API normalization is total. The dynamic boundary is
//! [`Selector::try_from`] on a [`Value`]: anything that is neither a string
//! nor a sequence of string/integer segments fails with
//! [`InvalidSelectorError`], synchronously, carrying the offending value.

use im::HashMap;

use crate::{InvalidSelectorError, Path, Value};

/// A path expression identifying a location within a nested state tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Dot-delimited text, split on `.` during normalization.
    Text(String),
    /// An explicit ordered segment list.
    Segments(Vec<String>),
    /// An already-canonical path; normalization is the identity.
    Canonical(Path),
}

/// Binding name to selector. Insertion order is irrelevant.
pub type SelectorMap = HashMap<String, Selector>;

impl Selector {
    /// Reduce this selector to its canonical [`Path`].
    ///
    /// ```
    /// # use provide_state_core::{Path, Selector};
    /// assert_eq!(
    ///     Selector::from("todos.0.name").normalize(),
    ///     Path::from_segments(["todos", "0", "name"]),
    /// );
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Path {
        match self {
            Self::Text(text) => text.split('.').collect(),
            Self::Segments(segments) => segments.iter().cloned().collect(),
            Self::Canonical(path) => path.clone(),
        }
    }
}

/// Free-function form of [`Selector::normalize`], for callers holding any
/// selector-shaped input.
///
/// ```
/// # use provide_state_core::{normalize_selector, Path};
/// assert_eq!(normalize_selector("a..b"), Path::from_segments(["a", "", "b"]));
/// ```
#[must_use]
pub fn normalize_selector(selector: impl Into<Selector>) -> Path {
    selector.into().normalize()
}

/// Normalize each selector independently and concatenate the resulting
/// paths in argument order.
///
/// ```
/// # use provide_state_core::{join_selectors, Path, Selector};
/// let joined = join_selectors([
///     Selector::from("a.b"),
///     Selector::from(["c", "d"]),
/// ]);
/// assert_eq!(joined, Path::from_segments(["a", "b", "c", "d"]));
/// ```
#[must_use]
pub fn join_selectors<I>(selectors: I) -> Path
where
    I: IntoIterator,
    I::Item: Into<Selector>,
{
    let mut joined = Path::new();
    for selector in selectors {
        joined = joined.join(&selector.into().normalize());
    }
    joined
}

impl From<&str> for Selector {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Selector {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for Selector {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(segments: Vec<&str>) -> Self {
        Self::Segments(segments.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(segments: [&str; N]) -> Self {
        Self::Segments(segments.into_iter().map(str::to_owned).collect())
    }
}

impl From<Path> for Selector {
    fn from(path: Path) -> Self {
        Self::Canonical(path)
    }
}

impl TryFrom<&Value> for Selector {
    type Error = InvalidSelectorError;

    /// The dynamic boundary: interpret a runtime value as a selector.
    ///
    /// Strings become [`Selector::Text`]. Lists become
    /// [`Selector::Segments`] when every element is a string or an integer
    /// (integers take their decimal form, so `["users", 42]` addresses the
    /// key `"42"`). Everything else is rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::List(items) => {
                let mut segments = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(segment) => segments.push(segment.clone()),
                        Value::Int(index) => segments.push(index.to_string()),
                        _ => return Err(InvalidSelectorError::new(value.clone())),
                    }
                }
                Ok(Self::Segments(segments))
            }
            other => Err(InvalidSelectorError::new(other.clone())),
        }
    }
}

impl TryFrom<Value> for Selector {
    type Error = InvalidSelectorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
