#![forbid(unsafe_code)]

//! Canonical selector paths.
//!
//! A [`Path`] is the normalized form every selector reduces to: an ordered
//! sequence of string segments addressing one location in a nested
//! [`Value`](crate::Value) tree. Paths are backed by [`im::Vector`], so
//! cloning and concatenating share structure instead of copying segment
//! lists around.
//!
//! # Invariants
//!
//! 1. A `Path` is already canonical: normalizing it is the identity.
//! 2. `join` is associative: `a.join(&b).join(&c) == a.join(&b.join(&c))`.
//! 3. Segments are preserved verbatim. Empty segments are legal and
//!    meaningful: the text selector `"a..b"` normalizes to a path whose
//!    middle segment is the empty string.

use core::fmt;

use im::Vector;

/// An ordered sequence of string segments addressing a location in a
/// nested state tree.
///
/// The empty path addresses the tree root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Path {
    segments: Vector<String>,
}

impl Path {
    /// The empty path (addresses the whole tree).
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vector::new(),
        }
    }

    /// Build a path from an ordered sequence of segments.
    ///
    /// ```
    /// # use provide_state_core::Path;
    /// let path = Path::from_segments(["users", "42", "name"]);
    /// assert_eq!(path.len(), 3);
    /// ```
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the empty (root) path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Segment at `index`, if any.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Append one segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push_back(segment.into());
    }

    /// Concatenate two paths, in order. Shares structure with both inputs.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.append(other.segments.clone());
        Self { segments }
    }
}

impl fmt::Display for Path {
    /// Dot-joined rendering, for diagnostics.
    ///
    /// Not injective: the empty path and the path of one empty segment
    /// both render as `""`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in self.iter() {
            if !first {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
