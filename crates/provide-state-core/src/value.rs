#![forbid(unsafe_code)]

//! The immutable state value tree.
//!
//! [`Value`] is the nested associative/sequence structure selectors resolve
//! against. Collections are persistent ([`im::HashMap`], [`im::Vector`]), so
//! a snapshot clones in O(1) and "mutation" always means building a new
//! snapshot; nothing in this module mutates a tree in place.
//!
//! # Equality
//!
//! Structural equality is total over all tree shapes:
//!
//! - `Float` comparison treats `NaN` as equal to `NaN` (SameValueZero).
//!   Change suppression must not treat a NaN-bearing snapshot as forever
//!   different from itself.
//! - `Int` and `Float` are distinct variants and never cross-equal:
//!   `Value::from(1) != Value::from(1.0)`.
//! - Map comparison is key-order-insensitive; list comparison is ordered.
//!
//! Cycles are unrepresentable: a `Value` owns its children outright, with no
//! shared-mutable references inside the tree, so recursive equality always
//! terminates.

use im::{HashMap, Vector};

use crate::Path;

/// A node in the immutable state tree.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vector<Value>),
    Map(HashMap<String, Value>),
}

/// A resolved value set: binding name to the value found at that binding's
/// fully-scoped path. `None` is the absent value (the path was missing),
/// which is distinct from `Some(Value::Null)`.
pub type ResolvedValues = HashMap<String, Option<Value>>;

impl Value {
    /// Build a map value from `(key, value)` entries.
    ///
    /// ```
    /// # use provide_state_core::Value;
    /// let tree = Value::map([("a", Value::from(1))]);
    /// assert_eq!(tree.get("a"), Some(&Value::from(1)));
    /// ```
    #[must_use]
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Build a list value from items.
    #[must_use]
    pub fn list<T, I>(items: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Child addressed by one segment.
    ///
    /// Maps look the segment up as a key. Lists parse the segment as a
    /// decimal index, so `"0"` addresses the first element; a non-numeric
    /// segment over a list is absent. Scalars have no children.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(segment),
            Self::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Walk the tree along `path`.
    ///
    /// Returns `None` as soon as any intermediate segment is missing; a
    /// missing path is a lookup miss, never an error. The empty path
    /// resolves to the tree itself.
    #[must_use]
    pub fn get_path(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for segment in path.iter() {
            current = current.get(segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // SameValueZero: NaN equals NaN, so suppression stays stable.
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vector<Value>> for Value {
    fn from(items: Vector<Value>) -> Self {
        Self::List(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

// ---------------------------------------------------------------------------
// serde_json interop (feature = "json")
// ---------------------------------------------------------------------------

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    // u64 beyond i64::MAX and all fractional numbers.
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "json")]
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(n) => Self::from(n),
            // Non-finite floats have no JSON form and become null.
            Value::Float(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Map(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
