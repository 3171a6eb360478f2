//! Runtime values for the loam toolkit.
//!
//! All heap allocations go through factory methods on `Value`. The
//! [`Heap<T>`] wrapper type has a crate-private constructor, so external
//! code cannot create heap values directly:
//!
//! ```text
//! let s = Value::string("hello");             // OK
//! let list = Value::list(vec![]);             // OK
//! let s = Value::Str(Heap::new(...));         // ERROR: Heap::new is private
//! ```
//!
//! Composite values share their allocation on clone and only copy when a
//! mutation path actually reaches them (`Heap::make_mut`), which keeps deep
//! reads and chain plumbing cheap.

mod heap;

use std::collections::HashMap;
use std::fmt;

pub use heap::Heap;

/// A dynamically-typed value: the unit of data every toolkit operation
/// consumes and produces.
///
/// Nested structures are built from `Map` (string-keyed) and `List`
/// containers; everything else is a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent / null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(Heap<String>),
    /// Ordered sequence of values.
    List(Heap<Vec<Value>>),
    /// Mapping from string keys to values.
    Map(Heap<HashMap<String, Value>>),
}

// Factory methods (the only way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: HashMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Create an empty map value.
    #[inline]
    pub fn empty_map() -> Self {
        Value::Map(Heap::new(HashMap::new()))
    }

    /// Create an empty list value.
    #[inline]
    pub fn empty_list() -> Self {
        Value::List(Heap::new(Vec::new()))
    }

    /// Build a map value from key/value pairs.
    ///
    /// ```
    /// use loam_value::Value;
    ///
    /// let v = Value::map_from([("a", Value::Int(1)), ("b", Value::Int(2))]);
    /// assert!(v.as_map().is_some_and(|m| m.len() == 2));
    /// ```
    pub fn map_from<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list value from anything convertible to values.
    pub fn list_from<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::list(items.into_iter().map(Into::into).collect())
    }
}

// Accessors

impl Value {
    /// Whether this value is `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is truthy.
    ///
    /// `Null`, `false`, numeric zero, and empty strings/containers are
    /// falsey; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::Bool(false) => false,
            Value::Bool(true) => true,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
        }
    }

    /// Try to read as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to read as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to read as a float, widening integers.
    #[allow(
        clippy::cast_precision_loss,
        reason = "widening int to float is the documented conversion"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to read as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to read as a list slice.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to read as a map.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(entries: HashMap<String, Value>) -> Self {
        Value::map(entries)
    }
}

/// Renders a stable textual form: strings quoted, lists bracketed, map
/// entries sorted by key. The rendering is deterministic, so it can double
/// as a cache key for memoized calls.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    if let Some(value) = entries.get(*key) {
                        write!(f, "{value}")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}
