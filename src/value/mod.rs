//! Host values carried through props
//!
//! Render primitives receive loosely-typed values from the tree author:
//! - primitives (null, booleans, numbers, text)
//! - ordered lists and array-likes (length + indexed slots)
//! - lazy iterables, re-iterable or one-shot
//! - plain key-value objects in insertion order
//!
//! Truthiness and collection detection live here so both primitives agree
//! on them.

mod iterable;
#[cfg(feature = "json")]
mod json;

pub use iterable::{ArrayLike, Iterable};

use crate::config::ShapePolicy;
use indexmap::IndexMap;
use std::fmt;

/// Largest array length the host allows
const MAX_ARRAY_LENGTH: f64 = u32::MAX as f64;

/// Plain key-value object (own keys in insertion order)
pub type Object = IndexMap<String, Value>;

/// Loosely-typed host value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null or absent
    #[default]
    Null,

    /// Boolean
    Bool(bool),

    /// Number (IEEE double, like the host)
    Number(f64),

    /// Text
    Text(String),

    /// Ordered array
    List(Vec<Value>),

    /// `length` plus integer-indexed slots
    ArrayLike(ArrayLike),

    /// Lazy sequence
    Iterable(Iterable),

    /// Plain key-value object
    Object(Object),
}

impl Value {
    /// Build a list from anything convertible into values
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an object from `(key, value)` pairs, keeping their order
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Host truthiness
    ///
    /// Falsy: `null`, `false`, `0`, `NaN`, `""`. Everything else is truthy,
    /// including empty lists and empty objects.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::List(_) | Value::ArrayLike(_) | Value::Iterable(_) | Value::Object(_) => true,
        }
    }

    /// Whether this is null/absent
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::List(_) => "array",
            Value::ArrayLike(_) => "array-like",
            Value::Iterable(_) => "iterable",
            Value::Object(_) => "object",
        }
    }

    /// Whether the value is a collection under the given policy
    ///
    /// Lists, array-likes, and iterables always are. Plain objects are only
    /// when the policy detects `length`-bearing objects.
    pub fn is_collection(&self, policy: ShapePolicy) -> bool {
        match self {
            Value::List(_) | Value::ArrayLike(_) | Value::Iterable(_) => true,
            Value::Object(_) => {
                policy.detects_length_objects() && self.array_like_length().is_some()
            }
            _ => false,
        }
    }

    /// `length` of a plain object, if it is a valid host array length
    ///
    /// Valid lengths are integers in `0..=u32::MAX`; anything larger is not
    /// an array-like.
    pub fn array_like_length(&self) -> Option<usize> {
        let Value::Object(object) = self else {
            return None;
        };
        match object.get("length") {
            Some(Value::Number(n))
                if *n >= 0.0 && *n <= MAX_ARRAY_LENGTH && n.fract() == 0.0 =>
            {
                usize::try_from(*n as u32).ok()
            }
            _ => None,
        }
    }

    /// Own property lookup on objects
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Number payload
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Format a number the way the host prints it: integral values without a
/// fractional part, non-finite values by name.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::ArrayLike(_) | Value::Iterable(_) | Value::Object(_) => {
                f.write_str("[object Object]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<ArrayLike> for Value {
    fn from(array_like: ArrayLike) -> Self {
        Value::ArrayLike(array_like)
    }
}

impl From<Iterable> for Value {
    fn from(iterable: Iterable) -> Self {
        Value::Iterable(iterable)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "visualize")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::ArrayLike(array_like) => {
                let mut seq = serializer.serialize_seq(Some(array_like.len()))?;
                for item in array_like.to_vec() {
                    seq.serialize_element(&item)?;
                }
                seq.end()
            }
            // Serializing must not drain a one-shot iterator.
            Value::Iterable(_) => serializer.serialize_str("[iterable]"),
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness_follows_host_rule() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::from(-1).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::List(Vec::new()).is_truthy());
        assert!(Value::Object(Object::new()).is_truthy());
    }

    #[test]
    fn test_length_object_detection_depends_on_policy() {
        let array_like = Value::object([("length", Value::from(2)), ("0", Value::from("A"))]);
        assert!(array_like.is_collection(ShapePolicy::Permissive));
        assert!(!array_like.is_collection(ShapePolicy::Strict));

        let fractional = Value::object([("length", 1.5)]);
        assert_eq!(fractional.array_like_length(), None);
        assert!(!fractional.is_collection(ShapePolicy::Permissive));
    }

    #[test]
    fn test_length_above_host_limit_is_not_array_like() {
        let at_limit = Value::object([("length", f64::from(u32::MAX))]);
        assert_eq!(at_limit.array_like_length(), Some(u32::MAX as usize));

        for length in [f64::from(u32::MAX) + 1.0, 1e300, f64::INFINITY] {
            let oversized = Value::object([("length", length)]);
            assert_eq!(oversized.array_like_length(), None);
            assert!(!oversized.is_collection(ShapePolicy::Permissive));
        }
    }

    #[test]
    fn test_display_matches_host_printing() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::list(["a", "b"]).to_string(), "a,b");
        assert_eq!(Value::object([("x", 1)]).to_string(), "[object Object]");
    }
}
