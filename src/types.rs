//! Common types used throughout the table sink
//!
//! This module contains the dynamic value model handed over by the
//! batch framework, the closed scalar union accepted by the encoder,
//! and small utility types shared across modules.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Dynamic Value
// ============================================================================

/// A runtime-typed value as produced by a reducer
///
/// Maps keep their pairs in source order so that iteration over a record
/// is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,
    /// Raw byte buffer
    Bytes(Bytes),
    /// Signed 8-bit integer
    Byte(i8),
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Length-prefixed sequence
    Vector(Vec<Value>),
    /// Marker-terminated sequence
    List(Vec<Value>),
    /// Ordered key/value pairs
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Name of the runtime type carried by this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bytes(_) => "bytes",
            Value::Byte(_) => "byte",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether this value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a map value from pairs
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Render this value as JSON for display
    ///
    /// Bytes become base64 strings. A map whose keys are distinct strings becomes
    /// an object, any other map becomes an array of `[key, value]` pairs.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bytes(b) => JsonValue::String(STANDARD.encode(b)),
            Value::Byte(v) => JsonValue::from(*v),
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Int(v) => JsonValue::from(*v),
            Value::Long(v) => JsonValue::from(*v),
            Value::Float(v) => JsonValue::from(f64::from(*v)),
            Value::Double(v) => JsonValue::from(*v),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Vector(items) | Value::List(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(pairs) => {
                let mut seen = HashSet::new();
                let unique_string_keys = pairs.iter().all(|(k, _)| match k {
                    Value::String(s) => seen.insert(s.as_str()),
                    _ => false,
                });
                if unique_string_keys {
                    let object = pairs
                        .iter()
                        .filter_map(|(k, v)| match k {
                            Value::String(s) => Some((s.clone(), v.to_json())),
                            _ => None,
                        })
                        .collect();
                    JsonValue::Object(object)
                } else {
                    JsonValue::Array(
                        pairs
                            .iter()
                            .map(|(k, v)| JsonValue::Array(vec![k.to_json(), v.to_json()]))
                            .collect(),
                    )
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(v) => Value::Bool(v),
            Scalar::Int(v) => Value::Int(v),
            Scalar::Long(v) => Value::Long(v),
            Scalar::Float(v) => Value::Float(v),
            Scalar::Double(v) => Value::Double(v),
            Scalar::Text(v) => Value::String(v),
            Scalar::Bytes(v) => Value::Bytes(v),
        }
    }
}

// ============================================================================
// Scalar
// ============================================================================

/// An encodable scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes, written unchanged
    Bytes(Bytes),
}

impl Scalar {
    /// Name of the scalar type
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Long(_) => "long",
            Scalar::Float(_) => "float",
            Scalar::Double(_) => "double",
            Scalar::Text(_) => "string",
            Scalar::Bytes(_) => "bytes",
        }
    }
}

impl TryFrom<Value> for Scalar {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(Scalar::Bool(v)),
            Value::Int(v) => Ok(Scalar::Int(v)),
            Value::Long(v) => Ok(Scalar::Long(v)),
            Value::Float(v) => Ok(Scalar::Float(v)),
            Value::Double(v) => Ok(Scalar::Double(v)),
            Value::String(v) => Ok(Scalar::Text(v)),
            Value::Bytes(v) => Ok(Scalar::Bytes(v)),
            other @ (Value::Null
            | Value::Byte(_)
            | Value::Vector(_)
            | Value::List(_)
            | Value::Map(_)) => Err(Error::unsupported(other.type_name())),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Long(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or only whitespace
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}

impl OptionStringExt for Option<&String> {
    fn none_if_blank(self) -> Option<String> {
        self.cloned().none_if_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_from_value() {
        assert_eq!(
            Scalar::try_from(Value::from("row")).unwrap(),
            Scalar::Text("row".to_string())
        );
        assert_eq!(Scalar::try_from(Value::Long(7)).unwrap(), Scalar::Long(7));
        assert_eq!(
            Scalar::try_from(Value::Bytes(Bytes::from_static(b"\x01"))).unwrap(),
            Scalar::Bytes(Bytes::from_static(b"\x01"))
        );
    }

    #[test]
    fn test_scalar_from_unsupported_value() {
        for value in [
            Value::Byte(1),
            Value::Null,
            Value::Vector(vec![]),
            Value::List(vec![]),
            Value::map([("a", "b")]),
        ] {
            let name = value.type_name();
            match Scalar::try_from(value) {
                Err(Error::UnsupportedScalarType { type_name }) => assert_eq!(type_name, name),
                other => panic!("Expected UnsupportedScalarType, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_value_to_json() {
        let value = Value::map([("cf", Value::map([("q", Value::Long(3))]))]);
        assert_eq!(value.to_json(), json!({"cf": {"q": 3}}));

        let value = Value::map([(Value::Int(1), Value::Bool(true))]);
        assert_eq!(value.to_json(), json!([[1, true]]));

        let value = Value::Bytes(Bytes::from_static(b"hi"));
        assert_eq!(value.to_json(), json!("aGk="));
    }

    #[test]
    fn test_value_to_json_keeps_repeated_keys() {
        let value = Value::map([("q", 1_i64), ("q", 2_i64)]);
        assert_eq!(value.to_json(), json!([["q", 1], ["q", 2]]));
    }

    #[test]
    fn test_option_string_none_if_blank() {
        assert_eq!(
            Some("test".to_string()).none_if_blank(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_blank(), None);
        assert_eq!(Some("  ".to_string()).none_if_blank(), None);
        assert_eq!(None::<String>.none_if_blank(), None);
    }
}
