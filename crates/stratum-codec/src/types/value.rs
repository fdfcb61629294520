//! Property and vertex values.
//!
//! This module provides the [`Value`] enum, which represents every value the
//! codec can place in a record slot, whether as a property or as a vertex
//! identity. A property that is null is simply absent from the element's
//! [`Properties`] map; its byte form is supplied by the bound serializer's
//! null sentinel.
//!
//! # Example
//!
//! ```
//! use stratum_codec::Value;
//!
//! let name: Value = "alice".into();
//! let weight: Value = 1.5f64.into();
//! let since: Value = 2016i64.into();
//!
//! assert_eq!(name.as_str(), Some("alice"));
//! assert_eq!(weight.as_float(), Some(1.5));
//! assert_eq!(since.as_int(), Some(2016));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The properties of an element, keyed by property name.
///
/// Insertion order is irrelevant; whenever properties are serialized, the
/// iteration order is the schema's declared order for the element's group.
pub type Properties = HashMap<String, Value>;

/// A value stored on an element, or used as a vertex identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Value {
    /// The variant name, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Get the boolean value, if this is a `Bool`.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer value, if this is an `Int`.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the float value, if this is a `Float`.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the string value, if this is a `String`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the raw bytes, if this is a `Bytes`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_pick_the_expected_variant() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(0.5f64), Value::Float(0.5));
        assert_eq!(Value::from("x"), Value::String("x".to_owned()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
    }

    #[test]
    fn typed_accessors_reject_other_variants() {
        let v = Value::Int(3);
        assert_eq!(v.as_int(), Some(3));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bytes(), None);
        assert_eq!(v.as_float(), None);
    }
}
