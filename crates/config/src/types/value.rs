//! Store values: scalars plus opaque, reference-counted composites.
//!
//! Invariants:
//! - Cloning a [`Value::Opaque`] clones the handle, never the payload, so a
//!   value read back from the store is the same object that was stored.
//! - Opaque values compare by identity.

use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::scalar::Scalar;

/// Shared handle to an arbitrary value stored in a [`ConfigStore`](crate::ConfigStore).
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn Any + Send + Sync>);

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an existing shared handle without re-allocating.
    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        Self(value)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &OpaqueValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn as_json(&self) -> Option<&serde_json::Value> {
        self.downcast_ref::<serde_json::Value>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_json() {
            Some(json) => f.debug_tuple("OpaqueValue").field(json).finish(),
            None => f.write_str("OpaqueValue(..)"),
        }
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A value held by the configuration store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Opaque(OpaqueValue),
}

impl Value {
    /// Box an arbitrary value as [`Value::Opaque`].
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the payload of an opaque value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(opaque) => opaque.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::Opaque(opaque) => match opaque.as_json() {
                Some(json) => write!(f, "{}", json),
                None => f.write_str("<opaque>"),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Opaque(opaque) => match opaque.as_json() {
                Some(json) => json.serialize(serializer),
                None => serializer.serialize_str("<opaque>"),
            },
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(i) => Value::Int(i),
            Scalar::Float(x) => Value::Float(x),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// JSON scalars become scalar values; arrays and objects are kept whole
/// behind an opaque handle.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            composite => Value::opaque(composite),
        }
    }
}

impl From<OpaqueValue> for Value {
    fn from(value: OpaqueValue) -> Self {
        Value::Opaque(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
