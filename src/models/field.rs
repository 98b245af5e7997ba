//! Loosely-typed input values
//!
//! The NEO and CAD datasets mix empty strings, nulls, numbers and flags in the
//! same columns. A loader hands each cell over as a [`FieldValue`], and the
//! record constructors coerce it into the strict field types.

use serde_json::Value;
use std::fmt;

use crate::{NeoError, Result};

/// A single raw input value as produced by a dataset loader
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing or null cell
    #[default]
    Null,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Text cell, possibly empty
    Text(String),
}

impl FieldValue {
    /// Whether the value counts as "nothing": null, `false`, zero or empty text
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Number(n) => *n == 0.0,
            FieldValue::Text(s) => s.is_empty(),
        }
    }

    /// Coerce to a float, naming `field` in the error if that is impossible
    pub fn to_f64(&self, field: &'static str) -> Result<f64> {
        let invalid = || NeoError::InvalidNumber {
            field,
            value: self.to_string(),
        };

        match self {
            FieldValue::Null => Err(invalid()),
            FieldValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            FieldValue::Number(n) => Ok(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<Value> for FieldValue {
    /// Arrays and objects are kept as their JSON text so they fail numeric coercion
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Text(other.to_string()),
        }
    }
}
