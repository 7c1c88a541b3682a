//! Typed claim values.
//!
//! Claims arrive from the host as dynamically-typed structured values. They are
//! held here as an explicit tagged variant so merge logic never inspects types
//! at runtime, and are converted to the external structured format only once,
//! when the composed set is handed back.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// A claims set: string keys mapped to claim values.
pub type Claims = BTreeMap<String, ClaimValue>;

/// The external structured-value format claims are returned in.
pub type StructuredMap = serde_json::Map<String, Value>;

/// A single claim value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ClaimValue>),
    Map(Claims),
}

/// Errors produced when a claim value has no external representation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SerializationError {
    /// Number that the external format cannot carry (NaN or infinite)
    #[error("claim {path:?} holds unrepresentable number {value}")]
    NonFiniteNumber { path: String, value: f64 },
}

impl ClaimValue {
    /// Convert into the external structured format.
    pub fn to_structured(&self) -> Result<Value, SerializationError> {
        self.to_structured_at("")
    }

    fn to_structured_at(&self, path: &str) -> Result<Value, SerializationError> {
        Ok(match self {
            ClaimValue::Null => Value::Null,
            ClaimValue::Bool(b) => Value::Bool(*b),
            ClaimValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .ok_or_else(|| SerializationError::NonFiniteNumber {
                    path: path.to_string(),
                    value: *n,
                })?,
            ClaimValue::String(s) => Value::String(s.clone()),
            ClaimValue::List(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.to_structured_at(&format!("{}[{}]", path, i)))
                    .collect::<Result<_, _>>()?,
            ),
            ClaimValue::Map(map) => Value::Object(claims_to_structured_at(map, path)?),
        })
    }
}

/// Convert a whole claims set into the external structured format.
pub fn claims_to_structured(claims: &Claims) -> Result<StructuredMap, SerializationError> {
    claims_to_structured_at(claims, "")
}

fn claims_to_structured_at(
    claims: &Claims,
    prefix: &str,
) -> Result<StructuredMap, SerializationError> {
    let mut out = StructuredMap::new();
    for (key, value) in claims {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        out.insert(key.clone(), value.to_structured_at(&path)?);
    }
    Ok(out)
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        ClaimValue::String(s.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        ClaimValue::String(s)
    }
}

impl From<bool> for ClaimValue {
    fn from(b: bool) -> Self {
        ClaimValue::Bool(b)
    }
}

impl From<f64> for ClaimValue {
    fn from(n: f64) -> Self {
        ClaimValue::Number(n)
    }
}

impl From<Claims> for ClaimValue {
    fn from(map: Claims) -> Self {
        ClaimValue::Map(map)
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(items: Vec<ClaimValue>) -> Self {
        ClaimValue::List(items)
    }
}

impl From<Value> for ClaimValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ClaimValue::Null,
            Value::Bool(b) => ClaimValue::Bool(b),
            // Every JSON number widens to f64, matching the external format.
            Value::Number(n) => n.as_f64().map_or(ClaimValue::Null, ClaimValue::Number),
            Value::String(s) => ClaimValue::String(s),
            Value::Array(items) => ClaimValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => ClaimValue::Map(claims_from_structured(map)),
        }
    }
}

/// Lift an externally-formatted map into a typed claims set.
pub fn claims_from_structured(map: StructuredMap) -> Claims {
    map.into_iter().map(|(k, v)| (k, v.into())).collect()
}
