//! Persistent JSON document value.
//!
//! [`JsonValue`] mirrors `serde_json::Value`, but containers sit behind an
//! [`Arc`]: cloning a document is cheap and an edit only rebuilds the spine
//! from the root to the edited node. Object members keep their insertion
//! order, so a document carries its own visual key order.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use json_edit_pointer::PathStep;
use serde_json::{Map, Number, Value};

/// Ordered object members.
pub type ObjectMap = IndexMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Arc<Vec<JsonValue>>),
    Object(Arc<ObjectMap>),
}

impl JsonValue {
    /// Parses JSON text.
    pub fn parse(text: &str) -> Result<JsonValue, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(JsonValue::from(value))
    }

    pub fn empty_object() -> JsonValue {
        JsonValue::Object(Arc::new(ObjectMap::new()))
    }

    pub fn empty_array() -> JsonValue {
        JsonValue::Array(Arc::new(Vec::new()))
    }

    pub fn from_map(map: ObjectMap) -> JsonValue {
        JsonValue::Object(Arc::new(map))
    }

    pub fn from_vec(items: Vec<JsonValue>) -> JsonValue {
        JsonValue::Array(Arc::new(items))
    }

    /// Identity test used for change detection.
    ///
    /// Containers are the same only when they share an allocation; scalars
    /// are the same when they are equal.
    pub fn is_same(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (JsonValue::Array(a), JsonValue::Array(b)) => Arc::ptr_eq(a, b),
            (JsonValue::Object(a), JsonValue::Object(b)) => Arc::ptr_eq(a, b),
            (JsonValue::Array(_) | JsonValue::Object(_), _)
            | (_, JsonValue::Array(_) | JsonValue::Object(_)) => false,
            (a, b) => a == b,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The direct child addressed by `step`, if this is a container holding it.
    pub fn child(&self, step: &PathStep) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(step.as_str().as_ref()),
            JsonValue::Array(items) => items.get(step.as_index()?),
            _ => None,
        }
    }

    /// Member keys of an object in enumeration order; empty for anything else.
    pub fn member_keys(&self) -> Vec<String> {
        self.as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => {
                JsonValue::from_vec(items.into_iter().map(JsonValue::from).collect())
            }
            Value::Object(map) => JsonValue::from_map(
                map.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(n.clone()),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::from(&value)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = Value::from(self);
        write!(f, "{value}")
    }
}
