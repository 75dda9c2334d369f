//! JSON request bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;

/// A JSON request body.
///
/// Object bodies are kept as an ordered list of fields in which a field may
/// be *absent-marked*: present in the body, but without a value. The server
/// does not distinguish "absent" from "cleared", and expects `null` for a
/// clear, so absent-marked fields are sent as explicit `null` rather than
/// left out.
///
/// ```
/// use septotrip::JsonBody;
/// use serde_json::json;
///
/// let body = JsonBody::new().field("name", "Paris").unwrap().absent("description");
/// assert_eq!(body.into_value(), json!({ "name": "Paris", "description": null }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(Repr);

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Fields(Vec<(String, Option<Value>)>),
    Raw(Value),
}

impl JsonBody {
    /// An empty object body.
    pub fn new() -> Self {
        Self(Repr::Fields(Vec::new()))
    }

    /// Serialize `value` into a body. Objects become field lists; anything
    /// else (e.g. an array of ids) is sent as-is.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Add or replace a field.
    pub fn field(self, key: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(key.into(), Some(value)))
    }

    /// Add or replace a field with no value; it is sent as `null`.
    pub fn absent(self, key: impl Into<String>) -> Self {
        self.set(key.into(), None)
    }

    fn set(self, key: String, value: Option<Value>) -> Self {
        let mut fields = match self.0 {
            Repr::Fields(fields) => fields,
            Repr::Raw(Value::Object(map)) => map.into_iter().map(|(k, v)| (k, Some(v))).collect(),
            // a field on a non-object body replaces the body
            Repr::Raw(_) => Vec::new(),
        };

        match fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => fields.push((key, value)),
        }
        Self(Repr::Fields(fields))
    }

    /// The sanitized JSON value to put on the wire.
    pub fn into_value(self) -> Value {
        match self.0 {
            Repr::Fields(fields) => {
                let map: Map<String, Value> = fields
                    .into_iter()
                    .map(|(key, value)| (key, value.unwrap_or(Value::Null)))
                    .collect();
                Value::Object(map)
            }
            Repr::Raw(value) => value,
        }
    }
}

impl Default for JsonBody {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for JsonBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(Repr::Fields(
                map.into_iter().map(|(k, v)| (k, Some(v))).collect(),
            )),
            other => Self(Repr::Raw(other)),
        }
    }
}
