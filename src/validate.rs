//! Structural validation of response payloads.
//!
//! Every output model is a serde type whose required fields are plain
//! fields and whose optional fields are `Option`s with `#[serde(default)]`.
//! Checking a payload against a model therefore means: all required keys
//! present with the right JSON type, optional keys type-checked only when
//! present, unknown keys ignored. `Vec<T>` is the array form and requires
//! every element to pass.
//!
//! There is no coercion: `"7"` does not pass for a number, and a payload
//! that fails never reaches the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Decode `value` as `T`, or fail with [`Error::Decode`] carrying the raw
/// payload.
///
/// ```
/// use septotrip::models::Trip;
/// use septotrip::validate;
/// use serde_json::json;
///
/// let err = validate::decode::<Trip>(json!({ "id": "1" })).unwrap_err();
/// assert!(matches!(err, septotrip::Error::Decode { .. }));
/// ```
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    match T::deserialize(&value) {
        Ok(decoded) => Ok(decoded),
        Err(source) => {
            tracing::debug!(expected = std::any::type_name::<T>(), "payload rejected");
            Err(Error::Decode {
                expected: std::any::type_name::<T>(),
                payload: value,
                source,
            })
        }
    }
}

/// Whether `value` structurally matches `T`.
pub fn matches<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}
