//! Value objects that expose an underlying primitive.
//!
//! A field serialized through [`serialize`] is projected as a single-entry
//! object carrying either the primitive or the accessor's error message.
//! The `valuer_conv` option and keyed alignment unwrap it; an error surfaces as
//! `CmpError::ValuerFailed` at that point rather than during projection.

use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

use crate::utils::config::{VALUE_ERROR_TAG, VALUE_TAG};

/// Capability of producing an underlying primitive representation
pub trait Valuer {
    type Error: fmt::Display;

    fn value(&self) -> Result<Value, Self::Error>;
}

/// `serialize_with` adapter for value-object fields
///
/// # Example
/// ```ignore
/// #[derive(Serialize)]
/// struct Order {
///     #[serde(serialize_with = "fieldcmp::valuer::serialize")]
///     amount: Money,
/// }
/// ```
pub fn serialize<V, S>(valuer: &V, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Valuer,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(1))?;
    match valuer.value() {
        Ok(value) => map.serialize_entry(VALUE_TAG, &value)?,
        Err(err) => map.serialize_entry(VALUE_ERROR_TAG, &err.to_string())?,
    }
    map.end()
}

/// `serialize_with` adapter for optional value-object fields; `None` is null
pub mod option {
    use super::*;

    pub fn serialize<V, S>(valuer: &Option<V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Valuer,
        S: Serializer,
    {
        match valuer {
            Some(valuer) => super::serialize(valuer, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// What a projected value object carries
#[derive(Debug, PartialEq)]
pub(crate) enum Carried<'a> {
    Primitive(&'a Value),
    Failed(&'a str),
}

/// Recognise a projected value object
pub(crate) fn carried(value: &Value) -> Option<Carried<'_>> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    if let Some(primitive) = map.get(VALUE_TAG) {
        return Some(Carried::Primitive(primitive));
    }
    match map.get(VALUE_ERROR_TAG) {
        Some(Value::String(message)) => Some(Carried::Failed(message)),
        _ => None,
    }
}
