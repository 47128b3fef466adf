//! Untyped projection of records.
//!
//! A record is anything whose `Serialize` impl produces a struct or a
//! string-keyed map. Projecting it yields an [`Untyped`]: the record's field
//! names mapped to their serialized values, so two differently-typed records
//! can be compared field by field.

pub mod valuer;

use serde::Serialize;
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::options::{cmp_only, CmpOption};
use crate::utils::error::{CmpError, Result};

pub use valuer::Valuer;

/// Field name -> untyped value mapping for a single record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Untyped(BTreeMap<String, Value>);

impl Untyped {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// The projection as a plain JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Untyped {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Untyped {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Untyped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Project a record into its untyped field map
///
/// **Public** - main entry point for projection
///
/// # Arguments
/// * `record` - Any value serializing as a struct or string-keyed map
///
/// # Returns
/// Untyped projection; a record without fields (including a unit struct)
/// yields an empty map
///
/// # Errors
/// * `CmpError::Projection` - The record's `Serialize` impl failed
/// * `CmpError::NotARecord` - The record serialized as a scalar or sequence
///
/// # Example
/// ```ignore
/// #[derive(Serialize)]
/// struct User { id: i64, name: String }
///
/// let untyped = to_untyped(&User { id: 1, name: "ann".into() })?;
/// assert_eq!(untyped.get("name"), Some(&json!("ann")));
/// ```
pub fn to_untyped<T: Serialize + ?Sized>(record: &T) -> Result<Untyped> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(Untyped::new()),
        other => Err(CmpError::NotARecord {
            kind: kind_of(&other),
        }),
    }
}

/// Project every record of a collection, preserving order
pub fn to_untyped_all<T: Serialize>(records: &[T]) -> Result<Vec<Untyped>> {
    records.iter().map(to_untyped).collect()
}

/// Field names of a record's projection, sorted
pub fn field_names<T: Serialize + ?Sized>(record: &T) -> Result<Vec<String>> {
    Ok(to_untyped(record)?.fields().map(str::to_string).collect())
}

/// Allow-list holding exactly the fields of `sample`'s type
///
/// Useful when the real side carries more fields than the expected type
/// declares: `cmp_only_struct_names(&Expected::default())`.
pub fn cmp_only_struct_names<T: Serialize + ?Sized>(sample: &T) -> Result<CmpOption> {
    Ok(cmp_only(field_names(sample)?))
}

/// Short name of a JSON value's kind, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}
