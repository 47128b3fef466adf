//! Keyed alignment of record collections.
//!
//! Turns a collection of records into a map from identifier to projection, so
//! two collections can be compared regardless of order. The identifier field
//! is removed from every stored projection once it has served as the key.

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::projection::valuer::{carried, Carried};
use crate::projection::{to_untyped, Untyped};
use crate::utils::error::{CmpError, Result};

/// Canonical, comparable form of an identifier value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IdKey(String);

impl IdKey {
    /// Canonicalize an identifier value
    ///
    /// Strings are used as-is, value objects by their primitive, a null
    /// identifier as the empty string, and anything else by its compact JSON
    /// text (`42`, `true`).
    ///
    /// # Errors
    /// * `CmpError::ValuerFailed` - The identifier is a value object whose
    ///   accessor failed
    pub fn from_value(field: &str, value: &Value) -> Result<Self> {
        match carried(value) {
            Some(Carried::Primitive(primitive)) => Ok(Self::plain(primitive)),
            Some(Carried::Failed(message)) => Err(CmpError::ValuerFailed {
                path: field.to_string(),
                message: message.to_string(),
            }),
            None => Ok(Self::plain(value)),
        }
    }

    fn plain(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            Value::Null => Self(String::new()),
            other => Self(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdKey {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Projections keyed by identifier, identifier field removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedMap {
    id_field: String,
    entries: BTreeMap<IdKey, Untyped>,
}

impl KeyedMap {
    /// Name of the field the entries were keyed by
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn get(&self, id: &IdKey) -> Option<&Untyped> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> btree_map::Keys<'_, IdKey, Untyped> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, IdKey, Untyped> {
        self.entries.iter()
    }
}

/// Key a collection of records by one of their fields
///
/// **Public** - main entry point for keyed alignment
///
/// # Arguments
/// * `id_field` - Name of the identifier field
/// * `records` - Records to project and key
///
/// # Returns
/// KeyedMap with one entry per record
///
/// # Errors
/// * `CmpError::MissingIdentifier` - A record has no `id_field`
/// * `CmpError::DuplicateIdentifier` - Two records share an identifier
/// * `CmpError::ValuerFailed` - A value-object identifier failed to produce
///   its primitive
/// * Projection errors from [`to_untyped`]
///
/// # Example
/// ```ignore
/// let keyed = to_keyed("id", &users)?;
/// assert_eq!(keyed.len(), users.len());
/// ```
pub fn to_keyed<T: Serialize>(id_field: &str, records: &[T]) -> Result<KeyedMap> {
    let projections = records
        .iter()
        .map(to_untyped)
        .collect::<Result<Vec<_>>>()?;
    key_untyped(id_field, projections)
}

/// Key already-projected records by one of their fields
pub fn key_untyped(id_field: &str, projections: Vec<Untyped>) -> Result<KeyedMap> {
    debug!("Keying {} records by '{}'", projections.len(), id_field);

    let mut entries = BTreeMap::new();
    for mut untyped in projections {
        let Some(value) = untyped.get(id_field) else {
            warn!("Record without identifier field '{}': {}", id_field, untyped);
            return Err(CmpError::MissingIdentifier {
                field: id_field.to_string(),
                record: untyped.to_string(),
            });
        };

        let id = IdKey::from_value(id_field, value)?;
        if entries.contains_key(&id) {
            warn!("Duplicate identifier '{}' for field '{}'", id, id_field);
            return Err(CmpError::DuplicateIdentifier {
                field: id_field.to_string(),
                value: id.to_string(),
            });
        }

        untyped.remove(id_field);
        entries.insert(id, untyped);
    }

    Ok(KeyedMap {
        id_field: id_field.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Item {
        id: i64,
        name: String,
    }

    #[derive(Serialize)]
    struct Named {
        name: String,
    }

    fn item(id: i64, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_keys_records_and_drops_identifier() {
        let keyed = to_keyed("id", &[item(2, "b"), item(1, "a")]).unwrap();

        assert_eq!(keyed.id_field(), "id");
        assert_eq!(keyed.len(), 2);
        let ids: Vec<&str> = keyed.ids().map(IdKey::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let first = keyed.get(&IdKey::from("1")).unwrap();
        assert!(!first.contains("id"));
        assert_eq!(first.get("name"), Some(&json!("a")));
    }

    #[test]
    fn test_missing_identifier() {
        let err = to_keyed("id", &[Named {
            name: "a".to_string(),
        }])
        .unwrap_err();

        match err {
            CmpError::MissingIdentifier { field, record } => {
                assert_eq!(field, "id");
                assert_eq!(record, r#"{"name":"a"}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_identifier() {
        let err = to_keyed("id", &[item(1, "a"), item(1, "b")]).unwrap_err();
        match err {
            CmpError::DuplicateIdentifier { field, value } => {
                assert_eq!(field, "id");
                assert_eq!(value, "1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_identifier_matches_empty_string() {
        #[derive(Serialize)]
        struct Draft {
            code: Option<String>,
            name: String,
        }

        #[derive(Serialize)]
        struct Saved {
            code: String,
            name: String,
        }

        let drafts = to_keyed(
            "code",
            &[Draft {
                code: None,
                name: "a".to_string(),
            }],
        )
        .unwrap();
        let saved = to_keyed(
            "code",
            &[Saved {
                code: String::new(),
                name: "a".to_string(),
            }],
        )
        .unwrap();

        let ids: Vec<&IdKey> = drafts.ids().collect();
        assert_eq!(ids, saved.ids().collect::<Vec<_>>());
        assert_eq!(drafts.get(&IdKey::from("")), saved.get(&IdKey::from("")));
    }

    #[test]
    fn test_identifier_canonical_form() {
        assert_eq!(IdKey::from_value("id", &json!("A")).unwrap().as_str(), "A");
        assert_eq!(IdKey::from_value("id", &json!(42)).unwrap().as_str(), "42");
        assert_eq!(IdKey::from_value("id", &Value::Null).unwrap().as_str(), "");
        assert_eq!(
            IdKey::from_value("id", &json!({ "$value": "X-1" }))
                .unwrap()
                .as_str(),
            "X-1"
        );
        assert!(matches!(
            IdKey::from_value("id", &json!({ "$value_error": "bad" })),
            Err(CmpError::ValuerFailed { .. })
        ));
    }
}
