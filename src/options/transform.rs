//! Value transformers and custom comparers.
//!
//! A value-scoped transformer fires only when both sides satisfy its
//! predicate, and then converts both sides before the structural check.
//! Key-scoped transformers and comparers fire at a named record field.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;

use super::{CmpOption, Scope};
use crate::diff::Path;
use crate::projection::valuer::{carried, Carried};
use crate::utils::error::{CmpError, Result};

type Predicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;
type Convert = Arc<dyn Fn(&Value, &Path) -> Result<Value> + Send + Sync>;
type Equal = Arc<dyn Fn(&Value, &Value) -> std::result::Result<bool, String> + Send + Sync>;

/// Converts both sides to a canonical form before they are compared
#[derive(Clone)]
pub struct Transformer {
    name: String,
    scope: Scope,
    applies: Predicate,
    convert: Convert,
}

impl Transformer {
    /// Build a custom transformer
    ///
    /// # Arguments
    /// * `name` - Shown in trace logs
    /// * `scope` - Where the transformer may fire
    /// * `applies` - Must hold for the (expected, actual) pair
    /// * `convert` - Applied to each side; receives the current path for error
    ///   reporting
    pub fn new<P, C>(name: impl Into<String>, scope: Scope, applies: P, convert: C) -> Self
    where
        P: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
        C: Fn(&Value, &Path) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope,
            applies: Arc::new(applies),
            convert: Arc::new(convert),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) fn applies(&self, path: &Path, expected: &Value, actual: &Value) -> bool {
        self.scope.matches(path) && (self.applies)(expected, actual)
    }

    pub(crate) fn convert(&self, value: &Value, path: &Path) -> Result<Value> {
        (self.convert)(value, path)
    }
}

/// Decides equality of a named field with a caller-supplied predicate
#[derive(Clone)]
pub struct Comparer {
    name: String,
    scope: Scope,
    equal: Equal,
}

impl Comparer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) fn applies(&self, path: &Path) -> bool {
        self.scope.matches(path)
    }

    /// `Err` carries the reason the sides could not be interpreted
    pub(crate) fn equal(&self, expected: &Value, actual: &Value) -> std::result::Result<bool, String> {
        (self.equal)(expected, actual)
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

fn decodes<T: DeserializeOwned>(value: &Value) -> bool {
    decode::<T>(value).is_some()
}

/// Treat a missing optional `T` as `T::default()`
///
/// Fires when each side is null or a `T`, and at least one side is null.
/// Both-null stays equal; null against the zero value is equal; null against
/// any other value differs.
pub fn pointer_converter<T>(name: &str) -> CmpOption
where
    T: Default + Serialize + DeserializeOwned + 'static,
{
    let applies = |expected: &Value, actual: &Value| {
        let fits = |value: &Value| value.is_null() || decodes::<T>(value);
        (expected.is_null() || actual.is_null()) && fits(expected) && fits(actual)
    };
    let convert = |value: &Value, _: &Path| -> Result<Value> {
        if value.is_null() {
            Ok(serde_json::to_value(T::default())?)
        } else {
            Ok(value.clone())
        }
    };
    CmpOption::Transform(Transformer::new(name, Scope::Values, applies, convert))
}

/// Compare sequences of `T` as canonical `Vec<T>`, with null as empty
///
/// Fires when each side is null or a sequence of `T`, and at least one side is
/// a sequence.
pub fn slice_converter<T>(name: &str) -> CmpOption
where
    T: Serialize + DeserializeOwned + 'static,
{
    let applies = |expected: &Value, actual: &Value| {
        let fits = |value: &Value| value.is_null() || decodes::<Vec<T>>(value);
        (expected.is_array() || actual.is_array()) && fits(expected) && fits(actual)
    };
    let convert = |value: &Value, _: &Path| -> Result<Value> {
        let items: Vec<T> = if value.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(value.clone())?
        };
        Ok(serde_json::to_value(items)?)
    };
    CmpOption::Transform(Transformer::new(name, Scope::Values, applies, convert))
}

/// Replace value objects by their primitive representation
///
/// Fires when both sides were serialized through
/// [`crate::projection::valuer::serialize`].
///
/// # Errors
/// * `CmpError::ValuerFailed` - A side's accessor reported an error; the whole
///   comparison is aborted
pub fn valuer_conv() -> CmpOption {
    let applies = |expected: &Value, actual: &Value| {
        carried(expected).is_some() && carried(actual).is_some()
    };
    let convert = |value: &Value, path: &Path| -> Result<Value> {
        match carried(value) {
            Some(Carried::Primitive(primitive)) => Ok(primitive.clone()),
            Some(Carried::Failed(message)) => Err(CmpError::ValuerFailed {
                path: path.to_string(),
                message: message.to_string(),
            }),
            None => Ok(value.clone()),
        }
    };
    CmpOption::Transform(Transformer::new("valuer", Scope::Values, applies, convert))
}

/// Convert a named field through `cv` before comparison
///
/// Each side that decodes as `In` is replaced by `cv(in)`; a side that does not
/// decode is compared unchanged.
///
/// # Example
/// ```ignore
/// // compare timestamps at second precision
/// key_transform("created_at", |millis: i64| millis / 1000)
/// ```
pub fn key_transform<In, Out, F>(field: &str, cv: F) -> CmpOption
where
    In: DeserializeOwned + 'static,
    Out: Serialize + 'static,
    F: Fn(In) -> Out + Send + Sync + 'static,
{
    let convert = move |value: &Value, _: &Path| -> Result<Value> {
        match decode::<In>(value) {
            Some(input) => Ok(serde_json::to_value(cv(input))?),
            None => Ok(value.clone()),
        }
    };
    CmpOption::Transform(Transformer::new(
        format!("keyTrans{}", field),
        Scope::Field(field.to_string()),
        |_: &Value, _: &Value| true,
        convert,
    ))
}

/// Decide equality of a named field with `cmp_fn`
///
/// The expected side is decoded as `X` and the actual side as `Y`. If either
/// side does not decode, the field is reported as incomparable rather than
/// silently passing.
pub fn key_comparer<X, Y, F>(field: &str, cmp_fn: F) -> CmpOption
where
    X: DeserializeOwned + 'static,
    Y: DeserializeOwned + 'static,
    F: Fn(X, Y) -> bool + Send + Sync + 'static,
{
    let equal = move |expected: &Value, actual: &Value| -> std::result::Result<bool, String> {
        let x = decode::<X>(expected)
            .ok_or_else(|| format!("expected side is not {}", type_name::<X>()))?;
        let y = decode::<Y>(actual)
            .ok_or_else(|| format!("actual side is not {}", type_name::<Y>()))?;
        Ok(cmp_fn(x, y))
    };
    CmpOption::Compare(Comparer {
        name: format!("keyCmp{}", field),
        scope: Scope::Field(field.to_string()),
        equal: Arc::new(equal),
    })
}
