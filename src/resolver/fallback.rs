//! Whole-body fallback and post-hoc field-presence checks.
//!
//! When a parameter's key is absent, the entire cached body is deserialized
//! into the declared type. Unlike keyed coercion this is structural: a scalar
//! parameter only binds if the body itself is a matching JSON scalar.

use super::value::BoundValue;
use crate::binding::{ScalarType, TypeKind};
use crate::error::BindError;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn structural<T: DeserializeOwned>(tree: &Value) -> Result<T, serde_json::Error> {
    <T as serde::Deserialize<'_>>::deserialize(tree)
}

/// Deserialize the whole body tree into `declared`.
pub fn whole_body(tree: &Value, declared: &TypeKind, key: &str) -> Result<BoundValue, BindError> {
    let result = match declared {
        TypeKind::Primitive(scalar) | TypeKind::Boxed(scalar) => match scalar {
            ScalarType::Bool => structural(tree).map(BoundValue::Bool),
            ScalarType::Byte => structural(tree).map(BoundValue::Byte),
            ScalarType::Short => structural(tree).map(BoundValue::Short),
            ScalarType::Int => structural(tree).map(BoundValue::Int),
            ScalarType::Long => structural(tree).map(BoundValue::Long),
            ScalarType::Float => structural(tree).map(BoundValue::Float),
            ScalarType::Double => structural(tree).map(BoundValue::Double),
            ScalarType::Char => structural(tree).map(BoundValue::Char),
        },
        TypeKind::String => structural(tree).map(BoundValue::String),
        TypeKind::Structured(shape) => shape.deserialize(tree).map(BoundValue::Structured),
    };
    result.map_err(|e| BindError::Deserialize {
        key: key.to_string(),
        type_name: declared.name(),
        message: e.to_string(),
    })
}

/// Declared `fields` that `value` leaves absent or `null`.
///
/// Values that are not objects have no fields to inspect.
pub fn missing_fields(value: &Value, fields: &[String]) -> Vec<String> {
    match value {
        Value::Object(map) => fields
            .iter()
            .filter(|field| map.get(field.as_str()).map_or(true, Value::is_null))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}
