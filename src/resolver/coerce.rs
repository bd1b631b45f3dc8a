//! Declared-type-driven coercion of a located JSON node.
//!
//! The declared [`TypeKind`] alone selects the coercion path, so `"42"` and
//! `42` bind identically to an `i32` parameter. Scalars are parsed from the
//! node's textual rendering: the content of a JSON string, or the compact
//! JSON text of anything else.

use super::value::BoundValue;
use crate::binding::{ScalarType, TypeKind};
use crate::error::BindError;
use serde_json::Value;
use std::borrow::Cow;

/// Textual rendering of a node, without quoting artifacts for strings.
pub fn textual(node: &Value) -> Cow<'_, str> {
    match node {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Coerce `node` (found under `key`) into `declared`.
pub fn coerce(node: &Value, declared: &TypeKind, key: &str) -> Result<BoundValue, BindError> {
    match declared {
        TypeKind::Primitive(scalar) | TypeKind::Boxed(scalar) => coerce_scalar(node, *scalar, key),
        TypeKind::String => Ok(BoundValue::String(textual(node).into_owned())),
        TypeKind::Structured(shape) => shape
            .deserialize(node)
            .map(BoundValue::Structured)
            .map_err(|e| BindError::Deserialize {
                key: key.to_string(),
                type_name: shape.type_name().to_string(),
                message: e.to_string(),
            }),
    }
}

fn coerce_scalar(node: &Value, scalar: ScalarType, key: &str) -> Result<BoundValue, BindError> {
    let text = textual(node);
    let text = text.as_ref();
    let value = match scalar {
        ScalarType::Bool => parse_bool(text).map(BoundValue::Bool),
        ScalarType::Byte => text.parse().ok().map(BoundValue::Byte),
        ScalarType::Short => text.parse().ok().map(BoundValue::Short),
        ScalarType::Int => text.parse().ok().map(BoundValue::Int),
        ScalarType::Long => text.parse().ok().map(BoundValue::Long),
        ScalarType::Float => text.parse().ok().map(BoundValue::Float),
        ScalarType::Double => text.parse().ok().map(BoundValue::Double),
        ScalarType::Char => text.chars().next().map(BoundValue::Char),
    };
    value.ok_or_else(|| BindError::Coercion {
        key: key.to_string(),
        expected: scalar.rust_name(),
        found: node.to_string(),
    })
}
