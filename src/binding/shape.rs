//! Structural deserializers for object and sequence parameters.

use serde::de::{DeserializeOwned, Error as _, Visitor};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-directed deserializer for one structured parameter type.
///
/// `deserialize` checks a node against the type and returns the JSON to bind.
/// `fields` names the top-level fields the type reads, so the fallback policy
/// can tell which of them the body left out.
pub trait StructuredShape: Send + Sync + 'static {
    fn type_name(&self) -> &str;

    /// Top-level field names. Empty when the type is not a plain record.
    fn fields(&self) -> &[String];

    fn deserialize(&self, node: &Value) -> Result<Value, serde_json::Error>;
}

/// Shared handle to a [`StructuredShape`].
#[derive(Clone)]
pub struct StructuredType(Arc<dyn StructuredShape>);

impl StructuredType {
    pub fn new(shape: impl StructuredShape) -> Self {
        Self(Arc::new(shape))
    }

    /// Shape for a serde type.
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + 'static,
    {
        Self::new(SerdeShape::<T>::new())
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn fields(&self) -> &[String] {
        self.0.fields()
    }

    pub fn deserialize(&self, node: &Value) -> Result<Value, serde_json::Error> {
        self.0.deserialize(node)
    }
}

impl fmt::Debug for StructuredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructuredType")
            .field(&self.type_name())
            .finish()
    }
}

impl PartialEq for StructuredType {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
    }
}

/// Checks nodes against `T` with serde and binds the node itself.
///
/// The bound JSON is the client's node, so `Json<T>` later deserializes
/// exactly what was sent, whatever `T`'s serialization attributes say.
pub struct SerdeShape<T> {
    type_name: &'static str,
    fields: Vec<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> SerdeShape<T> {
    pub fn new() -> Self {
        let full = std::any::type_name::<T>();
        Self {
            type_name: short_type_name(full),
            fields: record_fields::<T>(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Default for SerdeShape<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StructuredShape for SerdeShape<T>
where
    T: DeserializeOwned + 'static,
{
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn deserialize(&self, node: &Value) -> Result<Value, serde_json::Error> {
        <T as serde::Deserialize<'_>>::deserialize(node)?;
        Ok(node.clone())
    }
}

/// Field names serde's derive hands to `deserialize_struct` for `T`.
///
/// Renames are applied and skipped fields are left out. Types that are not
/// derived records (maps, sequences, flattened structs) report none.
fn record_fields<T: DeserializeOwned>() -> Vec<String> {
    let mut fields: &'static [&'static str] = &[];
    // always errors; only the recorded field list matters
    let _ = T::deserialize(FieldRecorder {
        fields: &mut fields,
    });
    fields.iter().map(|f| (*f).to_string()).collect()
}

struct FieldRecorder<'a> {
    fields: &'a mut &'static [&'static str],
}

impl<'de> serde::Deserializer<'de> for FieldRecorder<'_> {
    type Error = serde::de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(Self::Error::custom("not a record"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.fields = fields;
        Err(Self::Error::custom("fields recorded"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// `my_crate::pojo::Param` -> `Param`, keeping generic arguments intact.
fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

/// Shape described by a declaration file instead of a Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredShape {
    /// JSON object projected onto the listed fields. With no fields listed
    /// the object binds unchanged.
    Object { name: String, fields: Vec<String> },
    /// JSON array of any elements
    Array { name: String },
}

impl StructuredShape for DeclaredShape {
    fn type_name(&self) -> &str {
        match self {
            DeclaredShape::Object { name, .. } | DeclaredShape::Array { name } => name,
        }
    }

    fn fields(&self) -> &[String] {
        match self {
            DeclaredShape::Object { fields, .. } => fields,
            DeclaredShape::Array { .. } => &[],
        }
    }

    fn deserialize(&self, node: &Value) -> Result<Value, serde_json::Error> {
        match (self, node) {
            (DeclaredShape::Object { fields, .. }, Value::Object(_)) if fields.is_empty() => {
                Ok(node.clone())
            }
            (DeclaredShape::Object { fields, .. }, Value::Object(source)) => {
                let projected: Map<String, Value> = fields
                    .iter()
                    .map(|field| {
                        let value = source.get(field).cloned().unwrap_or(Value::Null);
                        (field.clone(), value)
                    })
                    .collect();
                Ok(Value::Object(projected))
            }
            (DeclaredShape::Array { .. }, Value::Array(_)) => Ok(node.clone()),
            (DeclaredShape::Object { name, .. }, other) => Err(serde_json::Error::custom(
                format!("expected object for {name}, found {}", json_kind(other)),
            )),
            (DeclaredShape::Array { name }, other) => Err(serde_json::Error::custom(format!(
                "expected array for {name}, found {}",
                json_kind(other)
            ))),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
