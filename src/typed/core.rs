use crate::binding::{ParameterDescriptor, ScalarType, StructuredType, TypeKind};
use crate::body::RequestContext;
use crate::error::BindError;
use crate::resolver::{BoundValue, Resolver};
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// A Rust type that can receive a body-bound parameter.
pub trait BodyParam: Sized {
    /// Declared kind used when a descriptor is built from this type.
    fn type_kind() -> TypeKind;

    /// Convert a resolved value. `None` means the parameter was absent.
    fn from_bound(value: Option<BoundValue>, key: &str) -> Result<Self, BindError>;
}

fn mismatch(key: &str, expected: &'static str, found: &BoundValue) -> BindError {
    BindError::Coercion {
        key: key.to_string(),
        expected,
        found: found.kind_name().to_string(),
    }
}

macro_rules! scalar_param {
    ($($ty:ty => $scalar:ident),* $(,)?) => {$(
        impl BodyParam for $ty {
            fn type_kind() -> TypeKind {
                TypeKind::Primitive(ScalarType::$scalar)
            }

            fn from_bound(value: Option<BoundValue>, key: &str) -> Result<Self, BindError> {
                match value {
                    Some(BoundValue::$scalar(v)) => Ok(v),
                    Some(other) => Err(mismatch(key, ScalarType::$scalar.rust_name(), &other)),
                    None => Err(BindError::missing(key)),
                }
            }
        }
    )*};
}

scalar_param! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
}

impl BodyParam for String {
    fn type_kind() -> TypeKind {
        TypeKind::String
    }

    fn from_bound(value: Option<BoundValue>, key: &str) -> Result<Self, BindError> {
        match value {
            Some(BoundValue::String(s)) => Ok(s),
            Some(other) => Err(mismatch(key, "String", &other)),
            None => Err(BindError::missing(key)),
        }
    }
}

impl<T: BodyParam> BodyParam for Option<T> {
    fn type_kind() -> TypeKind {
        T::type_kind().boxed()
    }

    fn from_bound(value: Option<BoundValue>, key: &str) -> Result<Self, BindError> {
        match value {
            Some(v) => T::from_bound(Some(v), key).map(Some),
            None => Ok(None),
        }
    }
}

/// Structured parameter deserialized with serde.
///
/// `T` is deserialized from the node the client sent. When a required
/// parameter falls back to the whole body, every field `T` declares must be
/// present and non-null; a missing field fails with `FieldsIncomplete`
/// whether the field is an `Option` or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> BodyParam for Json<T>
where
    T: DeserializeOwned + 'static,
{
    fn type_kind() -> TypeKind {
        TypeKind::Structured(StructuredType::of::<T>())
    }

    fn from_bound(value: Option<BoundValue>, key: &str) -> Result<Self, BindError> {
        match value {
            Some(BoundValue::Structured(node)) => {
                serde_json::from_value(node)
                    .map(Json)
                    .map_err(|e| BindError::Deserialize {
                        key: key.to_string(),
                        type_name: Self::type_kind().name(),
                        message: e.to_string(),
                    })
            }
            Some(other) => Err(mismatch(key, "structured", &other)),
            None => Err(BindError::missing(key)),
        }
    }
}

impl ParameterDescriptor {
    /// Descriptor whose declared type is taken from `T`.
    pub fn of<T: BodyParam>(source_name: impl Into<String>) -> Self {
        Self::new(source_name, T::type_kind())
    }
}

/// Resolve one parameter and convert it to `T`.
///
/// The descriptor's declared type should come from `T` (see
/// [`ParameterDescriptor::of`]); a descriptor declared for another type
/// yields a `Coercion` error instead of a value.
pub fn extract<T: BodyParam>(
    resolver: &Resolver,
    descriptor: &ParameterDescriptor,
    ctx: &RequestContext,
) -> Result<T, BindError> {
    let value = resolver.resolve(descriptor, ctx)?;
    T::from_bound(value, crate::resolver::key::resolve_key(descriptor))
}
