use super::shape::StructuredType;
use std::fmt;

/// Scalar kinds a body parameter can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl ScalarType {
    /// Rust spelling of the scalar, used in error messages and declaration files.
    pub fn rust_name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Byte => "i8",
            ScalarType::Short => "i16",
            ScalarType::Int => "i32",
            ScalarType::Long => "i64",
            ScalarType::Float => "f32",
            ScalarType::Double => "f64",
            ScalarType::Char => "char",
        }
    }

    /// Parse a declaration-file type token (`bool`, `i32`, ...).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "bool" | "boolean" => Some(ScalarType::Bool),
            "i8" | "byte" => Some(ScalarType::Byte),
            "i16" | "short" => Some(ScalarType::Short),
            "i32" | "int" | "integer" => Some(ScalarType::Int),
            "i64" | "long" => Some(ScalarType::Long),
            "f32" | "float" => Some(ScalarType::Float),
            "f64" | "double" | "number" => Some(ScalarType::Double),
            "char" => Some(ScalarType::Char),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// Declared type of a body parameter.
///
/// Fixed when the descriptor is built; coercion dispatches on this tag and
/// never on the runtime kind of the JSON node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Non-nullable scalar (`i32`, `bool`, ...)
    Primitive(ScalarType),
    /// Nullable scalar (`Option<i32>`, ...)
    Boxed(ScalarType),
    String,
    /// Objects and sequences, deserialized through a [`StructuredType`]
    Structured(StructuredType),
}

impl TypeKind {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, TypeKind::Structured(_))
    }

    /// Nullable form of this kind. Only primitives change.
    #[must_use]
    pub fn boxed(self) -> Self {
        match self {
            TypeKind::Primitive(scalar) => TypeKind::Boxed(scalar),
            other => other,
        }
    }

    /// Human readable name used in errors and `inspect` output.
    pub fn name(&self) -> String {
        match self {
            TypeKind::Primitive(scalar) => scalar.rust_name().to_string(),
            TypeKind::Boxed(scalar) => format!("Option<{}>", scalar.rust_name()),
            TypeKind::String => "String".to_string(),
            TypeKind::Structured(shape) => shape.type_name().to_string(),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The three integrator-facing binding options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOptions {
    /// JSON key to read; blank means "use the parameter's own name"
    pub key: String,
    /// Fail resolution if no value can be produced
    pub required: bool,
    /// Deserialize the whole body into the parameter when its key is absent
    pub allow_whole_object_fallback: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            key: String::new(),
            required: true,
            allow_whole_object_fallback: true,
        }
    }
}

/// One handler parameter opted into body binding.
///
/// Built once when the handler is registered and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    source_name: String,
    declared_type: TypeKind,
    options: BindingOptions,
}

impl ParameterDescriptor {
    /// Descriptor with default options: no explicit key, required, fallback allowed.
    pub fn new(source_name: impl Into<String>, declared_type: TypeKind) -> Self {
        Self {
            source_name: source_name.into(),
            declared_type,
            options: BindingOptions::default(),
        }
    }

    /// Read the value from `key` instead of the parameter's own name.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.options.key = key.into();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.options.required = required;
        self
    }

    #[must_use]
    pub fn whole_object_fallback(mut self, allow: bool) -> Self {
        self.options.allow_whole_object_fallback = allow;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: BindingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn declared_type(&self) -> &TypeKind {
        &self.declared_type
    }

    pub fn explicit_key(&self) -> Option<&str> {
        let key = self.options.key.trim();
        (!key.is_empty()).then_some(self.options.key.as_str())
    }

    pub fn is_required(&self) -> bool {
        self.options.required
    }

    pub fn allows_whole_object_fallback(&self) -> bool {
        self.options.allow_whole_object_fallback
    }

    pub fn options(&self) -> &BindingOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_annotation_defaults() {
        let d = ParameterDescriptor::new("age", TypeKind::Primitive(ScalarType::Int));
        assert_eq!(d.explicit_key(), None);
        assert!(d.is_required());
        assert!(d.allows_whole_object_fallback());
    }

    #[test]
    fn test_blank_key_is_not_explicit() {
        let d = ParameterDescriptor::new("age", TypeKind::String).key("   ");
        assert_eq!(d.explicit_key(), None);
        let d = d.key("years");
        assert_eq!(d.explicit_key(), Some("years"));
    }

    #[test]
    fn test_boxed_only_changes_primitives() {
        assert_eq!(
            TypeKind::Primitive(ScalarType::Long).boxed(),
            TypeKind::Boxed(ScalarType::Long)
        );
        assert_eq!(TypeKind::String.boxed(), TypeKind::String);
        assert_eq!(TypeKind::Boxed(ScalarType::Bool).name(), "Option<bool>");
    }

    #[test]
    fn test_scalar_tokens() {
        assert_eq!(ScalarType::parse("i64"), Some(ScalarType::Long));
        assert_eq!(ScalarType::parse("integer"), Some(ScalarType::Int));
        assert_eq!(ScalarType::parse("object"), None);
    }
}
