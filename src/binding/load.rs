use super::build::HandlerBindings;
use super::shape::{DeclaredShape, StructuredType};
use super::types::{BindingOptions, ParameterDescriptor, ScalarType, TypeKind};
use crate::error::BindingDeclError;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Serialization format of a declaration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclFormat {
    Yaml,
    Json,
}

impl DeclFormat {
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            DeclFormat::Yaml
        } else {
            DeclFormat::Json
        }
    }
}

#[derive(Debug, Deserialize)]
struct BindingFile {
    #[serde(default)]
    handlers: BTreeMap<String, HandlerDecl>,
}

#[derive(Debug, Deserialize)]
struct HandlerDecl {
    #[serde(default)]
    parameters: Vec<ParamDecl>,
}

#[derive(Debug, Deserialize)]
struct ParamDecl {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    key: String,
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default = "default_true")]
    fallback: bool,
    /// Object fields to keep; none keeps the whole object
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    type_name: Option<String>,
}

fn default_true() -> bool {
    true
}

fn declared_type(handler: &str, decl: &ParamDecl) -> Result<TypeKind, BindingDeclError> {
    let token = decl.ty.trim().to_ascii_lowercase();
    let structured_name = || decl.type_name.clone().unwrap_or_else(|| decl.name.clone());
    let kind = match token.as_str() {
        "string" | "str" => TypeKind::String,
        "object" => TypeKind::Structured(StructuredType::new(DeclaredShape::Object {
            name: structured_name(),
            fields: decl.fields.clone(),
        })),
        "array" => TypeKind::Structured(StructuredType::new(DeclaredShape::Array {
            name: structured_name(),
        })),
        other => match ScalarType::parse(other) {
            Some(scalar) if decl.nullable => TypeKind::Boxed(scalar),
            Some(scalar) => TypeKind::Primitive(scalar),
            None => {
                return Err(BindingDeclError::UnknownType {
                    handler: handler.to_string(),
                    name: decl.name.clone(),
                    type_name: decl.ty.clone(),
                })
            }
        },
    };
    Ok(kind)
}

/// Parse handler binding declarations from text.
pub fn load_bindings_from_str(
    content: &str,
    format: DeclFormat,
) -> anyhow::Result<Vec<HandlerBindings>> {
    let file: BindingFile = match format {
        DeclFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML bindings")?,
        DeclFormat::Json => serde_json::from_str(content).context("invalid JSON bindings")?,
    };

    let mut all = Vec::with_capacity(file.handlers.len());
    for (handler_name, decl) in file.handlers {
        let mut bindings = HandlerBindings::new(handler_name.clone());
        for p in &decl.parameters {
            let kind = declared_type(&handler_name, p)?;
            let descriptor = ParameterDescriptor::new(p.name.clone(), kind).with_options(
                BindingOptions {
                    key: p.key.clone(),
                    required: p.required,
                    allow_whole_object_fallback: p.fallback,
                },
            );
            bindings = bindings.param(descriptor);
        }
        bindings.validate()?;
        all.push(bindings);
    }
    Ok(all)
}

/// Load handler binding declarations from a YAML or JSON file.
pub fn load_bindings(file_path: &str) -> anyhow::Result<Vec<HandlerBindings>> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read bindings file {file_path}"))?;
    load_bindings_from_str(&content, DeclFormat::from_path(file_path))
        .with_context(|| format!("failed to load bindings from {file_path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
handlers:
  pack_type:
    parameters:
      - name: param
        type: i32
        nullable: true
        key: id
  object:
    parameters:
      - name: param
        type: object
        type_name: Param
        fields: [id, name, pojo]
        required: false
"#;

    #[test]
    fn test_load_yaml_declarations() {
        let all = load_bindings_from_str(YAML, DeclFormat::Yaml).unwrap();
        assert_eq!(all.len(), 2);
        // BTreeMap keeps handlers sorted by name
        assert_eq!(all[0].handler_name, "object");
        let param = &all[0].parameters[0];
        assert_eq!(param.declared_type().name(), "Param");
        assert!(!param.is_required());
        assert!(param.allows_whole_object_fallback());

        let packed = &all[1].parameters[0];
        assert_eq!(packed.declared_type(), &TypeKind::Boxed(ScalarType::Int));
        assert_eq!(packed.explicit_key(), Some("id"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"handlers": {"h": {"parameters": [{"name": "x", "type": "decimal"}]}}}"#;
        let err = load_bindings_from_str(json, DeclFormat::Json).unwrap_err();
        assert!(err.to_string().contains("unknown type 'decimal'"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DeclFormat::from_path("b.yml"), DeclFormat::Yaml);
        assert_eq!(DeclFormat::from_path("b.json"), DeclFormat::Json);
    }
}
