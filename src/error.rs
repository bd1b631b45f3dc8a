//! Failure taxonomy for body binding.
//!
//! Every way a parameter can fail to resolve maps to exactly one [`BindError`]
//! variant. The dispatcher turns them into client-visible responses through
//! [`BindError::status`]; integrators that want the legacy "parameter not
//! supplied" behaviour opt into [`crate::runtime_config::FailurePolicy::Lenient`].

use http::StatusCode;
use std::fmt;

/// Coarse classification of a [`BindError`], stable for logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MalformedBody,
    MissingRequired,
    CoercionError,
    DeserializeError,
    FieldsIncompleteAndRequired,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MalformedBody => "malformed_body",
            FailureKind::MissingRequired => "missing_required",
            FailureKind::CoercionError => "coercion_error",
            FailureKind::DeserializeError => "deserialize_error",
            FailureKind::FieldsIncompleteAndRequired => "fields_incomplete",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a malformed body was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyFault {
    /// Reading the transport failed
    Io(String),
    /// The payload exceeded the configured byte limit
    TooLarge { limit: usize },
    /// The payload was not valid UTF-8
    NotUtf8,
    /// The payload was empty or whitespace only
    Empty,
    /// The payload is not JSON (even under relaxed parsing)
    Syntax(String),
}

impl fmt::Display for BodyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFault::Io(msg) => write!(f, "failed to read request body: {msg}"),
            BodyFault::TooLarge { limit } => {
                write!(f, "request body exceeds the {limit} byte limit")
            }
            BodyFault::NotUtf8 => write!(f, "request body is not valid UTF-8"),
            BodyFault::Empty => write!(f, "request body is empty"),
            BodyFault::Syntax(msg) => write!(f, "request body is not valid JSON: {msg}"),
        }
    }
}

/// Failure to resolve one handler parameter from the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The payload is unreadable or not JSON. Shared by every parameter of the request.
    MalformedBody(BodyFault),
    /// A required parameter has no value under its key and cannot fall back.
    MissingRequired {
        /// The JSON key that was looked up
        key: String,
    },
    /// A located value cannot be converted to the declared scalar type.
    Coercion {
        key: String,
        expected: &'static str,
        found: String,
    },
    /// Structural deserialization into the declared type failed.
    Deserialize {
        key: String,
        type_name: String,
        message: String,
    },
    /// Whole-body fallback left declared fields absent or null while the parameter is required.
    FieldsIncomplete {
        key: String,
        type_name: String,
        missing: Vec<String>,
    },
}

impl BindError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BindError::MalformedBody(_) => FailureKind::MalformedBody,
            BindError::MissingRequired { .. } => FailureKind::MissingRequired,
            BindError::Coercion { .. } => FailureKind::CoercionError,
            BindError::Deserialize { .. } => FailureKind::DeserializeError,
            BindError::FieldsIncomplete { .. } => FailureKind::FieldsIncompleteAndRequired,
        }
    }

    /// The JSON key the failure relates to, if it is parameter specific.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            BindError::MalformedBody(_) => None,
            BindError::MissingRequired { key }
            | BindError::Coercion { key, .. }
            | BindError::Deserialize { key, .. }
            | BindError::FieldsIncomplete { key, .. } => Some(key),
        }
    }

    /// HTTP status a framework boundary should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            BindError::MalformedBody(BodyFault::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        BindError::MissingRequired {
            key: key.to_string(),
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MalformedBody(fault) => write!(f, "{fault}"),
            BindError::MissingRequired { key } => {
                write!(f, "required parameter '{key}' is not present")
            }
            BindError::Coercion {
                key,
                expected,
                found,
            } => write!(
                f,
                "parameter '{key}' cannot be read as {expected} (found {found})"
            ),
            BindError::Deserialize {
                key,
                type_name,
                message,
            } => write!(
                f,
                "parameter '{key}' cannot be deserialized into {type_name}: {message}"
            ),
            BindError::FieldsIncomplete {
                key,
                type_name,
                missing,
            } => write!(
                f,
                "required parameter '{key}' ({type_name}) is missing fields: {}",
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for BindError {}

/// Invalid handler binding declaration, reported at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingDeclError {
    /// Handler name is blank
    BlankHandlerName,
    /// A parameter has a blank source name
    BlankParameterName {
        handler: String,
    },
    /// Two parameters of one handler share a source name
    DuplicateParameter {
        handler: String,
        name: String,
    },
    /// The declared type token is not recognised
    UnknownType {
        handler: String,
        name: String,
        type_name: String,
    },
}

impl fmt::Display for BindingDeclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingDeclError::BlankHandlerName => write!(f, "handler name must not be blank"),
            BindingDeclError::BlankParameterName { handler } => {
                write!(f, "handler '{handler}' declares a parameter with a blank name")
            }
            BindingDeclError::DuplicateParameter { handler, name } => {
                write!(f, "handler '{handler}' declares parameter '{name}' twice")
            }
            BindingDeclError::UnknownType {
                handler,
                name,
                type_name,
            } => write!(
                f,
                "handler '{handler}' parameter '{name}' has unknown type '{type_name}'"
            ),
        }
    }
}

impl std::error::Error for BindingDeclError {}
