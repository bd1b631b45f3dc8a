//! # Resolver Module
//!
//! Resolves exactly one value for one body-bound parameter.
//!
//! ## Resolution state machine
//!
//! ```text
//! KeyLookup ──found──▶ Coerce ──▶ Resolved | CoercionError
//!     │
//!     └─not found─▶ required scalar ─────────────────────────▶ MissingRequired
//!                   required structured, fallback disabled ──▶ MissingRequired
//!                   optional structured, fallback disabled ──▶ Resolved(absent)
//!                   otherwise ─▶ FallbackWholeObject
//!                                  ├─ deserialize failed ───▶ DeserializeError
//!                                  │    (optional scalar: Resolved(absent))
//!                                  ├─ optional ─────────────▶ Resolved
//!                                  └─ required, declared field
//!                                     absent or null ───────▶ FieldsIncompleteAndRequired
//! ```
//!
//! Before any of this the body tree is fetched from the [`RequestContext`];
//! an unreadable or non-JSON body fails every parameter with `MalformedBody`.
//!
//! ## Failure policy
//!
//! Under [`FailurePolicy::Strict`] every failure reaches the caller as a
//! [`BindError`]. [`FailurePolicy::Lenient`] turns every failure into an
//! absent value and logs it at `warn`, which keeps handler signatures simple
//! but makes a malformed body indistinguishable from a missing optional field.
//!
//! ## Usage
//!
//! ```rust
//! use multibody::binding::{ParameterDescriptor, ScalarType, TypeKind};
//! use multibody::body::RequestContext;
//! use multibody::resolver::{BoundValue, Resolver};
//!
//! let ctx = RequestContext::from_body(r#"{"foo": 1, "bar": 2}"#);
//! let param = ParameterDescriptor::new("bar", TypeKind::Primitive(ScalarType::Int)).key("foo");
//! let value = Resolver::default().resolve(&param, &ctx).unwrap();
//! assert_eq!(value, Some(BoundValue::Int(1)));
//! ```

pub mod coerce;
pub mod fallback;
pub mod key;
mod value;

pub use value::BoundValue;

use crate::binding::{HandlerBindings, ParameterDescriptor, TypeKind};
use crate::body::RequestContext;
use crate::error::BindError;
use crate::runtime_config::{BindConfig, FailurePolicy};
use crate::typed::BoundArgs;
use tracing::{debug, warn};

/// Orchestrates key lookup, coercion and fallback for one parameter at a time.
///
/// Holds no per-request state; one resolver serves every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    config: BindConfig,
}

impl Resolver {
    pub fn new(config: BindConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Resolve one parameter against the request's body.
    ///
    /// `Ok(None)` means the parameter is legitimately absent (or, under the
    /// lenient policy, that resolution failed).
    pub fn resolve(
        &self,
        descriptor: &ParameterDescriptor,
        ctx: &RequestContext,
    ) -> Result<Option<BoundValue>, BindError> {
        let key = key::resolve_key(descriptor);
        match run(descriptor, key, ctx) {
            Ok(value) => {
                debug!(
                    parameter = %descriptor.source_name(),
                    key = %key,
                    outcome = if value.is_some() { "resolved" } else { "absent" },
                    "Body parameter resolved"
                );
                Ok(value)
            }
            Err(err) => match self.config.failure_policy {
                FailurePolicy::Strict => {
                    debug!(
                        parameter = %descriptor.source_name(),
                        key = %key,
                        failure = %err.kind(),
                        error = %err,
                        "Body parameter failed"
                    );
                    Err(err)
                }
                FailurePolicy::Lenient => {
                    warn!(
                        parameter = %descriptor.source_name(),
                        key = %key,
                        failure = %err.kind(),
                        error = %err,
                        "Body parameter failure surfaced as absent value"
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Resolve every parameter declared for a handler, in declaration order.
    ///
    /// Parameters are independent: each sees the same cached tree and none
    /// affects another's outcome. The first failure is returned.
    pub fn resolve_all(
        &self,
        bindings: &HandlerBindings,
        ctx: &RequestContext,
    ) -> Result<BoundArgs, BindError> {
        let mut args = BoundArgs::new();
        for descriptor in &bindings.parameters {
            let value = self.resolve(descriptor, ctx)?;
            args.push(descriptor.source_name(), value);
        }
        Ok(args)
    }
}

/// Resolve with the default (strict) configuration.
pub fn resolve(
    descriptor: &ParameterDescriptor,
    ctx: &RequestContext,
) -> Result<Option<BoundValue>, BindError> {
    Resolver::default().resolve(descriptor, ctx)
}

fn run(
    descriptor: &ParameterDescriptor,
    key: &str,
    ctx: &RequestContext,
) -> Result<Option<BoundValue>, BindError> {
    let tree = ctx.tree()?;
    let declared = descriptor.declared_type();

    if let Some(node) = key::lookup(tree, key) {
        return coerce::coerce(node, declared, key).map(Some);
    }

    let required = descriptor.is_required();
    let scalar = declared.is_scalar();
    if required && (scalar || !descriptor.allows_whole_object_fallback()) {
        return Err(BindError::missing(key));
    }
    if !scalar && !descriptor.allows_whole_object_fallback() {
        return Ok(None);
    }

    let incomplete = |missing: Vec<String>| BindError::FieldsIncomplete {
        key: key.to_string(),
        type_name: declared.name(),
        missing,
    };
    let missing = match declared {
        TypeKind::Structured(shape) if required => fallback::missing_fields(tree, shape.fields()),
        _ => Vec::new(),
    };

    let value = match fallback::whole_body(tree, declared, key) {
        Ok(value) => value,
        Err(err) if scalar => {
            debug!(key = %key, error = %err, "Optional scalar absent from body");
            return Ok(None);
        }
        // a non-optional field the body left out fails serde before the
        // presence check can run
        Err(_) if !missing.is_empty() => return Err(incomplete(missing)),
        Err(err) => return Err(err),
    };

    if !missing.is_empty() {
        return Err(incomplete(missing));
    }
    Ok(Some(value))
}
