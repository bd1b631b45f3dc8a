//! # multibody
//!
//! **multibody** binds several independently-typed handler parameters from a
//! single JSON request body.
//!
//! ## Overview
//!
//! Web frameworks usually bind a JSON body to exactly one handler argument.
//! multibody lets a handler declare many body-bound parameters, each with its
//! own name, type and binding options, and fills every one of them from the
//! same payload:
//!
//! ```text
//! {"param1": 1, "param2": "true", "param3": 2.5}
//!     ├── param1: i32   ──▶ 1
//!     ├── param2: bool  ──▶ true
//!     └── param3: f64   ──▶ 2.5
//! ```
//!
//! ## Architecture
//!
//! - **[`binding`]** - Parameter descriptors, handler declarations and declaration files
//! - **[`body`]** - Per-request body cache and JSON tree
//! - **[`resolver`]** - Key lookup, type coercion, whole-body fallback and the orchestrator
//! - **[`typed`]** - Mapping Rust types onto declared kinds
//! - **[`dispatcher`]** - Handler registry that resolves parameters and reports failures
//! - **[`error`]** - The failure taxonomy
//! - **[`runtime_config`]** - Environment configuration
//! - **[`logging`]** - Subscriber setup for binaries
//! - **[`cli`]** - The `multibody` command-line tool
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Dispatcher
//!     participant Resolver
//!     participant Ctx as RequestContext
//!     participant Transport
//!
//!     Dispatcher->>Resolver: resolve_all(bindings, ctx)
//!     loop every declared parameter
//!         Resolver->>Ctx: tree()
//!         alt first access
//!             Ctx->>Transport: read to end (once)
//!             Ctx->>Ctx: parse JSON, cache tree
//!         end
//!         Ctx-->>Resolver: &Value
//!         Resolver->>Resolver: resolve key (explicit or parameter name)
//!         alt key present
//!             Resolver->>Resolver: coerce to declared type
//!         else key absent
//!             Resolver->>Resolver: whole-body fallback or MissingRequired
//!         end
//!     end
//!     alt any failure
//!         Resolver-->>Dispatcher: BindError
//!         Dispatcher-->>Dispatcher: 400/413 problem response
//!     else all resolved
//!         Resolver-->>Dispatcher: BoundArgs
//!         Dispatcher->>Dispatcher: run handler
//!     end
//! ```
//!
//! ### Key Rules
//!
//! 1. **One read per request**: the transport is consumed once; text and tree are cached
//! 2. **Declared type drives coercion**: `"42"` and `42` bind identically to an `i32`
//! 3. **Explicit key beats parameter name**
//! 4. **Whole-body fallback**: a structured parameter with no key match takes the entire body
//! 5. **Shared failures**: a malformed body fails every parameter the same way
//!
//! ## Quick Start
//!
//! ```rust
//! use multibody::binding::ParameterDescriptor;
//! use multibody::body::RequestContext;
//! use multibody::resolver::Resolver;
//! use multibody::typed::extract;
//!
//! let ctx = RequestContext::from_body(r#"{"param1": 1, "param2": "true", "param3": 2.5}"#);
//! let resolver = Resolver::default();
//!
//! let p1: i32 = extract(&resolver, &ParameterDescriptor::of::<i32>("param1"), &ctx).unwrap();
//! let p2: bool = extract(&resolver, &ParameterDescriptor::of::<bool>("param2"), &ctx).unwrap();
//! let p3: f64 = extract(&resolver, &ParameterDescriptor::of::<f64>("param3"), &ctx).unwrap();
//! assert_eq!((p1, p2, p3), (1, true, 2.5));
//! assert_eq!(ctx.transport_reads(), 1);
//! ```
//!
//! ## Failure Policy
//!
//! By default every failure is a typed [`BindError`] and the dispatcher
//! answers 400 (or 413 for oversized bodies). Setting
//! `MULTIBODY_FAILURE_POLICY=lenient` turns failures into absent values for
//! code that expects "not supplied" semantics; each one is logged at `warn`.

pub mod binding;
pub mod body;
pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod runtime_config;
pub mod typed;

pub use binding::{HandlerBindings, ParameterDescriptor, ScalarType, TypeKind};
pub use body::RequestContext;
pub use error::{BindError, BindingDeclError, BodyFault, FailureKind};
pub use resolver::{BoundValue, Resolver};
pub use runtime_config::{BindConfig, FailurePolicy};
pub use typed::{extract, BodyParam, BoundArgs, Json};
