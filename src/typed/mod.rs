//! # Typed Module
//!
//! Strongly-typed access to body-bound parameters.
//!
//! ## Overview
//!
//! The resolver produces loosely tagged [`crate::resolver::BoundValue`]s. This
//! module maps Rust types onto declared [`crate::binding::TypeKind`]s and back,
//! so a handler can ask for an `i32`, an `Option<bool>` or a `Json<Order>`
//! instead of matching on variants:
//!
//! | Rust type       | Declared kind          |
//! |-----------------|------------------------|
//! | `bool`, `i32`.. | `Primitive(scalar)`    |
//! | `Option<i32>`.. | `Boxed(scalar)`        |
//! | `String`        | `String`               |
//! | `Json<T>`       | `Structured(T)`        |
//!
//! ## Usage
//!
//! ```rust
//! use multibody::body::RequestContext;
//! use multibody::resolver::Resolver;
//! use multibody::typed::{extract, Json};
//! use multibody::binding::ParameterDescriptor;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Param {
//!     id: Option<i64>,
//!     name: Option<String>,
//! }
//!
//! let ctx = RequestContext::from_body(r#"{"id": 7, "name": "x"}"#);
//! let resolver = Resolver::default();
//!
//! let id: i32 = extract(&resolver, &ParameterDescriptor::of::<i32>("id"), &ctx).unwrap();
//! assert_eq!(id, 7);
//!
//! // No "param" key: the whole body is deserialized instead
//! let param = ParameterDescriptor::of::<Json<Param>>("param");
//! let Json(p) = extract::<Json<Param>>(&resolver, &param, &ctx).unwrap();
//! assert_eq!(p.name.as_deref(), Some("x"));
//! ```
//!
//! Handlers registered with the dispatcher receive a [`BoundArgs`] holding
//! every declared parameter and read them by name with [`BoundArgs::get`].

mod args;
mod core;

pub use args::{ArgVec, BoundArgs, MAX_INLINE_ARGS};
pub use core::{extract, BodyParam, Json};
