//! # Dispatcher Module
//!
//! Runs registered handlers with their body parameters already resolved.
//!
//! ## Overview
//!
//! The dispatcher is the framework boundary for body binding. It:
//! - Keeps a registry of handlers and their [`crate::binding::HandlerBindings`]
//! - Resolves every declared parameter against the request's single cached body
//! - Turns binding failures into RFC 7807 problem responses
//! - Catches handler panics and answers 500
//!
//! ## Handler Registration
//!
//! ```rust
//! use http::Method;
//! use multibody::binding::{HandlerBindings, ParameterDescriptor};
//! use multibody::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
//! use multibody::body::RequestContext;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .register(
//!         HandlerBindings::new("basic_type").param(ParameterDescriptor::of::<i32>("param1")),
//!         |args, _req| {
//!             let n: i32 = args.get("param1").unwrap_or_default();
//!             HandlerResponse::json(200, serde_json::json!({ "param1": n }))
//!         },
//!     )
//!     .unwrap();
//!
//! let req = HandlerRequest::new(
//!     Method::POST,
//!     "/basic",
//!     "basic_type",
//!     RequestContext::from_body(r#"{"param1": "5"}"#),
//! );
//! let resp = dispatcher.dispatch(req);
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body["param1"], 5);
//! ```
//!
//! ## Error Handling
//!
//! - Unknown handlers return 404 responses
//! - Binding failures return 400 (413 for oversized bodies) problem responses
//! - Handler panics are caught and return 500 responses

mod core;

pub use core::{
    Dispatcher, HandlerFn, HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS,
};
