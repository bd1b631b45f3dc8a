//! # Body Module
//!
//! Request-scoped access to the JSON payload.
//!
//! ## Overview
//!
//! An HTTP request body is a single-consumption stream, but a handler with
//! several body-bound parameters needs it once per parameter. A
//! [`RequestContext`] sits between the two:
//!
//! 1. The first parameter resolution reads the transport to the end (bounded by
//!    [`BodyLimits::max_body_bytes`]) and caches the text
//! 2. The text is parsed once into a `serde_json::Value` tree and cached
//! 3. Every later resolution for the same request reuses the cached tree
//!
//! A failed read or parse is cached as well, so a bad payload is rejected
//! identically for every parameter of the request instead of being accepted
//! for some and rejected for others.
//!
//! ## Usage
//!
//! ```rust
//! use multibody::body::RequestContext;
//!
//! let ctx = RequestContext::from_body(r#"{"id": 7}"#);
//! assert_eq!(ctx.tree().unwrap()["id"], 7);
//! assert_eq!(ctx.transport_reads(), 1);
//! ```
//!
//! Contexts are never shared between requests. Build one per request, pass
//! it by reference to every resolution, and drop it with the request.

mod context;
pub mod json;

pub use context::{BodyLimits, RequestContext};
