//! # Binding Module
//!
//! Declarations of which handler parameters are filled from the JSON request
//! body, and how.
//!
//! ## Overview
//!
//! Each opted-in parameter is described by a [`ParameterDescriptor`]:
//!
//! - **source name** - the parameter's own identifier, used as the JSON key
//!   when no explicit key is given
//! - **declared type** - a closed [`TypeKind`] (primitive, boxed, string or
//!   structured) that drives coercion
//! - **options** - explicit key, `required`, and whole-object fallback
//!
//! Descriptors for one handler are grouped into [`HandlerBindings`] when the
//! handler is registered, either in code or from a declaration file:
//!
//! ```rust
//! use multibody::binding::{HandlerBindings, ParameterDescriptor, ScalarType, TypeKind};
//!
//! let bindings = HandlerBindings::new("pack_type").param(
//!     ParameterDescriptor::new("param", TypeKind::Boxed(ScalarType::Int)).key("id"),
//! );
//! assert!(bindings.supports_parameter("param"));
//! ```
//!
//! ## Declaration files
//!
//! ```yaml
//! handlers:
//!   create_order:
//!     parameters:
//!       - name: id
//!         type: i64
//!         key: orderId
//!       - name: customer
//!         type: object
//!         fields: [id, name]
//!         required: false
//! ```
//!
//! Supported `type` tokens are `bool`, `i8`, `i16`, `i32`, `i64`, `f32`,
//! `f64`, `char` (add `nullable: true` for the boxed form), `string`,
//! `object` and `array`. An `object` without `fields` binds the whole
//! object unchanged.

mod build;
mod load;
mod shape;
mod types;

pub use build::HandlerBindings;
pub use load::{load_bindings, load_bindings_from_str, DeclFormat};
pub use shape::{DeclaredShape, SerdeShape, StructuredShape, StructuredType};
pub use types::{BindingOptions, ParameterDescriptor, ScalarType, TypeKind};
