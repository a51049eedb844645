//! Projection Definition Library
//!
//! This crate provides the types consumed by the `projection-gen` binary to
//! generate per-resource Rust data holders from a remote API's resource
//! schema.
//!
//! ## Core Types
//!
//! ### Schema Documents
//!
//! - [`SchemaDocument`] - A YAML/JSON document listing resource declarations
//! - [`ResourceDecl`] - One declared resource kind with its fields
//! - [`FieldDecl`] - One declared field with its type expression and overrides
//!
//! ### Projected Model
//!
//! - [`Schema`] - The validated, resolved snapshot handed to the emitter
//! - [`ResourceSpec`] - A resource with projected wire and Rust names
//! - [`FieldSpec`] - A field with its wire name, local name and value type
//! - [`WireDescriptor`] / [`OmitPolicy`] - Per-field serialization contract
//!
//! ### Value Types
//!
//! - [`ValueType`] - Primitive, reference, `array[T]` or `map[T]`
//! - [`Primitive`] - Scalar wire types
//!
//! ## Examples
//!
//! ```
//! use projection_define::{Primitive, SchemaDocument, ValueType};
//!
//! let doc: SchemaDocument = serde_json::from_str(
//!     r#"{"resources":[{"name":"AlertStatus","fields":[
//!         {"name":"alertState","type":"string","optional":true}
//!     ]}]}"#,
//! )
//! .unwrap();
//!
//! let ty: ValueType = doc.resources[0].fields[0].type_expr.parse().unwrap();
//! assert_eq!(ty, ValueType::Primitive(Primitive::String));
//! ```

pub mod document;
pub mod error;
pub mod prelude;
pub mod resource;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use document::{FieldDecl, ResourceDecl, SchemaDocument};
pub use error::TypeExprError;
pub use resource::{FieldSpec, OmitPolicy, ResourceSpec, WireDescriptor};
pub use schema::Schema;
pub use types::{Primitive, ValueType};
