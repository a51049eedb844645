//! Convenient re-exports for working with projection definitions.
//!
//! ## Examples
//!
//! ```
//! use projection_define::prelude::*;
//!
//! let decl = ResourceDecl {
//!     name: "AlertStatus".to_string(),
//!     fields: vec![FieldDecl {
//!         name: "alertState".to_string(),
//!         type_expr: "string".to_string(),
//!         optional: true,
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! assert_eq!(decl.fields.len(), 1);
//! ```

pub use crate::document::{FieldDecl, ResourceDecl, SchemaDocument};
pub use crate::error::TypeExprError;
pub use crate::resource::{FieldSpec, OmitPolicy, ResourceSpec, WireDescriptor};
pub use crate::schema::Schema;
pub use crate::types::{Primitive, ValueType};
