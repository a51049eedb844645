//! Code generation modules for projection-gen.
//!
//! This module contains generators that produce Rust source code from a
//! resolved [`Schema`](projection_define::Schema). Each submodule handles a
//! specific component of the generated crate.
//!
//! ## Submodules
//!
//! - [`resource`] - Generates one module per resource (constants, data
//!   holder, collection type)
//! - [`shared`] - Generates the shared helpers and metadata types
//! - [`types`] - Maps value types to Rust member types and omit predicates
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod resource;
pub mod shared;
pub mod types;

pub use resource::generate_resource_unit;
pub use shared::{SharedNeeds, generate_shared_module};
pub use types::{member_type, primitive_type, skip_predicate};
