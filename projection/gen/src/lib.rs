//! Projection code generator library.
//!
//! This crate generates typed Rust data holders from resource schema
//! documents read with `projection-define`. The generated crate includes:
//!
//! - One module per resource with a type-tag constant, one wire-name constant
//!   per field, and a serde data holder
//! - A `<Type>Collection` type for every top-level resource
//! - A `shared` module with the helpers the units need
//! - A `lib.rs` that declares and re-exports every module
//!
//! ## Modules
//!
//! - [`loader`] - Schema document loading and name projection
//! - [`naming`] - Word splitting and case projection
//! - [`validation`] - Duplicate and identifier checks
//! - [`resolve`] - Reference resolution and cycle detection
//! - [`codegen`] - Code generation for individual units
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for the output package
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use projection_gen::loader::load_schema_files;
//! use projection_gen::output::{GenerateOptions, generate_and_write};
//!
//! let schema = load_schema_files(&[PathBuf::from("schema/alerting.yaml")]).unwrap();
//! let report = generate_and_write(&schema, &GenerateOptions::new("generated/src")).unwrap();
//! println!("{} files written", report.files.len());
//! ```
//!
//! ## Generated Code Structure
//!
//! For a resource `AlertStatus` with an optional string field `alertState`:
//!
//! ```text
//! pub const ALERT_STATUS_TYPE: &str = "alertStatus";
//! pub const ALERT_STATUS_FIELD_ALERT_STATE: &str = "alertState";
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! pub struct AlertStatus {
//!     #[serde(rename = "alertState", default, skip_serializing_if = "Option::is_none")]
//!     pub alert_state: Option<String>,
//! }
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod errors;
pub mod loader;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
