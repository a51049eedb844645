//! Schema document types.
//!
//! A schema document is the generator's input: a list of resource
//! declarations, each with an ordered list of field declarations. Documents
//! are written in YAML or JSON and deserialized into [`SchemaDocument`].
//!
//! Names in a document are *declared* names. The generator projects them into
//! wire names and Rust identifiers; explicit overrides (`typeTag`,
//! `serializedName`) are kept verbatim.
//!
//! ## Examples
//!
//! ```
//! use projection_define::SchemaDocument;
//!
//! let yaml = r#"
//! version: v3
//! resources:
//!   - name: QueryClusterGraph
//!     fields:
//!       - name: GraphName
//!         type: string
//!         serializedName: graphID
//! "#;
//!
//! let doc: SchemaDocument = serde_yaml::from_str(yaml).unwrap();
//! assert_eq!(doc.resources[0].fields[0].serialized_name.as_deref(), Some("graphID"));
//! ```

use serde::{Deserialize, Serialize};

/// A complete schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDocument {
    /// Label of the upstream schema snapshot (e.g. an API version).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Resource declarations, in document order.
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,
}

/// A resource declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceDecl {
    /// Declared name; the Rust type name and default type tag derive from it.
    pub name: String,
    /// Explicit wire type tag, used verbatim instead of the projected name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// Marks a top-level API resource that carries resource metadata and
    /// gets a collection type.
    #[serde(default, rename = "resource")]
    pub top_level: bool,
    /// Human-readable description, emitted as documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field declarations, in the order they are emitted.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// A field declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDecl {
    /// Declared name; the Rust member name and default wire name derive from it.
    pub name: String,
    /// Type expression (`string`, `Condition`, `array[int]`, `map[Label]`, ...).
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Whether the field may be absent (rendered as a nullable member).
    #[serde(default)]
    pub optional: bool,
    /// Explicit wire name, used verbatim instead of the projected name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
    /// Human-readable description, emitted as documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed values for enum-like fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}
