//! Projected resource and field models.
//!
//! These are the generator's working types: declarations from a
//! [`SchemaDocument`](crate::SchemaDocument) after name projection. Every
//! field carries an explicit [`WireDescriptor`] (wire name + omit policy)
//! instead of relying on naming conventions at serialization time.

use crate::types::ValueType;

/// When a member is left out of serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OmitPolicy {
    /// Nullable member, omitted when unset.
    IfAbsent,
    /// Sequence or mapping, omitted when it has no entries.
    IfEmpty,
    /// Required scalar, omitted when it holds its type's default value.
    IfDefault,
}

/// Serialization descriptor of a single field.
///
/// The same name is used for every supported wire format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireDescriptor {
    /// Key used on the wire.
    pub name: String,
    /// Omission rule for absent/empty/default values.
    pub omit: OmitPolicy,
}

/// A projected field.
///
/// ## Examples
///
/// ```
/// use projection_define::{FieldSpec, OmitPolicy, Primitive, ValueType};
///
/// let field = FieldSpec {
///     serialized_name: "alertState".to_string(),
///     local_name: "alert_state".to_string(),
///     declared_name: "alertState".to_string(),
///     value_type: ValueType::Primitive(Primitive::String),
///     optional: true,
///     description: None,
///     options: vec![],
/// };
///
/// assert_eq!(field.wire().name, "alertState");
/// assert_eq!(field.wire().omit, OmitPolicy::IfAbsent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (projected or explicit override).
    pub serialized_name: String,
    /// Rust member name in snake_case, before keyword escaping.
    pub local_name: String,
    /// Name as written in the schema document.
    pub declared_name: String,
    /// The field's value type.
    pub value_type: ValueType,
    /// Whether the field may be absent.
    pub optional: bool,
    /// Documentation text.
    pub description: Option<String>,
    /// Allowed values for enum-like fields.
    pub options: Vec<String>,
}

impl FieldSpec {
    /// Returns `true` if the field holds an ordered sequence.
    pub fn is_list(&self) -> bool {
        self.value_type.is_list()
    }

    /// Returns `true` if the field holds a string-keyed mapping.
    pub fn is_map(&self) -> bool {
        self.value_type.is_map()
    }

    /// Returns `true` if the member is rendered as a nullable value.
    ///
    /// Singular references are always nullable; containers never are, an
    /// empty container already stands for "absent".
    pub fn is_nullable(&self) -> bool {
        match &self.value_type {
            ValueType::Reference(_) => true,
            ValueType::List(_) | ValueType::Map(_) => false,
            ValueType::Primitive(_) => self.optional,
        }
    }

    /// Returns the omission rule derived from the value type and optionality.
    pub fn omit_policy(&self) -> OmitPolicy {
        if self.value_type.is_container() {
            OmitPolicy::IfEmpty
        } else if self.is_nullable() {
            OmitPolicy::IfAbsent
        } else {
            OmitPolicy::IfDefault
        }
    }

    /// Returns the field's serialization descriptor.
    pub fn wire(&self) -> WireDescriptor {
        WireDescriptor {
            name: self.serialized_name.clone(),
            omit: self.omit_policy(),
        }
    }
}

/// A projected resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Wire type tag (projected or explicit override); unique per schema.
    pub type_tag: String,
    /// Name as written in the schema document.
    pub declared_name: String,
    /// Rust type name in UpperCamelCase.
    pub type_name: String,
    /// Rust module (and file stem) name in snake_case.
    pub module_name: String,
    /// Whether this is a top-level API resource.
    pub top_level: bool,
    /// Documentation text.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl ResourceSpec {
    /// Returns the name of the generated collection type.
    pub fn collection_type_name(&self) -> String {
        format!("{}Collection", self.type_name)
    }
}
