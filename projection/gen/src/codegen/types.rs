//! Rust type rendering for field value types.
//!
//! | value type | member type | omit predicate |
//! |---|---|---|
//! | optional primitive | `Option<T>` | `Option::is_none` |
//! | required primitive | `T` | `crate::shared::is_default` |
//! | reference | `Option<T>` (`Option<Box<T>>` on cycles) | `Option::is_none` |
//! | `array[T]` | `Vec<T>` | `Vec::is_empty` |
//! | `map[T]` | `BTreeMap<String, T>` | `BTreeMap::is_empty` |

use proc_macro2::TokenStream;
use projection_define::{FieldSpec, OmitPolicy, Primitive, ResourceSpec, Schema, ValueType};
use quote::{format_ident, quote};

use crate::errors::GeneratorError;

/// Path of the default-value predicate emitted into `shared.rs`.
pub const IS_DEFAULT_PATH: &str = "crate::shared::is_default";

/// Returns the Rust type of a primitive.
pub fn primitive_type(primitive: Primitive) -> TokenStream {
    match primitive {
        Primitive::String
        | Primitive::Date
        | Primitive::Enum
        | Primitive::Password
        | Primitive::Base64 => quote! { String },
        Primitive::Boolean => quote! { bool },
        Primitive::Int => quote! { i64 },
        Primitive::Float => quote! { f64 },
        Primitive::Json => quote! { serde_json::Value },
    }
}

/// Returns the Rust type of a value type, without any `Option` wrapper.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if a reference names a type tag
/// missing from `schema`.
pub fn value_type_tokens(value_type: &ValueType, schema: &Schema) -> Result<TokenStream, GeneratorError> {
    Ok(match value_type {
        ValueType::Primitive(primitive) => primitive_type(*primitive),
        ValueType::Reference(tag) => {
            let target = reference_target(tag, schema)?;
            let ident = format_ident!("{}", target.type_name);
            quote! { #ident }
        }
        ValueType::List(inner) => {
            let inner = value_type_tokens(inner, schema)?;
            quote! { Vec<#inner> }
        }
        ValueType::Map(inner) => {
            let inner = value_type_tokens(inner, schema)?;
            quote! { BTreeMap<String, #inner> }
        }
    })
}

/// Returns the member type of `field` inside `owner`.
pub fn member_type(
    owner: &ResourceSpec,
    field: &FieldSpec,
    schema: &Schema,
) -> Result<TokenStream, GeneratorError> {
    let inner = value_type_tokens(&field.value_type, schema)?;

    Ok(match &field.value_type {
        ValueType::Reference(tag) if schema.is_recursive_edge(&owner.type_tag, tag) => {
            quote! { Option<Box<#inner>> }
        }
        _ if field.is_nullable() => quote! { Option<#inner> },
        _ => inner,
    })
}

/// Returns the `skip_serializing_if` predicate for `field`.
pub fn skip_predicate(field: &FieldSpec) -> &'static str {
    match field.omit_policy() {
        OmitPolicy::IfAbsent => "Option::is_none",
        OmitPolicy::IfEmpty if field.is_map() => "BTreeMap::is_empty",
        OmitPolicy::IfEmpty => "Vec::is_empty",
        OmitPolicy::IfDefault => IS_DEFAULT_PATH,
    }
}

/// Returns `true` if the value type mentions a map at any depth.
pub fn uses_map(value_type: &ValueType) -> bool {
    match value_type {
        ValueType::Map(_) => true,
        ValueType::List(inner) => uses_map(inner),
        _ => false,
    }
}

/// Looks up the resource a resolved reference points at.
pub fn reference_target<'a>(
    tag: &str,
    schema: &'a Schema,
) -> Result<&'a ResourceSpec, GeneratorError> {
    schema.get(tag).ok_or_else(|| {
        GeneratorError::CodeGenError(format!("reference to unknown type tag '{tag}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{field_decl, optional_field, resource_decl, schema_of};

    fn render(tokens: TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn primitive_mapping() {
        assert_eq!(render(primitive_type(Primitive::Date)), "String");
        assert_eq!(render(primitive_type(Primitive::Boolean)), "bool");
        assert_eq!(render(primitive_type(Primitive::Int)), "i64");
        assert_eq!(render(primitive_type(Primitive::Float)), "f64");
        assert_eq!(render(primitive_type(Primitive::Json)), "serde_json::Value");
    }

    #[test]
    fn member_types_and_predicates() {
        let schema = schema_of(vec![
            resource_decl("Label", vec![]),
            resource_decl(
                "Holder",
                vec![
                    optional_field("name", "string"),
                    field_decl("count", "int"),
                    field_decl("label", "Label"),
                    field_decl("tags", "array[string]"),
                    optional_field("labels", "map[array[Label]]"),
                ],
            ),
        ]);
        let holder = schema.get("holder").unwrap();
        let member = |i: usize| render(member_type(holder, &holder.fields[i], &schema).unwrap());

        assert_eq!(member(0), "Option<String>");
        assert_eq!(member(1), "i64");
        assert_eq!(member(2), "Option<Label>");
        assert_eq!(member(3), "Vec<String>");
        assert_eq!(member(4), "BTreeMap<String,Vec<Label>>");

        let predicates: Vec<_> = holder.fields.iter().map(skip_predicate).collect();
        assert_eq!(
            predicates,
            vec![
                "Option::is_none",
                IS_DEFAULT_PATH,
                "Option::is_none",
                "Vec::is_empty",
                "BTreeMap::is_empty"
            ]
        );
    }

    #[test]
    fn recursive_references_are_boxed() {
        let schema = schema_of(vec![resource_decl(
            "Node",
            vec![field_decl("parent", "Node"), field_decl("children", "array[Node]")],
        )]);
        let node = schema.get("node").unwrap();

        assert_eq!(
            render(member_type(node, &node.fields[0], &schema).unwrap()),
            "Option<Box<Node>>"
        );
        assert_eq!(
            render(member_type(node, &node.fields[1], &schema).unwrap()),
            "Vec<Node>"
        );
    }

    #[test]
    fn map_detection_descends_lists() {
        let ty: ValueType = "array[map[int]]".parse().unwrap();
        assert!(uses_map(&ty));
        let ty: ValueType = "array[int]".parse().unwrap();
        assert!(!uses_map(&ty));
    }

    #[test]
    fn unknown_reference_is_a_codegen_error() {
        let schema = Schema::default();
        let result = value_type_tokens(&ValueType::Reference("ghost".to_string()), &schema);
        assert!(matches!(result, Err(GeneratorError::CodeGenError(_))));
    }
}
