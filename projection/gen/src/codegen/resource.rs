//! Generates one self-contained module per resource.
//!
//! A unit holds, in order:
//!
//! 1. Module documentation
//! 2. The imports it actually uses
//! 3. The type-tag constant and one field-name constant per field
//! 4. The data holder struct, fields in declaration order
//! 5. For top-level resources, the `<Type>Collection` struct
//!
//! ## Example Output
//!
//! ```text
//! //! The `alertStatus` resource.
//!
//! use serde::{Deserialize, Serialize};
//!
//! /// Wire type tag of [`AlertStatus`].
//! pub const ALERT_STATUS_TYPE: &str = "alertStatus";
//! /// Wire name of `AlertStatus::alert_state`.
//! pub const ALERT_STATUS_FIELD_ALERT_STATE: &str = "alertState";
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! pub struct AlertStatus {
//!     #[serde(rename = "alertState", default, skip_serializing_if = "Option::is_none")]
//!     pub alert_state: Option<String>,
//! }
//! ```

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use projection_define::{FieldSpec, ResourceSpec, Schema};
use quote::{format_ident, quote};

use crate::codegen::types::{member_type, reference_target, skip_predicate, uses_map};
use crate::errors::GeneratorError;
use crate::naming::{field_constant, rust_ident, type_constant};

/// Generates the module for `resource`.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if a reference points outside
/// `schema`; loaded schemas never do.
pub fn generate_resource_unit(
    resource: &ResourceSpec,
    schema: &Schema,
) -> Result<TokenStream, GeneratorError> {
    let module_docs = inner_doc_attrs(&module_doc_lines(resource));
    let imports = generate_imports(resource, schema)?;
    let constants = generate_constants(resource);
    let data_holder = generate_data_holder(resource, schema)?;
    let collection = resource.top_level.then(|| generate_collection(resource));

    Ok(quote! {
        #module_docs

        #imports

        #constants

        #data_holder

        #collection
    })
}

fn module_doc_lines(resource: &ResourceSpec) -> Vec<String> {
    let mut lines = vec![format!("The `{}` resource.", resource.type_tag)];
    if let Some(description) = &resource.description {
        lines.push(String::new());
        lines.extend(description.lines().map(str::to_string));
    }
    lines
}

fn generate_imports(resource: &ResourceSpec, schema: &Schema) -> Result<TokenStream, GeneratorError> {
    let map_import = resource
        .fields
        .iter()
        .any(|field| uses_map(&field.value_type))
        .then(|| quote! { use std::collections::BTreeMap; });

    let meta_import = resource
        .top_level
        .then(|| quote! { use crate::shared::{CollectionMeta, ResourceMeta}; });

    // Referenced types, imported from their own modules.
    let mut targets = BTreeSet::new();
    for field in &resource.fields {
        for leaf in field.value_type.leaves() {
            if let Some(tag) = leaf.as_reference()
                && tag != resource.type_tag
            {
                let target = reference_target(tag, schema)?;
                targets.insert((target.module_name.as_str(), target.type_name.as_str()));
            }
        }
    }
    let reference_imports = targets.into_iter().map(|(module, type_name)| {
        let module = rust_ident(module);
        let type_name = format_ident!("{}", type_name);
        quote! { use crate::#module::#type_name; }
    });

    Ok(quote! {
        #map_import

        use serde::{Deserialize, Serialize};

        #meta_import
        #(#reference_imports)*
    })
}

fn generate_constants(resource: &ResourceSpec) -> TokenStream {
    let type_name = &resource.type_name;
    let type_const = format_ident!("{}", type_constant(type_name));
    let type_tag = &resource.type_tag;
    let type_doc = format!(" Wire type tag of [`{type_name}`].");

    let field_consts = resource.fields.iter().map(|field| {
        let name = format_ident!("{}", field_constant(type_name, &field.local_name));
        let wire = &field.serialized_name;
        let doc = format!(
            " Wire name of `{type_name}::{}`.",
            rust_ident(&field.local_name)
        );
        quote! {
            #[doc = #doc]
            pub const #name: &str = #wire;
        }
    });

    quote! {
        #[doc = #type_doc]
        pub const #type_const: &str = #type_tag;

        #(#field_consts)*
    }
}

fn generate_data_holder(resource: &ResourceSpec, schema: &Schema) -> Result<TokenStream, GeneratorError> {
    let name = format_ident!("{}", resource.type_name);
    let docs = match &resource.description {
        Some(description) => doc_attrs(&description.lines().map(str::to_string).collect::<Vec<_>>()),
        None => doc_attrs(&[format!("The `{}` resource.", resource.type_tag)]),
    };

    let meta = resource.top_level.then(|| {
        quote! {
            #[serde(flatten)]
            pub meta: ResourceMeta,
        }
    });

    let members = resource
        .fields
        .iter()
        .map(|field| generate_member(resource, field, schema))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct #name {
            #meta
            #(#members)*
        }
    })
}

fn generate_member(
    owner: &ResourceSpec,
    field: &FieldSpec,
    schema: &Schema,
) -> Result<TokenStream, GeneratorError> {
    let docs = doc_attrs(&field_doc_lines(field));
    let ident = rust_ident(&field.local_name);
    let ty = member_type(owner, field, schema)?;
    let wire = field.wire();
    let wire_name = &wire.name;
    let predicate = skip_predicate(field);

    Ok(quote! {
        #docs
        #[serde(rename = #wire_name, default, skip_serializing_if = #predicate)]
        pub #ident: #ty,
    })
}

fn field_doc_lines(field: &FieldSpec) -> Vec<String> {
    let mut lines: Vec<String> = field
        .description
        .as_deref()
        .map(|description| description.lines().map(str::to_string).collect())
        .unwrap_or_default();

    if !field.options.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let options: Vec<String> = field.options.iter().map(|o| format!("`{o}`")).collect();
        lines.push(format!("Allowed values: {}.", options.join(", ")));
    }

    lines
}

fn generate_collection(resource: &ResourceSpec) -> TokenStream {
    let name = format_ident!("{}", resource.collection_type_name());
    let item = format_ident!("{}", resource.type_name);
    let doc = format!(" A page of [`{}`] resources.", resource.type_name);

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct #name {
            #[serde(flatten)]
            pub meta: CollectionMeta,
            #[serde(rename = "data", default, skip_serializing_if = "Vec::is_empty")]
            pub data: Vec<#item>,
        }
    }
}

/// Outer doc attributes, one per line.
fn doc_attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| doc_line(line));
    quote! { #(#[doc = #lines])* }
}

/// Inner (module) doc attributes, one per line.
fn inner_doc_attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| doc_line(line));
    quote! { #(#![doc = #lines])* }
}

/// Doc comments render as `/// text`, so non-empty lines get a leading space.
fn doc_line(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        String::new()
    } else {
        format!(" {line}")
    }
}
