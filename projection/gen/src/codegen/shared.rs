//! Generates `shared.rs`, the helpers used across resource modules.
//!
//! The module is only emitted when something needs it:
//! - `is_default` when any required primitive is omitted by default value
//! - `ResourceMeta`, `CollectionMeta` and `Pagination` when any resource is
//!   top-level

use proc_macro2::TokenStream;
use projection_define::Schema;
use quote::quote;

/// Which shared items a schema needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharedNeeds {
    /// Emit the `is_default` predicate.
    pub default_check: bool,
    /// Emit the resource and collection metadata types.
    pub resource_meta: bool,
}

impl SharedNeeds {
    pub fn for_schema(schema: &Schema) -> Self {
        Self {
            default_check: schema.has_default_omitted_fields(),
            resource_meta: schema.has_top_level(),
        }
    }

    /// Returns `true` if `shared.rs` must be emitted.
    pub fn any(&self) -> bool {
        self.default_check || self.resource_meta
    }
}

/// Generates the shared module for `needs`.
pub fn generate_shared_module(needs: SharedNeeds) -> TokenStream {
    let imports = needs.resource_meta.then(|| {
        quote! {
            use std::collections::BTreeMap;

            use serde::{Deserialize, Serialize};
        }
    });
    let default_check = needs.default_check.then(generate_is_default);
    let resource_meta = needs.resource_meta.then(generate_metadata_types);

    quote! {
        //! Types and helpers shared by the generated resource modules.

        #imports

        #default_check

        #resource_meta
    }
}

fn generate_is_default() -> TokenStream {
    quote! {
        /// Returns `true` if `value` equals its type's default.
        ///
        /// Required members are left off the wire while they hold their
        /// default value.
        pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
            *value == T::default()
        }
    }
}

fn generate_metadata_types() -> TokenStream {
    quote! {
        /// Metadata carried by every top-level resource.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct ResourceMeta {
            /// Resource identifier.
            #[serde(rename = "id", default, skip_serializing_if = "String::is_empty")]
            pub id: String,
            /// Wire type tag.
            #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
            pub r#type: String,
            /// Related endpoints by name.
            #[serde(rename = "links", default, skip_serializing_if = "BTreeMap::is_empty")]
            pub links: BTreeMap<String, String>,
            /// Actions that can be invoked on the resource, by name.
            #[serde(rename = "actions", default, skip_serializing_if = "BTreeMap::is_empty")]
            pub actions: BTreeMap<String, String>,
        }

        /// Metadata carried by a collection of top-level resources.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct CollectionMeta {
            /// Wire type tag, always `collection`.
            #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
            pub r#type: String,
            /// Related endpoints by name.
            #[serde(rename = "links", default, skip_serializing_if = "BTreeMap::is_empty")]
            pub links: BTreeMap<String, String>,
            /// Creation endpoints by type tag.
            #[serde(rename = "createTypes", default, skip_serializing_if = "BTreeMap::is_empty")]
            pub create_types: BTreeMap<String, String>,
            /// Collection-level actions by name.
            #[serde(rename = "actions", default, skip_serializing_if = "BTreeMap::is_empty")]
            pub actions: BTreeMap<String, String>,
            /// Paging state.
            #[serde(rename = "pagination", default, skip_serializing_if = "Option::is_none")]
            pub pagination: Option<Pagination>,
            /// Type tag of the collected resources.
            #[serde(rename = "resourceType", default, skip_serializing_if = "String::is_empty")]
            pub resource_type: String,
        }

        /// Paging state of a collection response.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct Pagination {
            #[serde(rename = "marker", default, skip_serializing_if = "Option::is_none")]
            pub marker: Option<String>,
            #[serde(rename = "first", default, skip_serializing_if = "Option::is_none")]
            pub first: Option<String>,
            #[serde(rename = "previous", default, skip_serializing_if = "Option::is_none")]
            pub previous: Option<String>,
            #[serde(rename = "next", default, skip_serializing_if = "Option::is_none")]
            pub next: Option<String>,
            #[serde(rename = "last", default, skip_serializing_if = "Option::is_none")]
            pub last: Option<String>,
            #[serde(rename = "limit", default, skip_serializing_if = "Option::is_none")]
            pub limit: Option<i64>,
            #[serde(rename = "total", default, skip_serializing_if = "Option::is_none")]
            pub total: Option<i64>,
            #[serde(rename = "partial", default, skip_serializing_if = "Option::is_none")]
            pub partial: Option<bool>,
        }
    }
}
