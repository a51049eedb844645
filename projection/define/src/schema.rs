//! The resolved schema snapshot handed to the emitter.

use std::collections::BTreeSet;

use crate::resource::{OmitPolicy, ResourceSpec};
use crate::types::Primitive;

/// A validated schema snapshot.
///
/// Resources are ordered by type tag and every reference holds the target's
/// type tag. The snapshot is read-only input to emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Resources ordered lexicographically by type tag.
    pub resources: Vec<ResourceSpec>,
    /// Schema snapshot labels found in the input documents, sorted.
    pub versions: Vec<String>,
    /// Singular reference edges `(owner tag, target tag)` that lie on a
    /// reference cycle.
    pub recursive_edges: BTreeSet<(String, String)>,
}

impl Schema {
    /// Looks up a resource by type tag.
    pub fn get(&self, type_tag: &str) -> Option<&ResourceSpec> {
        self.resources
            .binary_search_by(|resource| resource.type_tag.as_str().cmp(type_tag))
            .ok()
            .map(|index| &self.resources[index])
    }

    /// Returns `true` if a singular reference from `owner` to `target` must be
    /// boxed to keep the owning type finite.
    pub fn is_recursive_edge(&self, owner: &str, target: &str) -> bool {
        self.recursive_edges
            .contains(&(owner.to_string(), target.to_string()))
    }

    /// Returns `true` if any resource is a top-level API resource.
    pub fn has_top_level(&self) -> bool {
        self.resources.iter().any(|resource| resource.top_level)
    }

    /// Returns `true` if any field is omitted by comparing against its default.
    pub fn has_default_omitted_fields(&self) -> bool {
        self.resources
            .iter()
            .flat_map(|resource| &resource.fields)
            .any(|field| field.omit_policy() == OmitPolicy::IfDefault)
    }

    /// Returns `true` if any field's type contains `primitive`.
    pub fn uses_primitive(&self, primitive: Primitive) -> bool {
        self.resources
            .iter()
            .flat_map(|resource| &resource.fields)
            .any(|field| field.value_type.contains_primitive(primitive))
    }
}
