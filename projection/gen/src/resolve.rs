//! Reference resolution.
//!
//! Field types may name other resources by declared name or by type tag.
//! Resolution rewrites every reference to the target's type tag and finds
//! the singular references that form cycles, which are boxed in the
//! generated code to keep the owning type finitely sized.

use std::collections::{BTreeMap, BTreeSet};

use projection_define::{ResourceSpec, ValueType};

use crate::errors::GeneratorError;

/// Rewrites every reference to the type tag of its target.
///
/// A target is looked up by declared name first, then by type tag.
///
/// ## Errors
///
/// Returns `GeneratorError::UnresolvedReference` if a target names no
/// resource in the schema.
pub fn resolve_references(resources: &mut [ResourceSpec]) -> Result<(), GeneratorError> {
    let mut lookup: BTreeMap<String, String> = BTreeMap::new();
    for resource in resources.iter() {
        lookup.insert(resource.type_tag.clone(), resource.type_tag.clone());
    }
    // Declared names win over type tags.
    for resource in resources.iter() {
        lookup.insert(resource.declared_name.clone(), resource.type_tag.clone());
    }

    for resource in resources.iter_mut() {
        for field in &mut resource.fields {
            for leaf in field.value_type.leaves_mut() {
                let ValueType::Reference(target) = leaf else {
                    continue;
                };

                let Some(tag) = lookup.get(target.as_str()) else {
                    return Err(GeneratorError::UnresolvedReference {
                        resource: resource.declared_name.clone(),
                        field: field.declared_name.clone(),
                        target: target.clone(),
                    });
                };
                *target = tag.clone();
            }
        }
    }

    Ok(())
}

/// Finds singular reference edges `(owner, target)` that lie on a cycle.
///
/// Only direct references count: a reference inside a list or map is
/// already behind a heap allocation. References must be resolved first.
pub fn recursive_edges(resources: &[ResourceSpec]) -> BTreeSet<(String, String)> {
    let mut graph: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for resource in resources {
        let targets = graph.entry(resource.type_tag.as_str()).or_default();
        for field in &resource.fields {
            if let Some(target) = field.value_type.as_reference() {
                targets.insert(target);
            }
        }
    }

    let mut edges = BTreeSet::new();
    for (owner, targets) in &graph {
        for target in targets {
            if reaches(&graph, target, owner) {
                edges.insert((owner.to_string(), target.to_string()));
            }
        }
    }

    edges
}

/// Depth-first search over singular references.
fn reaches(graph: &BTreeMap<&str, BTreeSet<&str>>, from: &str, to: &str) -> bool {
    let mut visited = BTreeSet::new();
    let mut stack = vec![from];

    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(next) = graph.get(node) {
            stack.extend(next.iter().copied());
        }
    }

    false
}
