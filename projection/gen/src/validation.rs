//! Validation of projected resources before code generation.
//!
//! Running these checks up front turns problems that would otherwise show up
//! as confusing compile errors in the generated crate into precise generator
//! errors.
//!
//! ## Validation Checks
//!
//! - **Duplicate resources**: two resources share a type tag
//! - **Duplicate fields**: two fields of one resource share a wire name, or a
//!   top-level resource reuses a resource metadata key
//! - **Identifier collisions**: two generated items share a Rust name
//!   (types, modules, constants, members), or a reserved name is used
//!
//! ## Examples
//!
//! ```
//! use projection_define::ResourceDecl;
//! use projection_gen::loader::project_resource;
//! use projection_gen::validation::validate_resources;
//!
//! let decl = ResourceDecl { name: "AlertStatus".to_string(), ..Default::default() };
//! let resource = project_resource(&decl, "inline").unwrap();
//!
//! assert!(validate_resources(&[resource.clone()]).is_ok());
//! assert!(validate_resources(&[resource.clone(), resource]).is_err());
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use projection_define::ResourceSpec;

use crate::errors::GeneratorError;
use crate::naming::{field_constant, rust_ident, type_constant};

/// Module names used by the crate skeleton.
const RESERVED_MODULES: &[&str] = &["lib", "shared"];

/// Type names that generated units import or declare themselves.
const RESERVED_TYPES: &[&str] = &[
    "Self",
    "String",
    "Vec",
    "Option",
    "Box",
    "BTreeMap",
    "Serialize",
    "Deserialize",
    "Value",
    "ResourceMeta",
    "CollectionMeta",
    "Pagination",
];

/// Wire keys carried by the flattened resource metadata.
pub const RESOURCE_META_KEYS: &[&str] = &["id", "type", "links", "actions"];

/// Member name of the flattened metadata on top-level resources.
pub const META_MEMBER: &str = "meta";

/// Validates projected resources before resolution and generation.
///
/// Checks run in order; the first failure is returned.
///
/// ## Errors
///
/// - `GeneratorError::DuplicateResource` for a repeated type tag
/// - `GeneratorError::DuplicateField` for a repeated wire name in a resource
/// - `GeneratorError::IdentifierCollision` for clashing or reserved Rust names
pub fn validate_resources(resources: &[ResourceSpec]) -> Result<(), GeneratorError> {
    check_duplicate_tags(resources)?;

    for resource in resources {
        check_duplicate_fields(resource)?;
        check_member_names(resource)?;
    }

    check_crate_identifiers(resources)
}

fn check_duplicate_tags(resources: &[ResourceSpec]) -> Result<(), GeneratorError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

    for resource in resources {
        if let Some(first) = seen.insert(&resource.type_tag, &resource.declared_name) {
            return Err(GeneratorError::DuplicateResource {
                type_tag: resource.type_tag.clone(),
                first: first.to_string(),
                second: resource.declared_name.clone(),
            });
        }
    }

    Ok(())
}

fn check_duplicate_fields(resource: &ResourceSpec) -> Result<(), GeneratorError> {
    let mut seen: Vec<&str> = Vec::with_capacity(resource.fields.len());

    for field in &resource.fields {
        let name = field.serialized_name.as_str();
        let reserved = resource.top_level && RESOURCE_META_KEYS.contains(&name);

        if reserved || seen.contains(&name) {
            return Err(GeneratorError::DuplicateField {
                resource: resource.declared_name.clone(),
                serialized_name: field.serialized_name.clone(),
            });
        }
        seen.push(name);
    }

    Ok(())
}

fn check_member_names(resource: &ResourceSpec) -> Result<(), GeneratorError> {
    let mut members: BTreeMap<String, String> = BTreeMap::new();

    if resource.top_level {
        members.insert(
            META_MEMBER.to_string(),
            format!("resource metadata of '{}'", resource.declared_name),
        );
    }

    for field in &resource.fields {
        let owner = format!("field '{}' of '{}'", field.declared_name, resource.declared_name);
        claim(&mut members, rust_ident(&field.local_name).to_string(), owner)?;
    }

    Ok(())
}

/// Every public item lands in one namespace through the `pub use` glob
/// re-exports in `lib.rs`.
fn check_crate_identifiers(resources: &[ResourceSpec]) -> Result<(), GeneratorError> {
    let mut items: BTreeMap<String, String> = BTreeMap::new();
    let mut modules: BTreeMap<String, String> = BTreeMap::new();

    for name in RESERVED_TYPES {
        items.insert(name.to_string(), "a reserved type name".to_string());
    }
    for name in RESERVED_MODULES {
        modules.insert(name.to_string(), "a reserved module name".to_string());
    }

    for resource in resources {
        let owner = |what: &str| format!("{what} of resource '{}'", resource.declared_name);

        claim(&mut modules, resource.module_name.clone(), owner("module"))?;
        claim(&mut items, resource.type_name.clone(), owner("type"))?;
        if resource.top_level {
            claim(
                &mut items,
                resource.collection_type_name(),
                owner("collection type"),
            )?;
        }

        claim(
            &mut items,
            type_constant(&resource.type_name),
            owner("type tag constant"),
        )?;
        for field in &resource.fields {
            claim(
                &mut items,
                field_constant(&resource.type_name, &field.local_name),
                format!(
                    "field constant of '{}.{}'",
                    resource.declared_name, field.declared_name
                ),
            )?;
        }
    }

    Ok(())
}

/// Records `identifier` for `owner`, failing if it is already taken.
fn claim(
    taken: &mut BTreeMap<String, String>,
    identifier: String,
    owner: String,
) -> Result<(), GeneratorError> {
    match taken.entry(identifier) {
        Entry::Vacant(entry) => {
            entry.insert(owner);
            Ok(())
        }
        Entry::Occupied(entry) => Err(GeneratorError::IdentifierCollision {
            identifier: entry.key().clone(),
            first: entry.get().clone(),
            second: owner,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{field_decl, project, resource_decl};
    use projection_define::ResourceDecl;

    #[test]
    fn distinct_resources_pass() {
        let resources = vec![
            project(resource_decl("AlertStatus", vec![field_decl("alertState", "string")])),
            project(resource_decl("Node", vec![field_decl("parent", "Node")])),
        ];

        assert!(validate_resources(&resources).is_ok());
    }

    #[test]
    fn duplicate_type_tag_is_rejected() {
        let resources = vec![
            project(resource_decl("AlertStatus", vec![])),
            project(ResourceDecl {
                type_tag: Some("alertStatus".to_string()),
                ..resource_decl("StatusOfAlert", vec![])
            }),
        ];

        match validate_resources(&resources) {
            Err(GeneratorError::DuplicateResource {
                type_tag,
                first,
                second,
            }) => {
                assert_eq!(type_tag, "alertStatus");
                assert_eq!(first, "AlertStatus");
                assert_eq!(second, "StatusOfAlert");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn duplicate_wire_name_is_rejected() {
        let resources = vec![project(resource_decl(
            "AlertStatus",
            vec![
                field_decl("alertState", "string"),
                field_decl("alert_state", "string"),
            ],
        ))];

        assert!(matches!(
            validate_resources(&resources),
            Err(GeneratorError::DuplicateField { serialized_name, .. }) if serialized_name == "alertState"
        ));
    }

    #[test]
    fn top_level_resources_reserve_metadata_keys() {
        let decl = ResourceDecl {
            top_level: true,
            ..resource_decl("ClusterAlertRule", vec![field_decl("id", "string")])
        };

        assert!(matches!(
            validate_resources(&[project(decl.clone())]),
            Err(GeneratorError::DuplicateField { .. })
        ));

        // Nested resources may use the same keys freely.
        let nested = ResourceDecl {
            top_level: false,
            ..decl
        };
        assert!(validate_resources(&[project(nested)]).is_ok());
    }

    #[test]
    fn top_level_resources_reserve_meta_member() {
        let decl = ResourceDecl {
            top_level: true,
            ..resource_decl("ClusterAlertRule", vec![field_decl("meta", "string")])
        };

        assert!(matches!(
            validate_resources(&[project(decl)]),
            Err(GeneratorError::IdentifierCollision { .. })
        ));
    }

    #[test]
    fn colliding_member_names_are_rejected() {
        let resources = vec![project(resource_decl(
            "AlertStatus",
            vec![
                field_decl("alertState", "string"),
                crate::test_utils::field_with_wire("AlertState", "string", "state"),
            ],
        ))];

        assert!(matches!(
            validate_resources(&resources),
            Err(GeneratorError::IdentifierCollision { identifier, .. }) if identifier == "alert_state"
        ));
    }

    #[test]
    fn colliding_type_names_are_rejected() {
        let resources = vec![
            project(resource_decl("alert_status", vec![])),
            project(ResourceDecl {
                type_tag: Some("alert-status".to_string()),
                ..resource_decl("AlertStatus", vec![])
            }),
        ];

        assert!(matches!(
            validate_resources(&resources),
            Err(GeneratorError::IdentifierCollision { .. })
        ));
    }

    #[test]
    fn collection_name_collides_with_resource() {
        let resources = vec![
            project(ResourceDecl {
                top_level: true,
                ..resource_decl("Cluster", vec![])
            }),
            project(resource_decl("ClusterCollection", vec![])),
        ];

        assert!(matches!(
            validate_resources(&resources),
            Err(GeneratorError::IdentifierCollision { identifier, .. }) if identifier == "ClusterCollection"
        ));
    }

    #[test]
    fn reserved_names_are_rejected() {
        for name in ["String", "Pagination", "Shared"] {
            let resources = vec![project(resource_decl(name, vec![]))];
            assert!(
                matches!(
                    validate_resources(&resources),
                    Err(GeneratorError::IdentifierCollision { .. })
                ),
                "{name} should be reserved"
            );
        }
    }

    #[test]
    fn constant_collisions_across_resources() {
        // ALERT_STATUS_FIELD_TYPE is both a field constant and a type constant.
        let resources = vec![
            project(resource_decl("AlertStatus", vec![field_decl("type", "string")])),
            project(resource_decl("AlertStatusField", vec![])),
        ];

        assert!(matches!(
            validate_resources(&resources),
            Err(GeneratorError::IdentifierCollision { identifier, .. }) if identifier == "ALERT_STATUS_FIELD_TYPE"
        ));
    }
}
