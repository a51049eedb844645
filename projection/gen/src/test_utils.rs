//! Shared test utilities for projection-gen tests.
//!
//! Helpers for building declarations, projected resources and resolved
//! schemas without going through schema documents on disk.

use projection_define::{FieldDecl, ResourceDecl, ResourceSpec, Schema, SchemaDocument};

use crate::loader::{build_schema, project_resource};

/// Creates a required field declaration.
pub fn field_decl(name: &str, type_expr: &str) -> FieldDecl {
    FieldDecl {
        name: name.to_string(),
        type_expr: type_expr.to_string(),
        ..Default::default()
    }
}

/// Creates an optional field declaration.
pub fn optional_field(name: &str, type_expr: &str) -> FieldDecl {
    FieldDecl {
        optional: true,
        ..field_decl(name, type_expr)
    }
}

/// Creates a field declaration with an explicit wire name.
pub fn field_with_wire(name: &str, type_expr: &str, wire: &str) -> FieldDecl {
    FieldDecl {
        serialized_name: Some(wire.to_string()),
        ..field_decl(name, type_expr)
    }
}

/// Creates a nested resource declaration.
pub fn resource_decl(name: &str, fields: Vec<FieldDecl>) -> ResourceDecl {
    ResourceDecl {
        name: name.to_string(),
        fields,
        ..Default::default()
    }
}

/// Creates a top-level resource declaration.
pub fn top_level_decl(name: &str, fields: Vec<FieldDecl>) -> ResourceDecl {
    ResourceDecl {
        top_level: true,
        ..resource_decl(name, fields)
    }
}

/// Projects a declaration, panicking on invalid names.
pub fn project(decl: ResourceDecl) -> ResourceSpec {
    project_resource(&decl, "test").expect("declaration should project")
}

/// Builds a resolved schema from declarations.
pub fn schema_of(resources: Vec<ResourceDecl>) -> Schema {
    build_schema(vec![(
        "test".to_string(),
        SchemaDocument {
            version: None,
            resources,
        },
    )])
    .expect("schema should build")
}

/// The alerting scenario used across generation tests.
///
/// - `AlertStatus` with an optional `alertState` string
/// - `QueryClusterGraph` whose `GraphName` is sent as `graphID`
/// - `ClusterAlertRule`, a top-level resource referencing both
pub fn alerting_schema() -> Schema {
    schema_of(vec![
        resource_decl("AlertStatus", vec![optional_field("alertState", "string")]),
        resource_decl(
            "QueryClusterGraph",
            vec![
                field_with_wire("GraphName", "string", "graphID"),
                optional_field("Step", "int"),
            ],
        ),
        top_level_decl(
            "ClusterAlertRule",
            vec![
                field_decl("clusterId", "string"),
                field_decl("status", "AlertStatus"),
                field_decl("graphs", "array[QueryClusterGraph]"),
                field_decl("labels", "map[string]"),
                optional_field("extra", "json"),
            ],
        ),
    ])
}
