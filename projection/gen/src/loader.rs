//! Schema loading and name projection.
//!
//! Turns schema documents into the resolved [`Schema`] snapshot consumed by
//! code generation:
//!
//! 1. Read and deserialize each document (YAML or JSON)
//! 2. Project declared names into type tags, wire names and Rust names
//! 3. Validate uniqueness and identifier rules ([`crate::validation`])
//! 4. Resolve references and find recursive edges ([`crate::resolve`])
//! 5. Order resources by type tag
//!
//! ## Examples
//!
//! ```
//! use projection_gen::loader::{DocumentFormat, build_schema, parse_document};
//!
//! let yaml = r#"
//! resources:
//!   - name: AlertStatus
//!     fields:
//!       - name: alertState
//!         type: string
//!         optional: true
//! "#;
//!
//! let doc = parse_document(yaml, DocumentFormat::Yaml, "alerting.yaml").unwrap();
//! let schema = build_schema(vec![("alerting.yaml".to_string(), doc)]).unwrap();
//!
//! let status = schema.get("alertStatus").unwrap();
//! assert_eq!(status.type_name, "AlertStatus");
//! assert_eq!(status.fields[0].serialized_name, "alertState");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use projection_define::{
    FieldDecl, FieldSpec, ResourceDecl, ResourceSpec, Schema, SchemaDocument, TypeExprError,
    ValueType,
};
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::naming::{
    escape_path_keyword, lower_camel, snake_case, starts_like_identifier, upper_camel,
};
use crate::resolve::{recursive_edges, resolve_references};
use crate::validation::validate_resources;

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loads, merges and resolves the schema documents at `paths`.
///
/// ## Errors
///
/// Returns `GeneratorError::ReadError` if a file cannot be read, and any
/// error of [`parse_document`] or [`build_schema`].
pub fn load_schema_files(paths: &[PathBuf]) -> Result<Schema, GeneratorError> {
    if paths.is_empty() {
        return Err(GeneratorError::ConfigError(
            "at least one schema document is required".to_string(),
        ));
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let origin = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
            path: origin.clone(),
            source: e,
        })?;

        let document = parse_document(&source, DocumentFormat::from_path(path), &origin)?;
        debug!(
            "Parsed {} ({} resources)",
            origin,
            document.resources.len()
        );
        documents.push((origin, document));
    }

    build_schema(documents)
}

/// Deserializes a single schema document.
///
/// ## Errors
///
/// Returns `GeneratorError::SchemaParse` naming `origin` when the document is
/// malformed or contains unknown keys.
pub fn parse_document(
    source: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<SchemaDocument, GeneratorError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(source).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| GeneratorError::SchemaParse {
        origin: origin.to_string(),
        message,
    })
}

/// Builds the resolved schema from parsed documents.
///
/// Each document is paired with its origin (usually the file path) for error
/// messages. Resources from all documents are merged into one namespace.
///
/// ## Errors
///
/// Returns the first projection, validation or resolution error found.
pub fn build_schema(documents: Vec<(String, SchemaDocument)>) -> Result<Schema, GeneratorError> {
    let mut resources = Vec::new();
    let mut versions = Vec::new();

    for (origin, document) in &documents {
        if let Some(version) = &document.version {
            versions.push(version.clone());
        }
        for decl in &document.resources {
            resources.push(project_resource(decl, origin)?);
        }
    }

    validate_resources(&resources)?;
    resolve_references(&mut resources)?;

    resources.sort_by(|a, b| a.type_tag.cmp(&b.type_tag));
    versions.sort();
    versions.dedup();

    let recursive_edges = recursive_edges(&resources);
    if !recursive_edges.is_empty() {
        debug!("Boxing {} recursive reference(s)", recursive_edges.len());
    }

    info!(
        "Loaded {} resources from {} document(s)",
        resources.len(),
        documents.len()
    );

    Ok(Schema {
        resources,
        versions,
        recursive_edges,
    })
}

/// Projects a resource declaration into a [`ResourceSpec`].
///
/// References keep their declared target name; [`resolve_references`]
/// rewrites them to type tags once every resource is known.
///
/// ## Errors
///
/// - `GeneratorError::InvalidName` if a name is not ASCII or projects to
///   nothing usable
/// - `GeneratorError::SchemaParse` if a field's type expression is malformed
pub fn project_resource(decl: &ResourceDecl, origin: &str) -> Result<ResourceSpec, GeneratorError> {
    let type_name = upper_camel(&decl.name);
    check_identifier("resource", &decl.name, &type_name)?;

    let type_tag = match &decl.type_tag {
        Some(tag) => explicit_name("type tag", tag)?,
        None => lower_camel(&decl.name),
    };

    let fields = decl
        .fields
        .iter()
        .map(|field| project_field(field, decl, origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResourceSpec {
        type_tag,
        declared_name: decl.name.clone(),
        module_name: escape_path_keyword(snake_case(&type_name)),
        type_name,
        top_level: decl.top_level,
        description: non_empty(&decl.description),
        fields,
    })
}

fn project_field(
    decl: &FieldDecl,
    resource: &ResourceDecl,
    origin: &str,
) -> Result<FieldSpec, GeneratorError> {
    let local_name = snake_case(&decl.name);
    check_identifier("field", &decl.name, &local_name)?;

    let serialized_name = match &decl.serialized_name {
        Some(name) => explicit_name("serialized", name)?,
        None => lower_camel(&decl.name),
    };

    let value_type: ValueType = decl.type_expr.parse().map_err(|e: TypeExprError| {
        GeneratorError::SchemaParse {
            origin: format!("{origin}: resource '{}', field '{}'", resource.name, decl.name),
            message: e.to_string(),
        }
    })?;

    Ok(FieldSpec {
        serialized_name,
        local_name,
        declared_name: decl.name.clone(),
        value_type,
        optional: decl.optional,
        description: non_empty(&decl.description),
        options: decl.options.clone(),
    })
}

/// Rejects names whose projection cannot become a Rust identifier.
fn check_identifier(kind: &str, declared: &str, projected: &str) -> Result<(), GeneratorError> {
    let reason = if !declared.is_ascii() {
        "contains non-ASCII characters"
    } else if projected.is_empty() {
        "contains no letters or digits"
    } else if !starts_like_identifier(projected) {
        "must start with a letter"
    } else {
        return Ok(());
    };

    Err(GeneratorError::InvalidName {
        kind: kind.to_string(),
        name: declared.to_string(),
        reason: reason.to_string(),
    })
}

/// Explicit overrides are used verbatim but may not be blank.
fn explicit_name(kind: &str, name: &str) -> Result<String, GeneratorError> {
    if name.trim().is_empty() || name.trim() != name {
        return Err(GeneratorError::InvalidName {
            kind: kind.to_string(),
            name: name.to_string(),
            reason: "explicit names must be non-empty without surrounding whitespace".to_string(),
        });
    }
    Ok(name.to_string())
}

fn non_empty(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{field_decl, resource_decl};
    use projection_define::Primitive;
    use std::io::Write;
    use tempfile::TempDir;

    fn schema_of(resources: Vec<ResourceDecl>) -> Result<Schema, GeneratorError> {
        build_schema(vec![(
            "test.yaml".to_string(),
            SchemaDocument {
                version: None,
                resources,
            },
        )])
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("schema")), DocumentFormat::Yaml);
    }

    #[test]
    fn projects_names_and_tags() {
        let schema = schema_of(vec![resource_decl(
            "QueryClusterGraph",
            vec![
                FieldDecl {
                    serialized_name: Some("graphID".to_string()),
                    ..field_decl("GraphName", "string")
                },
                field_decl("ProjectID", "string"),
            ],
        )])
        .unwrap();

        let resource = schema.get("queryClusterGraph").unwrap();
        assert_eq!(resource.type_name, "QueryClusterGraph");
        assert_eq!(resource.module_name, "query_cluster_graph");

        let graph = &resource.fields[0];
        assert_eq!(graph.serialized_name, "graphID");
        assert_eq!(graph.local_name, "graph_name");
        assert_eq!(graph.declared_name, "GraphName");

        assert_eq!(resource.fields[1].serialized_name, "projectId");
        assert_eq!(resource.fields[1].local_name, "project_id");
    }

    #[test]
    fn explicit_type_tag_is_verbatim() {
        let schema = schema_of(vec![ResourceDecl {
            type_tag: Some("cluster-alert".to_string()),
            ..resource_decl("ClusterAlert", vec![])
        }])
        .unwrap();

        assert!(schema.get("cluster-alert").is_some());
        assert!(schema.get("clusterAlert").is_none());
    }

    #[test]
    fn resources_are_sorted_by_type_tag() {
        let schema = schema_of(vec![
            resource_decl("Zone", vec![]),
            resource_decl("AlertStatus", vec![]),
            resource_decl("Node", vec![]),
        ])
        .unwrap();

        let tags: Vec<_> = schema.resources.iter().map(|r| r.type_tag.as_str()).collect();
        assert_eq!(tags, vec!["alertStatus", "node", "zone"]);
    }

    #[test]
    fn malformed_type_expression_names_its_origin() {
        let err = schema_of(vec![resource_decl(
            "AlertStatus",
            vec![field_decl("labels", "array[string")],
        )])
        .unwrap_err();

        match err {
            GeneratorError::SchemaParse { origin, .. } => {
                assert!(origin.contains("test.yaml"));
                assert!(origin.contains("AlertStatus"));
                assert!(origin.contains("labels"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn names_without_letters_are_rejected() {
        let err = schema_of(vec![resource_decl("---", vec![])]).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidName { .. }));

        let err = schema_of(vec![resource_decl(
            "AlertStatus",
            vec![field_decl("9lives", "string")],
        )])
        .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidName { .. }));
    }

    #[test]
    fn non_ascii_names_are_rejected() {
        let err = schema_of(vec![resource_decl("Café", vec![])]).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidName { ref kind, ref name, .. } if kind == "resource" && name == "Café"
        ));

        let err = schema_of(vec![resource_decl(
            "AlertStatus",
            vec![field_decl("größe", "int")],
        )])
        .unwrap_err();
        assert!(err.to_string().contains("non-ASCII"));
    }

    #[test]
    fn blank_overrides_are_rejected() {
        let err = schema_of(vec![resource_decl(
            "AlertStatus",
            vec![FieldDecl {
                serialized_name: Some(" ".to_string()),
                ..field_decl("alertState", "string")
            }],
        )])
        .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidName { .. }));
    }

    #[test]
    fn merges_documents_and_versions() {
        let first = SchemaDocument {
            version: Some("v3".to_string()),
            resources: vec![resource_decl("AlertStatus", vec![])],
        };
        let second = SchemaDocument {
            version: Some("v3".to_string()),
            resources: vec![resource_decl(
                "ClusterAlert",
                vec![field_decl("status", "AlertStatus")],
            )],
        };

        let schema =
            build_schema(vec![("a.yaml".to_string(), first), ("b.yaml".to_string(), second)])
                .unwrap();

        assert_eq!(schema.versions, vec!["v3"]);
        assert_eq!(
            schema.get("clusterAlert").unwrap().fields[0].value_type,
            ValueType::Reference("alertStatus".to_string())
        );
    }

    #[test]
    fn cross_document_duplicates_are_rejected() {
        let doc = SchemaDocument {
            version: None,
            resources: vec![resource_decl("AlertStatus", vec![])],
        };

        let err = build_schema(vec![
            ("a.yaml".to_string(), doc.clone()),
            ("b.yaml".to_string(), doc),
        ])
        .unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateResource { .. }));
    }

    #[test]
    fn loads_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();
        let yaml_path = dir.path().join("alerting.yaml");
        let json_path = dir.path().join("graph.json");

        let mut yaml = fs::File::create(&yaml_path).unwrap();
        writeln!(
            yaml,
            "resources:\n  - name: AlertStatus\n    fields:\n      - name: alertState\n        type: string\n        optional: true"
        )
        .unwrap();
        fs::write(
            &json_path,
            r#"{"resources":[{"name":"QueryClusterGraph","fields":[{"name":"GraphName","type":"string","serializedName":"graphID"}]}]}"#,
        )
        .unwrap();

        let schema = load_schema_files(&[yaml_path, json_path]).unwrap();

        assert_eq!(schema.resources.len(), 2);
        let status = schema.get("alertStatus").unwrap();
        assert_eq!(
            status.fields[0].value_type,
            ValueType::Primitive(Primitive::String)
        );
        assert!(status.fields[0].optional);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_schema_files(&[dir.path().join("missing.yaml")]).unwrap_err();
        assert!(matches!(err, GeneratorError::ReadError { .. }));
    }

    #[test]
    fn no_documents_is_a_config_error() {
        assert!(matches!(
            load_schema_files(&[]),
            Err(GeneratorError::ConfigError(_))
        ));
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        let err = parse_document(
            "resources:\n  - name: AlertStatus\n    feilds: []\n",
            DocumentFormat::Yaml,
            "typo.yaml",
        )
        .unwrap_err();

        match err {
            GeneratorError::SchemaParse { origin, .. } => assert_eq!(origin, "typo.yaml"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
