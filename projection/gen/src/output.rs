//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces into Rust files, validating and formatting them, and
//! writing them to disk.
//!
//! ## Output Structure
//!
//! ```text
//! generated/
//! ├── Cargo.toml              # Only with a crate name
//! └── src/
//!     ├── lib.rs              # Module declarations and re-exports
//!     ├── shared.rs           # Only when a unit needs shared helpers
//!     ├── alert_status.rs     # One module per resource
//!     └── cluster_alert_rule.rs
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Staged writes**: Every file is staged as a temp file before any target
//!   is replaced, so a failure while rendering or staging leaves the previous
//!   output in place. A failed rename after that point is reported as
//!   `GeneratorError::PartialWrite`, listing the files already replaced
//! - **Determinism**: Units render in parallel but are collected in type-tag
//!   order, so identical schemas produce byte-identical output

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use projection_define::{Primitive, Schema};
use quote::quote;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cargo_gen::{cargo_toml_path, generate_cargo_toml};
use crate::codegen::{SharedNeeds, generate_resource_unit, generate_shared_module};
use crate::errors::GeneratorError;
use crate::naming::rust_ident;

/// First line of every generated `.rs` file.
///
/// Pruning only ever deletes files that start with this line.
pub const GENERATED_HEADER: &str =
    "// This code was automatically generated by projection-gen. Do not edit manually.";

/// A rendered file and the path it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// What [`generate_and_write`] does with the rendered files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Write files to disk.
    #[default]
    Write,
    /// Print files to stdout without touching the disk.
    DryRun,
    /// Compare files with the disk and fail if they differ.
    Check,
}

/// Generation settings, usually built from the command line.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory receiving `lib.rs` and the resource modules.
    pub output_dir: PathBuf,
    /// When set, a `Cargo.toml` with this package name is emitted next to
    /// the output directory.
    pub crate_name: Option<String>,
    pub mode: OutputMode,
    /// Delete previously generated modules that are no longer produced.
    pub prune: bool,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            crate_name: None,
            mode: OutputMode::Write,
            prune: true,
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new("generated/src")
    }
}

/// Outcome of a successful [`generate_and_write`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Every rendered file, in output order.
    pub files: Vec<PathBuf>,
    /// Stale generated files that were deleted.
    pub pruned: Vec<PathBuf>,
}

/// Assembles the lib.rs content for the generated crate.
///
/// This generates the main library file that:
/// - Documents the crate, including the schema versions it was built from
/// - Declares the shared module when one is emitted
/// - Declares one module per resource, in type-tag order
/// - Re-exports every module at the crate root
///
/// ## Arguments
///
/// * `schema` - The resolved schema
/// * `needs` - Which shared items are emitted
///
/// ## Returns
///
/// A TokenStream containing the lib.rs code.
pub fn assemble_lib_rs(schema: &Schema, needs: SharedNeeds) -> TokenStream {
    let mut doc_lines = vec![
        " Generated resource types.".to_string(),
        String::new(),
        " Each resource lives in its own module and is re-exported at the crate root.".to_string(),
    ];
    if !schema.versions.is_empty() {
        let versions: Vec<String> = schema.versions.iter().map(|v| format!("`{v}`")).collect();
        doc_lines.push(String::new());
        doc_lines.push(format!(" Schema version: {}.", versions.join(", ")));
    }
    if !schema.resources.is_empty() {
        doc_lines.push(String::new());
        doc_lines.push(" ## Resources".to_string());
        doc_lines.push(String::new());
        for resource in &schema.resources {
            doc_lines.push(format!(
                " - [`{}`] (`{}`)",
                resource.type_name, resource.type_tag
            ));
        }
    }

    let shared_decl = needs.any().then(|| quote! { pub mod shared; });
    let shared_reexport = needs.resource_meta.then(|| {
        quote! { pub use shared::{CollectionMeta, Pagination, ResourceMeta}; }
    });

    let module_decls = schema.resources.iter().map(|resource| {
        let module_name = rust_ident(&resource.module_name);
        quote! {
            pub mod #module_name;
            pub use #module_name::*;
        }
    });

    quote! {
        #(#![doc = #doc_lines])*

        #shared_decl
        #shared_reexport

        #(#module_decls)*
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Converts a parsed syn::File back to a nicely formatted string,
/// prepending [`GENERATED_HEADER`] as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{}\n\n{}", GENERATED_HEADER, formatted)
}

/// Validates and formats a token stream in one step.
pub fn render(tokens: &TokenStream) -> Result<String, GeneratorError> {
    let file = validate_code(tokens)?;
    Ok(format_code(&file))
}

/// Renders every resource unit on the rayon pool.
///
/// ## Returns
///
/// `(file name, content)` pairs in type-tag order.
pub fn render_units(schema: &Schema) -> Result<Vec<(String, String)>, GeneratorError> {
    schema
        .resources
        .par_iter()
        .map(|resource| {
            let tokens = generate_resource_unit(resource, schema)?;
            let content = render(&tokens)?;
            debug!("Rendered unit for {}", resource.type_tag);
            Ok::<_, GeneratorError>((format!("{}.rs", resource.module_name), content))
        })
        .collect()
}

/// Renders the complete output for `schema`.
///
/// Order: `lib.rs`, `shared.rs` (if needed), resource modules by type tag,
/// then `Cargo.toml` (if a crate name is set).
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if any file fails validation and
/// `GeneratorError::ConfigError` for an invalid crate name.
pub fn render_crate(
    schema: &Schema,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let needs = SharedNeeds::for_schema(schema);
    let output_dir = &options.output_dir;

    let mut files = vec![GeneratedFile {
        path: output_dir.join("lib.rs"),
        content: render(&assemble_lib_rs(schema, needs))?,
    }];

    if needs.any() {
        files.push(GeneratedFile {
            path: output_dir.join("shared.rs"),
            content: render(&generate_shared_module(needs))?,
        });
    }

    for (file_name, content) in render_units(schema)? {
        files.push(GeneratedFile {
            path: output_dir.join(file_name),
            content,
        });
    }

    if let Some(crate_name) = &options.crate_name {
        files.push(GeneratedFile {
            path: cargo_toml_path(output_dir)?,
            content: generate_cargo_toml(
                crate_name,
                output_dir,
                schema.uses_primitive(Primitive::Json),
            )?,
        });
    }

    Ok(files)
}

/// Writes all files, replacing targets only once every file is staged.
///
/// Each file is first written next to its target with a `.tmp` extension.
/// If any staging write fails, the staged files are removed and no target
/// is touched.
///
/// ## Errors
///
/// - `GeneratorError::WriteError` naming the path that failed to stage
/// - `GeneratorError::PartialWrite` if a rename fails; the remaining temp
///   files are removed and the error lists the targets already replaced
pub fn write_all_atomic(files: &[GeneratedFile]) -> Result<(), GeneratorError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for file in files {
        match stage(file) {
            Ok(temp_path) => staged.push((temp_path, file.path.as_path())),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }

    let mut written = Vec::with_capacity(staged.len());
    for (index, (temp_path, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp_path, target) {
            discard(&staged[index..]);
            if !written.is_empty() {
                warn!(
                    "Output is partially written: {} of {} files replaced",
                    written.len(),
                    staged.len()
                );
            }
            return Err(GeneratorError::PartialWrite {
                path: target.display().to_string(),
                written,
                source: e,
            });
        }
        written.push(target.display().to_string());
    }

    Ok(())
}

fn stage(file: &GeneratedFile) -> Result<PathBuf, GeneratorError> {
    // Create parent directories if needed
    if let Some(parent) = file.path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = file.path.with_extension("tmp");
    fs::write(&temp_path, &file.content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    Ok(temp_path)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp_path, _) in staged {
        if let Err(e) = fs::remove_file(temp_path) {
            warn!("Could not remove {}: {}", temp_path.display(), e);
        }
    }
}

/// Lists generated `.rs` files in `output_dir` that are not in `files`.
///
/// A file counts as generated only if it starts with [`GENERATED_HEADER`];
/// hand-written modules are never reported.
pub fn stale_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GeneratorError> {
    let entries = match fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => {
            return Err(GeneratorError::ReadError {
                path: output_dir.display().to_string(),
                source: e,
            });
        }
    };

    let produced: BTreeSet<&Path> = files.iter().map(|file| file.path.as_path()).collect();
    let mut stale = Vec::new();

    for entry in entries {
        let path = entry
            .map_err(|e| GeneratorError::ReadError {
                path: output_dir.display().to_string(),
                source: e,
            })?
            .path();

        if !path.is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("rs")
            || produced.contains(path.as_path())
        {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| GeneratorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        if content.starts_with(GENERATED_HEADER) {
            stale.push(path);
        }
    }

    stale.sort();
    Ok(stale)
}

/// Deletes stale generated files, returning what was removed.
pub fn prune_stale(output_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GeneratorError> {
    let stale = stale_files(output_dir, files)?;

    for path in &stale {
        fs::remove_file(path).map_err(|e| GeneratorError::WriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        info!("Pruned stale generated file {}", path.display());
    }

    Ok(stale)
}

/// Lists files whose on-disk content differs from `files`.
///
/// Missing files count as different. With `include_stale`, generated files
/// that would be pruned are listed too.
pub fn find_out_of_date(
    files: &[GeneratedFile],
    output_dir: &Path,
    include_stale: bool,
) -> Result<Vec<String>, GeneratorError> {
    let mut out_of_date = Vec::new();

    for file in files {
        let matches = match fs::read_to_string(&file.path) {
            Ok(existing) => existing == file.content,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                return Err(GeneratorError::ReadError {
                    path: file.path.display().to_string(),
                    source: e,
                });
            }
        };
        if !matches {
            out_of_date.push(file.path.display().to_string());
        }
    }

    if include_stale {
        for path in stale_files(output_dir, files)? {
            out_of_date.push(path.display().to_string());
        }
    }

    Ok(out_of_date)
}

/// Generates code for `schema` and handles it according to `options.mode`.
///
/// This is the main entry point for code generation:
/// - `Write` stages and writes every file, then prunes stale modules
/// - `DryRun` prints every file to stdout
/// - `Check` fails if the files on disk are not what would be written
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing fails (see [`write_all_atomic`] for what is left behind)
/// - Pruning fails; the new files are already written at that point
/// - In check mode, any file is out of date (`GeneratorError::OutOfDate`)
pub fn generate_and_write(
    schema: &Schema,
    options: &GenerateOptions,
) -> Result<GenerationReport, GeneratorError> {
    let files = render_crate(schema, options)?;
    let mut report = GenerationReport {
        files: files.iter().map(|file| file.path.clone()).collect(),
        pruned: vec![],
    };

    match options.mode {
        OutputMode::DryRun => {
            for file in &files {
                println!("=== {} ===\n{}\n", file.path.display(), file.content);
            }
        }
        OutputMode::Check => {
            let out_of_date = find_out_of_date(&files, &options.output_dir, options.prune)?;
            if !out_of_date.is_empty() {
                return Err(GeneratorError::OutOfDate { files: out_of_date });
            }
            info!("{} generated files are up to date", files.len());
        }
        OutputMode::Write => {
            write_all_atomic(&files)?;
            info!(
                "Wrote {} files to {}",
                files.len(),
                options.output_dir.display()
            );
            if options.prune {
                report.pruned = prune_stale(&options.output_dir, &files)?;
            }
        }
    }

    Ok(report)
}
