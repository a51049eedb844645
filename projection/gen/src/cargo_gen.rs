//! Cargo.toml generation for the emitted crate.
//!
//! The manifest is written next to the output directory: for the default
//! output `generated/src` it lands at `generated/Cargo.toml`.

use std::path::{Path, PathBuf};

use crate::errors::GeneratorError;

/// Comment line opening every generated manifest.
pub const CARGO_HEADER: &str =
    "# This file was automatically generated by projection-gen. Do not edit manually.";

/// Returns where the manifest for `output_dir` is written.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` if `output_dir` has no usable
/// directory name (e.g. `/` or `..`).
pub fn cargo_toml_path(output_dir: &Path) -> Result<PathBuf, GeneratorError> {
    source_dir_name(output_dir)?;
    let parent = output_dir.parent().unwrap_or(Path::new(""));
    Ok(parent.join("Cargo.toml"))
}

/// Generates the manifest of the emitted crate.
///
/// `serde_json` is only listed when a json field exists.
///
/// ## Examples
///
/// ```
/// use std::path::Path;
/// use projection_gen::cargo_gen::generate_cargo_toml;
///
/// let manifest = generate_cargo_toml("alerting-types", Path::new("generated/src"), false).unwrap();
/// assert!(manifest.contains("name = \"alerting-types\""));
/// assert!(manifest.contains("path = \"src/lib.rs\""));
/// assert!(!manifest.contains("serde_json"));
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` for an invalid crate name or an
/// unusable output directory.
pub fn generate_cargo_toml(
    crate_name: &str,
    output_dir: &Path,
    needs_json: bool,
) -> Result<String, GeneratorError> {
    validate_crate_name(crate_name)?;
    let source_dir = source_dir_name(output_dir)?;

    let mut manifest = format!(
        r#"{CARGO_HEADER}

[package]
name = "{crate_name}"
version = "0.1.0"
edition = "2024"

[lib]
path = "{source_dir}/lib.rs"

[dependencies]
serde = {{ version = "1.0", features = ["derive"] }}
"#
    );
    if needs_json {
        manifest.push_str("serde_json = \"1.0\"\n");
    }

    Ok(manifest)
}

fn source_dir_name(output_dir: &Path) -> Result<String, GeneratorError> {
    output_dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            GeneratorError::ConfigError(format!(
                "output directory '{}' has no usable name for the crate manifest",
                output_dir.display()
            ))
        })
}

fn validate_crate_name(name: &str) -> Result<(), GeneratorError> {
    let valid = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(GeneratorError::ConfigError(format!(
            "invalid crate name '{name}': use letters, digits, '-' or '_', starting with a letter"
        )))
    }
}
