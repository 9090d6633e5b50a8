//! Schema document discovery and loading.
//!
//! The schema root handed to the CLI may be the entry descriptor itself
//! (`schema.json`) or any directory above it. Discovery walks the tree and
//! takes the first entry descriptor found; a root without one is a
//! configuration error, fatal to the whole pass.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use walkdir::WalkDir;

use armature::{ArmatureError, schema::SchemaModel};
use armature_extract::ExtractError;

/// File name of the schema entry descriptor.
const ENTRY_NAME: &str = "schema.json";

/// Locate and parse the schema document under `root`.
///
/// # Errors
///
/// Returns a configuration error when the root does not exist, contains no
/// entry descriptor, or the descriptor is empty or unparsable.
pub fn load_schema(root: impl AsRef<Path>) -> Result<SchemaModel, ArmatureError> {
    let root = root.as_ref();
    let entry = locate_entry(root)?;
    info!(entry = entry.display().to_string(); "Loading schema document");

    let content = fs::read_to_string(&entry)?;
    if content.trim().is_empty() {
        return Err(configuration(format!(
            "schema entry '{}' is empty",
            entry.display()
        )));
    }

    let schema: SchemaModel = serde_json::from_str(&content).map_err(|err| {
        configuration(format!(
            "schema entry '{}' is not a valid schema document: {err}",
            entry.display()
        ))
    })?;

    debug!(modules = schema.modules.len(); "Schema document loaded");
    Ok(schema)
}

fn locate_entry(root: &Path) -> Result<PathBuf, ArmatureError> {
    if root.is_file() {
        return Ok(root.to_path_buf());
    }
    if !root.exists() {
        return Err(configuration(format!(
            "schema root '{}' not found",
            root.display()
        )));
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name() == ENTRY_NAME)
        .map(|entry| entry.into_path())
        .ok_or_else(|| {
            configuration(format!(
                "no '{ENTRY_NAME}' found under schema root '{}'",
                root.display()
            ))
        })
}

fn configuration(message: String) -> ArmatureError {
    ArmatureError::Extract(ExtractError::Configuration(message))
}
