//! CLI logic for the Armature diagram extractor.
//!
//! This module contains the core CLI logic for the Armature diagram
//! extractor.

pub mod error_adapter;

mod args;
mod config;
mod loader;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use armature::{ArmatureError, DiagramBuilder};

/// Run the Armature CLI application
///
/// This function locates the schema document under the schema root, runs the
/// extraction and layout pipeline, and writes the resulting diagram document
/// to standard output or a file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArmatureError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Schema discovery and parsing errors
/// - Extraction errors
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), ArmatureError> {
    info!(
        schema_root = args.schema_root,
        output_path = args.output;
        "Extracting diagram"
    );

    // Load configuration; command-line flags take precedence
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(module) = &args.module {
        app_config.extract_mut().set_module(Some(module.clone()));
    }
    if !args.system.is_empty() {
        app_config.extract_mut().set_system(&args.system);
    }
    if !args.project.is_empty() {
        app_config.extract_mut().set_project(&args.project);
    }
    app_config
        .extract_mut()
        .set_include_method_dependencies(args.include_method_dependencies);
    if args.strict {
        app_config.extract_mut().set_strict_integrity(true);
    }
    if args.seed.is_some() {
        app_config.layout_mut().set_seed(args.seed);
    }

    // Load the schema document
    let schema = loader::load_schema(&args.schema_root)?;

    // Process the schema using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.process(&schema)?;

    // Serialize and emit the diagram document
    let document = serde_json::to_string_pretty(&diagram)
        .map_err(|err| ArmatureError::Serialize(err.to_string()))?;

    if args.output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(document.as_bytes())?;
        stdout.write_all(b"\n")?;
    } else {
        fs::write(&args.output, document)?;
        info!(output_file = args.output; "Diagram document written");
    }

    Ok(())
}
