//! Command-line argument definitions for the Armature CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the schema root, target identifiers,
//! scanner inclusion, output path, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the Armature diagram extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the schema root: a schema.json file or a directory containing one
    #[arg(help = "Path to the schema root")]
    pub schema_root: String,

    /// Identifier of the target project
    #[arg(short, long, default_value = "")]
    pub project: String,

    /// Identifier of the target system
    #[arg(short, long, default_value = "")]
    pub system: String,

    /// Designated schema module; defaults to the schema's only module
    #[arg(short, long)]
    pub module: Option<String>,

    /// Scan method bodies for behavioral dependency edges
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub include_method_dependencies: bool,

    /// Treat integrity violations as fatal
    #[arg(long)]
    pub strict: bool,

    /// Path to the output document, or "-" for standard output
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Seed for the layout engine, for reproducible positions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
