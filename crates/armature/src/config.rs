//! Configuration types for the Armature pipeline.
//!
//! This module provides configuration structures that control extraction and
//! auto-layout. All types implement [`serde::Deserialize`] for loading from
//! external sources; every field has a default so partial configuration
//! files are valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining extraction and layout settings.
//! - [`ExtractConfig`] - Controls the extraction pass (module, scanner, integrity severity).
//! - [`LayoutConfig`] - Controls the force-directed layout (scale, iterations, seed).

use serde::Deserialize;

use armature_extract::ExtractOptions;

/// Top-level application configuration combining extraction and layout
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extract: ExtractConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(extract: ExtractConfig, layout: LayoutConfig) -> Self {
        Self { extract, layout }
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }

    /// Returns a mutable reference to the extraction configuration.
    pub fn extract_mut(&mut self) -> &mut ExtractConfig {
        &mut self.extract
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }
}

/// Configuration for the extraction pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// The designated schema module. When unset, the schema must define
    /// exactly one module.
    #[serde(default)]
    module: Option<String>,

    /// Identifier of the owning system, carried into the diagram.
    #[serde(default)]
    system: String,

    /// Identifier of the owning project, carried into the diagram.
    #[serde(default)]
    project: String,

    /// Run the method-dependency scanner.
    #[serde(default = "default_true")]
    include_method_dependencies: bool,

    /// Treat integrity violations as fatal instead of warnings.
    #[serde(default)]
    strict_integrity: bool,

    /// Drop structural edges already covered by a "calls" dependency.
    #[serde(default)]
    suppress_after_calls: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            module: None,
            system: String::new(),
            project: String::new(),
            include_method_dependencies: true,
            strict_integrity: false,
            suppress_after_calls: false,
        }
    }
}

impl ExtractConfig {
    /// Sets the designated module.
    pub fn set_module(&mut self, module: Option<String>) -> &mut Self {
        self.module = module;
        self
    }

    /// Sets the owning system identifier.
    pub fn set_system(&mut self, system: impl Into<String>) -> &mut Self {
        self.system = system.into();
        self
    }

    /// Sets the owning project identifier.
    pub fn set_project(&mut self, project: impl Into<String>) -> &mut Self {
        self.project = project.into();
        self
    }

    /// Enables or disables the method-dependency scanner.
    pub fn set_include_method_dependencies(&mut self, include: bool) -> &mut Self {
        self.include_method_dependencies = include;
        self
    }

    /// Enables or disables strict integrity checking.
    pub fn set_strict_integrity(&mut self, strict: bool) -> &mut Self {
        self.strict_integrity = strict;
        self
    }

    /// Builds the options handed to the extraction pass.
    pub fn to_options(&self) -> ExtractOptions {
        ExtractOptions {
            module: self.module.clone(),
            system: self.system.clone(),
            project: self.project.clone(),
            include_method_dependencies: self.include_method_dependencies,
            strict_integrity: self.strict_integrity,
            suppress_after_calls: self.suppress_after_calls,
        }
    }
}

/// Configuration for the force-directed layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Half-extent of the coordinate range; positions span roughly ±scale.
    #[serde(default = "default_scale")]
    scale: f32,

    /// Number of simulation iterations.
    #[serde(default = "default_iterations")]
    iterations: usize,

    /// Seed for the position initializer. Unset means a fresh seed per run;
    /// layout is then non-deterministic.
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Returns the coordinate scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the iteration count.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the layout seed, if set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the layout seed.
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f32 {
    500.0
}

fn default_iterations() -> usize {
    100
}
