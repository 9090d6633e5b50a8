//! Armature - schema-to-diagram extraction and auto-layout.
//!
//! Armature ingests an application's persistent-class schema and produces an
//! editable, diagrammable graph: a UML-like class/enum graph with typed
//! relationships, positioned by a force-directed layout and ready for a
//! rendering or code-generation layer.

pub mod config;
pub mod layout;

mod error;

pub use armature_core::{identifier, model};
pub use armature_extract::schema;

pub use error::ArmatureError;

use log::{debug, info, trace};

use armature_core::model::Diagram;
use armature_extract::Extractor;
use armature_extract::schema::SchemaModel;

use config::AppConfig;

/// Builder for extracting and laying out Armature diagrams.
///
/// This provides an API for processing schema documents through the
/// extraction and layout stages.
///
/// # Examples
///
/// ```rust,no_run
/// use armature::{DiagramBuilder, config::AppConfig, schema::SchemaModel};
///
/// let document = r#"{ "modules": [ { "name": "shared_models", "classes": [
///     { "name": "Ticket", "fields": [ { "name": "title", "type": "str" } ] }
/// ] } ] }"#;
/// let schema: SchemaModel = serde_json::from_str(document)
///     .expect("Failed to parse schema");
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Extract the diagram and position its nodes
/// let diagram = builder.process(&schema)
///     .expect("Failed to process schema");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including extraction and layout settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Extract a diagram from a schema document.
    ///
    /// This runs one full extraction pass: node identity assignment,
    /// attribute and enum-node construction, dependency scanning,
    /// relationship classification, and the integrity check.
    ///
    /// # Errors
    ///
    /// Returns `ArmatureError` when the designated module is missing or
    /// empty, or when strict integrity checking rejects the assembled graph.
    pub fn extract(&self, schema: &SchemaModel) -> Result<Diagram, ArmatureError> {
        info!("Extracting diagram");

        let extractor = Extractor::new(self.config.extract().to_options());
        let diagram = extractor.extract(schema)?;

        debug!("Diagram extracted successfully");
        trace!(diagram:?; "Extracted diagram");

        Ok(diagram)
    }

    /// Assign 2-D positions to every node of an extracted diagram.
    ///
    /// Layout treats every edge as an undirected connection and only writes
    /// node positions; the node and edge sets are never modified.
    ///
    /// # Errors
    ///
    /// Returns `ArmatureError` when the layout engine fails.
    pub fn auto_layout(&self, diagram: &mut Diagram) -> Result<(), ArmatureError> {
        info!(nodes = diagram.nodes.len(); "Running auto-layout");

        let layout_config = self.config.layout();
        let mut engine = layout::Engine::new();
        engine
            .set_iterations(layout_config.iterations())
            .set_scale(layout_config.scale())
            .set_seed(layout_config.seed());
        engine.apply(diagram);

        debug!("Auto-layout complete");
        Ok(())
    }

    /// Extract a diagram and lay it out in one step.
    ///
    /// # Errors
    ///
    /// Returns `ArmatureError` for extraction or layout errors.
    pub fn process(&self, schema: &SchemaModel) -> Result<Diagram, ArmatureError> {
        let mut diagram = self.extract(schema)?;
        self.auto_layout(&mut diagram)?;
        Ok(diagram)
    }
}
