//! The extraction pass driver.
//!
//! [`Extractor`] owns one pass over a schema module: it seeds the pointer
//! registry, builds nodes and attributes, runs the dependency scanner, runs
//! the relationship classifier, merges everything into a single [`Diagram`],
//! and verifies referential integrity. Each pass constructs its own registry
//! and discards it; nothing persists between passes.

use log::{debug, info, warn};

use armature_core::model::{Classifier, Diagram, Node};

use crate::{
    attributes::build_class_artifacts,
    error::{Endpoint, ExtractError, IntegrityViolation},
    registry::PointerRegistry,
    relationships::{ClassIndex, classify_class},
    scanner::{DependencyScanner, LexicalScanner},
    schema::{ModuleSchema, SchemaModel},
};

/// Options for one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// The designated module. `None` is accepted only when the schema
    /// defines exactly one module.
    pub module: Option<String>,
    /// Identifier of the owning system, carried into the diagram verbatim.
    pub system: String,
    /// Identifier of the owning project, carried into the diagram verbatim.
    pub project: String,
    /// Run the method-dependency scanner.
    pub include_method_dependencies: bool,
    /// Escalate integrity violations from warnings to a fatal error.
    pub strict_integrity: bool,
    /// Drop a structural edge when a "calls" dependency already links the
    /// same pair.
    pub suppress_after_calls: bool,
}

impl Default for ExtractOptions {
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

/// Drives a full extraction pass over one schema module.
#[derive(Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Runs the pass and returns the assembled diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Configuration`] when the designated module is
    /// missing or empty, and [`ExtractError::Integrity`] in strict mode when
    /// any edge references a missing node.
    pub fn extract(&self, schema: &SchemaModel) -> Result<Diagram, ExtractError> {
        let module = self.resolve_module(schema)?;
        info!(
            module = module.name,
            classes = module.classes.len();
            "Starting extraction pass"
        );

        // First declaration wins; re-processing a class name is a no-op.
        let mut classes = ClassIndex::new();
        for class in &module.classes {
            if classes.contains_key(class.name.as_str()) {
                debug!(class = class.name; "Duplicate class declaration ignored");
                continue;
            }
            classes.insert(class.name.as_str(), class);
        }

        let mut registry = PointerRegistry::new();
        for name in classes.keys() {
            registry.identifier_for(name);
        }

        let mut diagram = Diagram::new(
            "Diagram",
            self.options.system.clone(),
            self.options.project.clone(),
        );

        // Nodes and attributes first, so enum nodes exist before any edge
        // can reference them.
        for class in classes.values() {
            let artifacts = build_class_artifacts(class, &mut registry);
            diagram.nodes.extend(artifacts.enum_nodes);

            let id = registry.identifier_for(&class.name);
            diagram.nodes.push(Node::new(
                id,
                Classifier::Class {
                    name: class.name.clone(),
                    leaf: is_leaf(&class.name, &classes),
                    is_abstract: class.is_abstract,
                    namespace: class.namespace.clone(),
                    methods: artifacts.methods,
                    attributes: artifacts.attributes,
                },
            ));
        }

        // Behavioral dependencies before structural edges; the suppression
        // rule inspects the accumulated edge set.
        if self.options.include_method_dependencies {
            let scanner = LexicalScanner::new();
            let candidates: Vec<_> = classes.values().copied().collect();
            for class in classes.values() {
                let edges = scanner.scan(class, &candidates, &registry);
                debug!(class = class.name, count = edges.len(); "Scanned method dependencies");
                diagram.edges.extend(edges);
            }
        }

        for class in classes.values() {
            let edges = classify_class(
                class,
                &classes,
                &registry,
                &diagram.edges,
                self.options.suppress_after_calls,
            );
            diagram.edges.extend(edges);
        }

        let violations = verify_integrity(&diagram);
        for violation in &violations {
            warn!(violation = violation.to_string(); "Integrity check failed");
        }
        if self.options.strict_integrity && !violations.is_empty() {
            return Err(ExtractError::Integrity { violations });
        }

        info!(
            nodes = diagram.nodes.len(),
            edges = diagram.edges.len();
            "Extraction pass complete"
        );
        Ok(diagram)
    }

    fn resolve_module<'a>(&self, schema: &'a SchemaModel) -> Result<&'a ModuleSchema, ExtractError> {
        let module = match &self.options.module {
            Some(name) => schema.module(name).ok_or_else(|| {
                ExtractError::Configuration(format!("module '{name}' not found in schema"))
            })?,
            None => schema.sole_module().ok_or_else(|| {
                ExtractError::Configuration(
                    "schema does not define exactly one module; designate one".to_string(),
                )
            })?,
        };
        if module.classes.is_empty() {
            return Err(ExtractError::Configuration(format!(
                "module '{}' contains no classes",
                module.name
            )));
        }
        Ok(module)
    }
}

/// Convenience wrapper: one pass with the given options.
pub fn extract(schema: &SchemaModel, options: ExtractOptions) -> Result<Diagram, ExtractError> {
    Extractor::new(options).extract(schema)
}

/// True when no other modeled class names `name` as a base.
fn is_leaf(name: &str, classes: &ClassIndex<'_>) -> bool {
    !classes
        .values()
        .any(|class| class.bases.iter().any(|base| base == name))
}

/// Checks that every edge endpoint references a node present in the diagram.
///
/// Violations are advisory by default; strict mode turns them fatal.
pub fn verify_integrity(diagram: &Diagram) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();
    for edge in &diagram.edges {
        if !diagram.contains_node(edge.source_ptr) {
            violations.push(IntegrityViolation {
                edge: edge.id,
                endpoint: Endpoint::Source,
                missing: edge.source_ptr,
            });
        }
        if !diagram.contains_node(edge.target_ptr) {
            violations.push(IntegrityViolation {
                edge: edge.id,
                endpoint: Endpoint::Target,
                missing: edge.target_ptr,
            });
        }
    }
    violations
}
