//! The attribute builder.
//!
//! Walks a class's non-relational fields, emits attribute records, mints the
//! shared enumeration node on the first encounter of each choice-based field
//! name, and collects the class's own method signatures. A field that cannot
//! be processed is logged and skipped; the class survives.

use log::{debug, warn};

use armature_core::model::{Attribute, Classifier, Method, Node};

use crate::{descriptor::FieldDescriptor, registry::PointerRegistry, schema::ClassSchema};

/// Method names injected by the persistence framework; never part of the
/// class's modeled behavior.
const FRAMEWORK_METHODS: &[&str] = &[
    "check",
    "clean",
    "clean_fields",
    "delete",
    "full_clean",
    "save",
    "save_base",
    "validate_unique",
];

/// Everything the attribute builder produces for one class.
#[derive(Debug, Default)]
pub(crate) struct ClassArtifacts {
    pub attributes: Vec<Attribute>,
    /// Enum nodes minted while processing this class, in field order.
    pub enum_nodes: Vec<Node>,
    pub methods: Vec<Method>,
}

/// Builds the attribute records, freshly-minted enum nodes, and method
/// signatures for one class.
pub(crate) fn build_class_artifacts(
    class: &ClassSchema,
    registry: &mut PointerRegistry,
) -> ClassArtifacts {
    let mut artifacts = ClassArtifacts::default();

    for field in &class.fields {
        let descriptor = FieldDescriptor::new(field);
        if descriptor.is_relation() {
            continue;
        }
        if !descriptor.is_reflectable() {
            warn!(
                class = class.name,
                field = field.name;
                "Skipping unreflectable field"
            );
            continue;
        }

        let attribute = if let Some(choices) = descriptor.choice_list() {
            let enum_ref = match registry.enum_ptr(descriptor.name()) {
                Some(existing) => existing,
                None => {
                    let ptr = registry.enum_identifier_for(descriptor.name());
                    let literals = choices.into_iter().map(|(key, _label)| key).collect();
                    artifacts.enum_nodes.push(Node::new(
                        ptr,
                        Classifier::Enum {
                            name: descriptor.name().to_string(),
                            literals,
                            namespace: String::new(),
                        },
                    ));
                    debug!(field = field.name; "Created enum node");
                    ptr
                }
            };
            Attribute::enumeration(descriptor.name(), enum_ref)
        } else {
            Attribute::scalar(descriptor.name(), descriptor.scalar_type())
        };
        artifacts.attributes.push(attribute);
    }

    artifacts.methods = class
        .methods
        .iter()
        .filter(|method| !method.name.starts_with('_'))
        .filter(|method| !FRAMEWORK_METHODS.contains(&method.name.as_str()))
        .map(|method| Method::named(&method.name))
        .collect();

    artifacts
}
