//! The relationship classifier.
//!
//! Classifies every inter-class reference of one class into the relationship
//! taxonomy. Inheritance runs first: each modeled ancestor yields a
//! generalization edge, and fields declared on modeled ancestors are excluded
//! from field processing so a child never re-emits its parent's edges. Field
//! relationships are then classified by the kind rule: a reference that
//! cascades deletion and is non-nullable is a composition (with the edge
//! reversed, whole to part); everything else is an association. Enumeration
//! fields contribute dependency edges to their shared enum node.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use armature_core::{
    identifier::Ptr,
    model::{Cardinality, Edge, Multiplicity, Relation, RelationshipType},
};

use crate::{
    descriptor::FieldDescriptor,
    registry::PointerRegistry,
    schema::{ClassSchema, RelationKind, is_framework_base},
};

/// Name-indexed view of the modeled classes of one pass.
pub(crate) type ClassIndex<'a> = IndexMap<&'a str, &'a ClassSchema>;

/// Emits all edges contributed by one class: generalizations, field
/// relationships, and enum dependencies.
///
/// `existing_edges` is the accumulated edge set of the pass so far; it feeds
/// the optional suppression rule that drops a structural edge when the
/// dependency scanner already linked the same pair.
pub(crate) fn classify_class(
    class: &ClassSchema,
    classes: &ClassIndex<'_>,
    registry: &PointerRegistry,
    existing_edges: &[Edge],
    suppress_after_calls: bool,
) -> Vec<Edge> {
    let Some(source_ptr) = registry.class_ptr(&class.name) else {
        warn!(class = class.name; "Class missing from registry, skipping relationships");
        return Vec::new();
    };

    let mut edges = Vec::new();

    // Inheritance first; its field set gates the field pass below.
    for base in &class.bases {
        if is_framework_base(base) {
            continue;
        }
        let Some(target_ptr) = registry.class_ptr(base) else {
            continue;
        };
        edges.push(Edge::new(
            Relation::new(
                RelationshipType::Generalization,
                "inherits",
                Multiplicity::ONE_TO_ONE,
            ),
            source_ptr,
            target_ptr,
        ));
    }

    let inherited = inherited_field_names(class, classes);
    let ancestors = ancestor_names(class, classes);

    for field in &class.fields {
        if inherited.contains(field.name.as_str()) {
            continue;
        }
        let descriptor = FieldDescriptor::new(field);

        if descriptor.is_relation() {
            let Some(related) = descriptor.related_class() else {
                warn!(
                    class = class.name,
                    field = field.name;
                    "Relational field without resolved target, skipping"
                );
                continue;
            };
            let Some(target_ptr) = registry.class_ptr(related) else {
                warn!(
                    class = class.name,
                    field = field.name,
                    related = related;
                    "Related class is not modeled, skipping"
                );
                continue;
            };

            if suppress_after_calls && has_calls_edge(existing_edges, source_ptr, target_ptr) {
                debug!(
                    class = class.name,
                    related = related;
                    "Structural edge suppressed by existing calls dependency"
                );
                continue;
            }

            if let Some(edge) =
                classify_field(&descriptor, source_ptr, target_ptr, &ancestors)
            {
                edges.push(edge);
            }
        } else if descriptor.is_enum() {
            // The attribute builder runs first, so the enum node exists.
            if let Some(enum_ptr) = registry.enum_ptr(descriptor.name()) {
                edges.push(Edge::new(
                    Relation::new(
                        RelationshipType::Dependency,
                        "depends",
                        Multiplicity::ONE_TO_ONE,
                    ),
                    source_ptr,
                    enum_ptr,
                ));
            }
        }
    }

    edges
}

/// Classifies one relational field into an edge, or `None` when the field
/// re-states inheritance.
fn classify_field(
    descriptor: &FieldDescriptor<'_>,
    source_ptr: Ptr,
    target_ptr: Ptr,
    ancestors: &HashSet<&str>,
) -> Option<Edge> {
    let related = descriptor.related_class()?;

    match descriptor.relation_kind()? {
        RelationKind::ManyToMany => {
            let multiplicity = Multiplicity::new(
                Cardinality::Many,
                if descriptor.nullable() {
                    Cardinality::Many
                } else {
                    Cardinality::AtLeastOne
                },
            );
            Some(Edge::new(
                Relation::new(RelationshipType::Association, "connects", multiplicity),
                source_ptr,
                target_ptr,
            ))
        }
        RelationKind::OneToOne => {
            let multiplicity = Multiplicity::new(
                Cardinality::One,
                if descriptor.nullable() {
                    Cardinality::Optional
                } else {
                    Cardinality::One
                },
            );
            directed_edge(descriptor, related, ancestors, multiplicity, source_ptr, target_ptr)
        }
        RelationKind::ForeignKey => {
            let multiplicity = Multiplicity::new(
                Cardinality::One,
                if descriptor.nullable() {
                    Cardinality::Many
                } else {
                    Cardinality::AtLeastOne
                },
            );
            directed_edge(descriptor, related, ancestors, multiplicity, source_ptr, target_ptr)
        }
    }
}

/// Applies the kind rule to a to-one reference and orients the edge.
/// Compositions run whole → part: the referenced class owns the declarer.
fn directed_edge(
    descriptor: &FieldDescriptor<'_>,
    related: &str,
    ancestors: &HashSet<&str>,
    multiplicity: Multiplicity,
    source_ptr: Ptr,
    target_ptr: Ptr,
) -> Option<Edge> {
    // A reference to an ancestor is inheritance, already emitted above.
    if ancestors.contains(related) {
        return None;
    }

    if descriptor.cascades_on_delete() && !descriptor.nullable() {
        Some(Edge::new(
            Relation::new(RelationshipType::Composition, "connects", multiplicity),
            target_ptr,
            source_ptr,
        ))
    } else {
        Some(Edge::new(
            Relation::new(RelationshipType::Association, "connects", multiplicity),
            source_ptr,
            target_ptr,
        ))
    }
}

/// Field names declared on any modeled ancestor of `class`.
fn inherited_field_names<'a>(class: &ClassSchema, classes: &ClassIndex<'a>) -> HashSet<&'a str> {
    ancestor_names(class, classes)
        .into_iter()
        .filter_map(|name| classes.get(name))
        .flat_map(|ancestor| ancestor.fields.iter().map(|field| field.name.as_str()))
        .collect()
}

/// Transitive modeled ancestors of `class`, framework bases excluded.
fn ancestor_names<'a>(class: &ClassSchema, classes: &ClassIndex<'a>) -> HashSet<&'a str> {
    let mut ancestors = HashSet::new();
    let mut pending: Vec<&str> = class
        .bases
        .iter()
        .map(String::as_str)
        .filter(|base| !is_framework_base(base))
        .collect();

    while let Some(name) = pending.pop() {
        let Some((key, ancestor)) = classes.get_key_value(name) else {
            continue;
        };
        if !ancestors.insert(*key) {
            continue;
        }
        pending.extend(
            ancestor
                .bases
                .iter()
                .map(String::as_str)
                .filter(|base| !is_framework_base(base)),
        );
    }

    ancestors
}

/// True when a "calls" dependency already links the ordered pair.
fn has_calls_edge(edges: &[Edge], source_ptr: Ptr, target_ptr: Ptr) -> bool {
    edges.iter().any(|edge| {
        edge.rel.kind == RelationshipType::Dependency
            && edge.rel.label == "calls"
            && edge.connects(source_ptr, target_ptr)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DeletePolicy, FieldSchema};

    fn relation_field(
        name: &str,
        kind: RelationKind,
        related: &str,
        nullable: bool,
        on_delete: DeletePolicy,
    ) -> FieldSchema {
        FieldSchema {
            name: name.to_string(),
            type_name: None,
            nullable,
            on_delete,
            relation: Some(kind),
            related: Some(related.to_string()),
            choices: None,
        }
    }

    fn class(name: &str, bases: &[&str], fields: Vec<FieldSchema>) -> ClassSchema {
        ClassSchema {
            name: name.to_string(),
            namespace: String::new(),
            is_abstract: false,
            bases: bases.iter().map(|base| base.to_string()).collect(),
            fields,
            methods: Vec::new(),
        }
    }

    fn setup<'a>(classes: &'a [ClassSchema]) -> (ClassIndex<'a>, PointerRegistry) {
        let index: ClassIndex<'a> = classes
            .iter()
            .map(|class| (class.name.as_str(), class))
            .collect();
        let mut registry = PointerRegistry::new();
        for name in index.keys() {
            registry.identifier_for(name);
        }
        (index, registry)
    }

    #[test]
    fn test_composition_requires_cascade_and_non_nullable() {
        let classes = vec![
            class(
                "Ticket",
                &["Model"],
                vec![relation_field(
                    "owner",
                    RelationKind::ForeignKey,
                    "Owner",
                    false,
                    DeletePolicy::Cascade,
                )],
            ),
            class("Owner", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].rel.kind, RelationshipType::Composition);
        // Reversed: the referenced class is the whole.
        assert_eq!(edges[0].source_ptr, registry.class_ptr("Owner").unwrap());
        assert_eq!(edges[0].target_ptr, registry.class_ptr("Ticket").unwrap());
        assert_eq!(edges[0].rel.multiplicity.source, Cardinality::One);
        assert_eq!(edges[0].rel.multiplicity.target, Cardinality::AtLeastOne);
    }

    #[test]
    fn test_cascade_but_nullable_is_association() {
        let classes = vec![
            class(
                "Account",
                &["Model"],
                vec![relation_field(
                    "owner",
                    RelationKind::OneToOne,
                    "Owner",
                    true,
                    DeletePolicy::Cascade,
                )],
            ),
            class("Owner", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].rel.kind, RelationshipType::Association);
        assert_eq!(edges[0].source_ptr, registry.class_ptr("Account").unwrap());
        assert_eq!(edges[0].target_ptr, registry.class_ptr("Owner").unwrap());
        assert_eq!(edges[0].rel.multiplicity.source, Cardinality::One);
        assert_eq!(edges[0].rel.multiplicity.target, Cardinality::Optional);
    }

    #[test]
    fn test_no_cascade_is_association_regardless_of_nullability() {
        for nullable in [false, true] {
            let classes = vec![
                class(
                    "Ticket",
                    &["Model"],
                    vec![relation_field(
                        "owner",
                        RelationKind::ForeignKey,
                        "Owner",
                        nullable,
                        DeletePolicy::Protect,
                    )],
                ),
                class("Owner", &["Model"], Vec::new()),
            ];
            let (index, registry) = setup(&classes);

            let edges = classify_class(&classes[0], &index, &registry, &[], false);

            assert_eq!(edges[0].rel.kind, RelationshipType::Association);
        }
    }

    #[test]
    fn test_one_to_one_non_nullable_multiplicity() {
        let classes = vec![
            class(
                "Account",
                &["Model"],
                vec![relation_field(
                    "profile",
                    RelationKind::OneToOne,
                    "Profile",
                    false,
                    DeletePolicy::Nothing,
                )],
            ),
            class("Profile", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges[0].rel.multiplicity.source, Cardinality::One);
        assert_eq!(edges[0].rel.multiplicity.target, Cardinality::One);
    }

    #[test]
    fn test_many_to_many_multiplicity() {
        let classes = vec![
            class(
                "Course",
                &["Model"],
                vec![
                    relation_field(
                        "students",
                        RelationKind::ManyToMany,
                        "Student",
                        false,
                        DeletePolicy::Nothing,
                    ),
                    relation_field(
                        "tutors",
                        RelationKind::ManyToMany,
                        "Student",
                        true,
                        DeletePolicy::Nothing,
                    ),
                ],
            ),
            class("Student", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].rel.kind, RelationshipType::Association);
        assert_eq!(edges[0].rel.label, "connects");
        assert_eq!(edges[0].rel.multiplicity.source, Cardinality::Many);
        assert_eq!(edges[0].rel.multiplicity.target, Cardinality::AtLeastOne);
        assert_eq!(edges[1].rel.multiplicity.target, Cardinality::Many);
    }

    #[test]
    fn test_generalization_edges_skip_framework_bases() {
        let classes = vec![
            class("Admin", &["Person", "Model"], Vec::new()),
            class("Person", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].rel.kind, RelationshipType::Generalization);
        assert_eq!(edges[0].rel.label, "inherits");
        assert_eq!(edges[0].source_ptr, registry.class_ptr("Admin").unwrap());
        assert_eq!(edges[0].target_ptr, registry.class_ptr("Person").unwrap());
        assert_eq!(edges[0].rel.multiplicity, Multiplicity::ONE_TO_ONE);
    }

    #[test]
    fn test_inherited_fields_are_not_reprocessed() {
        let classes = vec![
            class(
                "Person",
                &["Model"],
                vec![relation_field(
                    "home",
                    RelationKind::ForeignKey,
                    "Address",
                    false,
                    DeletePolicy::Cascade,
                )],
            ),
            class(
                "Admin",
                &["Person"],
                vec![relation_field(
                    "home",
                    RelationKind::ForeignKey,
                    "Address",
                    false,
                    DeletePolicy::Cascade,
                )],
            ),
            class("Address", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[1], &index, &registry, &[], false);

        // Only the generalization edge; the inherited field stays suppressed.
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].rel.kind, RelationshipType::Generalization);
    }

    #[test]
    fn test_reference_to_ancestor_is_skipped() {
        let classes = vec![
            class(
                "Admin",
                &["Person"],
                vec![relation_field(
                    "mentor",
                    RelationKind::ForeignKey,
                    "Person",
                    false,
                    DeletePolicy::Cascade,
                )],
            ),
            class("Person", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].rel.kind, RelationshipType::Generalization);
    }

    #[test]
    fn test_unresolved_target_is_skipped() {
        let classes = vec![class(
            "Ticket",
            &["Model"],
            vec![relation_field(
                "owner",
                RelationKind::ForeignKey,
                "Elsewhere",
                false,
                DeletePolicy::Cascade,
            )],
        )];
        let (index, registry) = setup(&classes);

        let edges = classify_class(&classes[0], &index, &registry, &[], false);

        assert!(edges.is_empty());
    }

    #[test]
    fn test_suppression_rule_respects_calls_edges() {
        let classes = vec![
            class(
                "Ticket",
                &["Model"],
                vec![relation_field(
                    "owner",
                    RelationKind::ForeignKey,
                    "Owner",
                    false,
                    DeletePolicy::Cascade,
                )],
            ),
            class("Owner", &["Model"], Vec::new()),
        ];
        let (index, registry) = setup(&classes);
        let calls = Edge::new(
            Relation::new(
                RelationshipType::Dependency,
                "calls",
                Multiplicity::ONE_TO_ONE,
            ),
            registry.class_ptr("Ticket").unwrap(),
            registry.class_ptr("Owner").unwrap(),
        );

        let suppressed = classify_class(&classes[0], &index, &registry, &[calls.clone()], true);
        assert!(suppressed.is_empty());

        // Default behavior keeps the structural edge.
        let kept = classify_class(&classes[0], &index, &registry, &[calls], false);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].rel.kind, RelationshipType::Composition);
    }
}
