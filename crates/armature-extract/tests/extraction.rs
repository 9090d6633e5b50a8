//! End-to-end extraction tests over complete schema documents.

use armature_core::model::{Cardinality, Classifier, Diagram, Literal, RelationshipType, ScalarType};
use armature_extract::{ExtractOptions, Extractor, verify_integrity};

fn extract(json: serde_json::Value, options: ExtractOptions) -> Diagram {
    let schema = serde_json::from_value(json).expect("test schema must deserialize");
    Extractor::new(options)
        .extract(&schema)
        .expect("extraction must succeed")
}

fn shop_schema() -> serde_json::Value {
    serde_json::json!({
        "name": "shop",
        "modules": [{
            "name": "shared_models",
            "classes": [
                {
                    "name": "Owner",
                    "bases": ["Model"],
                    "fields": [
                        { "name": "name", "type": "str" },
                        { "name": "status", "type": "str",
                          "choices": [["A", "Active"], ["I", "Inactive"]] }
                    ],
                    "methods": [
                        { "name": "greeting", "body": "def greeting(self): return self.name" }
                    ]
                },
                {
                    "name": "Ticket",
                    "bases": ["Model"],
                    "fields": [
                        { "name": "title", "type": "str" },
                        { "name": "opened", "type": "datetime" },
                        { "name": "status", "type": "str",
                          "choices": [["A", "Active"], ["I", "Inactive"]] },
                        { "name": "owner", "relation": "foreign_key", "related": "Owner",
                          "nullable": false, "on_delete": "cascade" }
                    ],
                    "methods": [
                        { "name": "resolve", "body": "def resolve(self): return Owner.objects.first()" }
                    ]
                },
                {
                    "name": "Account",
                    "bases": ["Model"],
                    "fields": [
                        { "name": "owner", "relation": "one_to_one", "related": "Owner",
                          "nullable": true, "on_delete": "cascade" }
                    ],
                    "methods": []
                }
            ]
        }]
    })
}

#[test]
fn integrity_holds_for_assembled_diagrams() {
    let diagram = extract(shop_schema(), ExtractOptions::default());

    assert!(verify_integrity(&diagram).is_empty());
    for edge in &diagram.edges {
        assert!(diagram.contains_node(edge.source_ptr));
        assert!(diagram.contains_node(edge.target_ptr));
    }
}

#[test]
fn composition_scenario_non_nullable_cascading_foreign_key() {
    // Ticket has a non-nullable cascading foreign key to Owner: one
    // composition edge, reversed to Owner -> Ticket, {1, 1..*}.
    let diagram = extract(shop_schema(), ExtractOptions::default());
    let owner = diagram.find_node_named("Owner").unwrap();
    let ticket = diagram.find_node_named("Ticket").unwrap();

    let compositions: Vec<_> = diagram
        .edges
        .iter()
        .filter(|edge| edge.rel.kind == RelationshipType::Composition)
        .collect();

    assert_eq!(compositions.len(), 1);
    let edge = compositions[0];
    assert_eq!(edge.source_ptr, owner.id);
    assert_eq!(edge.target_ptr, ticket.id);
    assert_eq!(edge.rel.multiplicity.source, Cardinality::One);
    assert_eq!(edge.rel.multiplicity.target, Cardinality::AtLeastOne);
}

#[test]
fn association_scenario_nullable_cascading_one_to_one() {
    // Account has a nullable one-to-one to Owner with cascade delete: one
    // association edge, Account -> Owner, {1, 0..1}.
    let diagram = extract(shop_schema(), ExtractOptions::default());
    let account = diagram.find_node_named("Account").unwrap();
    let owner = diagram.find_node_named("Owner").unwrap();

    let associations: Vec<_> = diagram
        .edges
        .iter()
        .filter(|edge| edge.rel.kind == RelationshipType::Association)
        .collect();

    assert_eq!(associations.len(), 1);
    let edge = associations[0];
    assert_eq!(edge.source_ptr, account.id);
    assert_eq!(edge.target_ptr, owner.id);
    assert_eq!(edge.rel.multiplicity.source, Cardinality::One);
    assert_eq!(edge.rel.multiplicity.target, Cardinality::Optional);
}

#[test]
fn shared_enum_field_yields_one_node_and_two_dependencies() {
    // "status" appears on Owner and Ticket: exactly one enum node with
    // literals ["A", "I"], one "depends" edge per declaring class.
    let diagram = extract(shop_schema(), ExtractOptions::default());

    let enum_nodes: Vec<_> = diagram
        .nodes
        .iter()
        .filter(|node| node.cls.is_enum())
        .collect();
    assert_eq!(enum_nodes.len(), 1);

    let status = enum_nodes[0];
    assert_eq!(status.name(), "status");
    match &status.cls {
        Classifier::Enum { literals, .. } => {
            assert_eq!(literals, &vec![Literal::from("A"), Literal::from("I")]);
        }
        other => panic!("expected enum classifier, got {other:?}"),
    }

    let depends: Vec<_> = diagram
        .edges
        .iter()
        .filter(|edge| edge.rel.label == "depends")
        .collect();
    assert_eq!(depends.len(), 2);
    assert!(depends.iter().all(|edge| edge.target_ptr == status.id));

    // Both declaring classes reference the single node from their attributes.
    for class_name in ["Owner", "Ticket"] {
        let node = diagram.find_node_named(class_name).unwrap();
        match &node.cls {
            Classifier::Class { attributes, .. } => {
                let attr = attributes.iter().find(|attr| attr.name == "status").unwrap();
                assert_eq!(attr.scalar_type, ScalarType::Enum);
                assert_eq!(attr.enum_ref, Some(status.id));
            }
            other => panic!("expected class classifier, got {other:?}"),
        }
    }
}

#[test]
fn method_body_mention_yields_calls_edge() {
    // Ticket::resolve mentions Owner as a standalone token.
    let diagram = extract(shop_schema(), ExtractOptions::default());
    let ticket = diagram.find_node_named("Ticket").unwrap();
    let owner = diagram.find_node_named("Owner").unwrap();

    let calls: Vec<_> = diagram
        .edges
        .iter()
        .filter(|edge| edge.rel.label == "calls")
        .collect();

    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].source_ptr, ticket.id);
    assert_eq!(calls[0].target_ptr, owner.id);
    assert_eq!(calls[0].rel.kind, RelationshipType::Dependency);
}

#[test]
fn scanner_can_be_disabled() {
    let diagram = extract(
        shop_schema(),
        ExtractOptions {
            include_method_dependencies: false,
            ..ExtractOptions::default()
        },
    );

    assert!(diagram.edges.iter().all(|edge| edge.rel.label != "calls"));
}

#[test]
fn suppression_drops_structural_edge_behind_calls() {
    // With suppression on, Ticket -> Owner already has a calls edge, so the
    // composition for the owner field disappears.
    let diagram = extract(
        shop_schema(),
        ExtractOptions {
            suppress_after_calls: true,
            ..ExtractOptions::default()
        },
    );

    assert!(
        diagram
            .edges
            .iter()
            .all(|edge| edge.rel.kind != RelationshipType::Composition)
    );

    // The Account association survives: no calls edge links that pair.
    assert!(
        diagram
            .edges
            .iter()
            .any(|edge| edge.rel.kind == RelationshipType::Association)
    );
}

#[test]
fn extraction_is_idempotent_per_class() {
    let mut doubled = shop_schema();
    let classes = doubled["modules"][0]["classes"].as_array().unwrap().clone();
    doubled["modules"][0]["classes"]
        .as_array_mut()
        .unwrap()
        .extend(classes);

    let diagram = extract(doubled, ExtractOptions::default());
    let baseline = extract(shop_schema(), ExtractOptions::default());

    assert_eq!(diagram.nodes.len(), baseline.nodes.len());
    assert_eq!(diagram.edges.len(), baseline.edges.len());
}

#[test]
fn generalization_links_child_to_modeled_parent() {
    let schema = serde_json::json!({
        "modules": [{
            "name": "m",
            "classes": [
                { "name": "Person", "bases": ["Model"],
                  "fields": [{ "name": "name", "type": "str" }] },
                { "name": "Admin", "bases": ["Person"],
                  "fields": [{ "name": "level", "type": "int" }] }
            ]
        }]
    });

    let diagram = extract(schema, ExtractOptions::default());
    let person = diagram.find_node_named("Person").unwrap();
    let admin = diagram.find_node_named("Admin").unwrap();

    let generalizations: Vec<_> = diagram
        .edges
        .iter()
        .filter(|edge| edge.rel.kind == RelationshipType::Generalization)
        .collect();

    assert_eq!(generalizations.len(), 1);
    assert_eq!(generalizations[0].source_ptr, admin.id);
    assert_eq!(generalizations[0].target_ptr, person.id);
    assert_eq!(generalizations[0].rel.label, "inherits");
}

#[test]
fn system_and_project_are_carried_verbatim() {
    let diagram = extract(
        shop_schema(),
        ExtractOptions {
            system: "eb846e17-a261-470a-abeb-09cd29980a46".to_string(),
            project: "99fc3c09-07bc-43d2-bf59-429f99a35839".to_string(),
            ..ExtractOptions::default()
        },
    );

    assert_eq!(diagram.system, "eb846e17-a261-470a-abeb-09cd29980a46");
    assert_eq!(diagram.project, "99fc3c09-07bc-43d2-bf59-429f99a35839");
}
