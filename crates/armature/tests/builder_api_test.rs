//! Integration tests for the DiagramBuilder API: extraction plus layout.

use armature::{
    DiagramBuilder, config::AppConfig, model::Position, schema::SchemaModel,
};

fn shop_schema() -> SchemaModel {
    let document = serde_json::json!({
        "name": "shop",
        "modules": [{
            "name": "shared_models",
            "classes": [
                {
                    "name": "Owner",
                    "bases": ["Model"],
                    "fields": [{ "name": "name", "type": "str" }],
                    "methods": []
                },
                {
                    "name": "Ticket",
                    "bases": ["Model"],
                    "fields": [
                        { "name": "title", "type": "str" },
                        { "name": "status", "type": "str",
                          "choices": [["A", "Active"], ["I", "Inactive"]] },
                        { "name": "owner", "relation": "foreign_key", "related": "Owner",
                          "nullable": false, "on_delete": "cascade" }
                    ],
                    "methods": [
                        { "name": "resolve", "body": "def resolve(self): return Owner" }
                    ]
                }
            ]
        }]
    });
    serde_json::from_value(document).expect("test schema must deserialize")
}

#[test]
fn process_produces_a_positioned_diagram() {
    let mut config = AppConfig::default();
    config.layout_mut().set_seed(Some(3));
    let builder = DiagramBuilder::new(config);

    let diagram = builder.process(&shop_schema()).expect("process must succeed");

    // Owner, Ticket, and the shared status enum.
    assert_eq!(diagram.nodes.len(), 3);
    assert!(!diagram.edges.is_empty());

    // With more than one node, not everything can sit at the origin.
    assert!(
        diagram
            .nodes
            .iter()
            .any(|node| node.data.position != Position::default())
    );
}

#[test]
fn layout_only_touches_positions() {
    let builder = DiagramBuilder::default();
    let mut diagram = builder.extract(&shop_schema()).expect("extract must succeed");

    let nodes_before: Vec<_> = diagram.nodes.iter().map(|node| node.id).collect();
    let edges_before = diagram.edges.clone();

    builder
        .auto_layout(&mut diagram)
        .expect("layout must succeed");

    let nodes_after: Vec<_> = diagram.nodes.iter().map(|node| node.id).collect();
    assert_eq!(nodes_before, nodes_after);
    assert_eq!(edges_before, diagram.edges);
}

#[test]
fn extract_surfaces_configuration_errors() {
    let schema: SchemaModel =
        serde_json::from_value(serde_json::json!({ "modules": [] })).unwrap();

    let err = DiagramBuilder::default().extract(&schema).unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}

#[test]
fn diagram_serializes_to_the_wire_document() {
    let mut config = AppConfig::default();
    config
        .extract_mut()
        .set_system("28e89254-6b6f-4f83-91ff-8b3611f47d48")
        .set_project("0ae9498f-3535-40d1-bf9f-33e250c21519");
    config.layout_mut().set_seed(Some(9));
    let builder = DiagramBuilder::new(config);

    let diagram = builder.process(&shop_schema()).unwrap();
    let value = serde_json::to_value(&diagram).unwrap();

    assert_eq!(value["type"], "classes");
    assert_eq!(value["system"], "28e89254-6b6f-4f83-91ff-8b3611f47d48");
    assert!(value["nodes"].as_array().unwrap().len() == 3);

    for node in value["nodes"].as_array().unwrap() {
        assert!(node["id"].is_string());
        assert!(node["cls_ptr"].is_string());
        assert!(node["data"]["position"]["x"].is_i64());
        assert!(node["data"]["position"]["y"].is_i64());
        let cls = &node["cls"];
        match cls["type"].as_str().unwrap() {
            "class" => {
                assert!(cls["attributes"].is_array());
                assert!(cls["methods"].is_array());
                assert!(cls["leaf"].is_boolean());
                assert!(cls["abstract"].is_boolean());
            }
            "enum" => {
                assert!(cls["literals"].is_array());
            }
            other => panic!("unexpected classifier type {other}"),
        }
    }

    for edge in value["edges"].as_array().unwrap() {
        assert!(edge["rel"]["type"].is_string());
        assert!(edge["rel"]["multiplicity"]["source"].is_string());
        assert!(edge["rel_ptr"].is_string());
        assert!(edge["source_ptr"].is_string());
        assert!(edge["target_ptr"].is_string());
        assert_eq!(edge["data"], serde_json::json!({}));
    }
}
