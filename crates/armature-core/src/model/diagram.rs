//! The diagram container and node wrapper types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    identifier::Ptr,
    model::{Classifier, Edge},
};

/// An integral 2-D position assigned by the auto-layout engine.
///
/// Positions default to the origin; they carry no meaning until layout has
/// run over the assembled diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Per-node presentation data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub position: Position,
}

/// A diagram node: a classifier payload plus presentation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Ptr,
    pub cls: Classifier,
    #[serde(default)]
    pub data: NodeData,
    pub cls_ptr: Ptr,
}

impl Node {
    /// Wraps a classifier into a node under the given identity, minting a
    /// fresh classifier pointer mirror.
    pub fn new(id: Ptr, cls: Classifier) -> Self {
        Self {
            id,
            cls,
            data: NodeData::default(),
            cls_ptr: Ptr::random(),
        }
    }

    /// The node's display name.
    pub fn name(&self) -> &str {
        self.cls.name()
    }
}

/// The kind of diagram a document describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    #[default]
    Classes,
}

/// An assembled diagram: the complete node and edge set for one extraction
/// pass, plus the identifiers tying it to its owning system and project.
///
/// Diagrams are immutable from the caller's perspective once the pass ends;
/// only the auto-layout step mutates them, and it touches positions alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: Ptr,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub system: String,
    pub project: String,
    #[serde(default)]
    pub description: String,
}

impl Diagram {
    /// Creates an empty diagram bound to a system and project.
    pub fn new(name: impl Into<String>, system: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: Ptr::random(),
            name: name.into(),
            kind: DiagramKind::Classes,
            nodes: Vec::new(),
            edges: Vec::new(),
            system: system.into(),
            project: project.into(),
            description: String::new(),
        }
    }

    /// True when a node with the given id is present.
    pub fn contains_node(&self, id: Ptr) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// Looks up a node by id.
    pub fn find_node(&self, id: Ptr) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks up a node by classifier name.
    pub fn find_node_named(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    /// All node identifiers, in emission order.
    pub fn node_ids(&self) -> impl Iterator<Item = Ptr> + '_ {
        self.nodes.iter().map(|node| node.id)
    }
}
