//! Edge payloads: typed relationships with multiplicity.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::Ptr;

/// The relationship taxonomy.
///
/// Every inter-class reference is classified into exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    /// Inheritance between a subtype and its supertype.
    Generalization,
    /// Ownership; the referenced entity's lifetime is bound to the owner.
    Composition,
    /// A non-owning reference.
    Association,
    /// Usage without structure: enum references and behavioral calls.
    Dependency,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipType::Generalization => "generalization",
            RelationshipType::Composition => "composition",
            RelationshipType::Association => "association",
            RelationshipType::Dependency => "dependency",
        };
        write!(f, "{name}")
    }
}

/// A cardinality token on one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "0..1")]
    Optional,
    #[serde(rename = "1..*")]
    AtLeastOne,
    #[serde(rename = "*")]
    Many,
}

impl Cardinality {
    /// The token written to the wire document.
    pub fn token(&self) -> &'static str {
        match self {
            Cardinality::One => "1",
            Cardinality::Optional => "0..1",
            Cardinality::AtLeastOne => "1..*",
            Cardinality::Many => "*",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Error for unrecognized cardinality tokens.
#[derive(Debug, Error)]
#[error("invalid cardinality token: {0}")]
pub struct InvalidCardinality(String);

impl std::str::FromStr for Cardinality {
    type Err = InvalidCardinality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Cardinality::One),
            "0..1" => Ok(Cardinality::Optional),
            "1..*" => Ok(Cardinality::AtLeastOne),
            "*" => Ok(Cardinality::Many),
            other => Err(InvalidCardinality(other.to_string())),
        }
    }
}

/// Source and target cardinalities of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiplicity {
    pub source: Cardinality,
    pub target: Cardinality,
}

impl Multiplicity {
    /// The 1:1 multiplicity used by generalization and dependency edges.
    pub const ONE_TO_ONE: Multiplicity = Multiplicity {
        source: Cardinality::One,
        target: Cardinality::One,
    };

    pub fn new(source: Cardinality, target: Cardinality) -> Self {
        Self { source, target }
    }
}

/// The typed payload of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub label: String,
    #[serde(default)]
    pub derived: bool,
    pub multiplicity: Multiplicity,
}

impl Relation {
    pub fn new(kind: RelationshipType, label: impl Into<String>, multiplicity: Multiplicity) -> Self {
        Self {
            kind,
            label: label.into(),
            derived: false,
            multiplicity,
        }
    }
}

/// Free-form edge data; empty in extracted diagrams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {}

/// A directed edge between two diagram nodes.
///
/// `source_ptr` and `target_ptr` reference node ids; the assembler's
/// integrity check enforces that both exist in the same diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: Ptr,
    pub rel: Relation,
    #[serde(default)]
    pub data: EdgeData,
    pub rel_ptr: Ptr,
    pub source_ptr: Ptr,
    pub target_ptr: Ptr,
}

impl Edge {
    /// Creates an edge between two nodes, minting fresh edge and relation
    /// pointers.
    pub fn new(rel: Relation, source_ptr: Ptr, target_ptr: Ptr) -> Self {
        Self {
            id: Ptr::random(),
            rel,
            data: EdgeData::default(),
            rel_ptr: Ptr::random(),
            source_ptr,
            target_ptr,
        }
    }

    /// True when this edge links the given ordered pair of nodes.
    pub fn connects(&self, source_ptr: Ptr, target_ptr: Ptr) -> bool {
        self.source_ptr == source_ptr && self.target_ptr == target_ptr
    }
}
