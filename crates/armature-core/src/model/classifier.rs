//! Classifier payloads for diagram nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Ptr;

/// Scalar type of a non-relational attribute.
///
/// The extraction pipeline maps every schema field onto one of these; fields
/// without a recognizable mapping default to [`ScalarType::Str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Str,
    Int,
    Bool,
    Datetime,
    Enum,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Str => "str",
            ScalarType::Int => "int",
            ScalarType::Bool => "bool",
            ScalarType::Datetime => "datetime",
            ScalarType::Enum => "enum",
        };
        write!(f, "{name}")
    }
}

/// A single enumeration literal: the key of a choice pair.
///
/// Choice keys are strings or integers in the source schema; both are kept
/// verbatim so the wire document reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Str(String),
    Int(i64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{s}"),
            Literal::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

/// A method signature on a class node.
///
/// Bodies are not carried into the document; the scanner consumes them
/// upstream and only the signature survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
}

impl Method {
    /// Creates a method signature with an empty description and body.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "function".to_string(),
            description: String::new(),
            body: String::new(),
        }
    }
}

/// An attribute record on a class node.
///
/// `enum_ref` is set only for enumeration attributes and points at the shared
/// enum node for the attribute's field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub scalar_type: ScalarType,
    #[serde(rename = "enum")]
    pub enum_ref: Option<Ptr>,
    pub derived: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl Attribute {
    /// Creates a scalar (non-enum) attribute record.
    pub fn scalar(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            enum_ref: None,
            derived: false,
            description: None,
            body: None,
        }
    }

    /// Creates an enumeration attribute referencing a shared enum node.
    pub fn enumeration(name: impl Into<String>, enum_ref: Ptr) -> Self {
        Self {
            name: name.into(),
            scalar_type: ScalarType::Enum,
            enum_ref: Some(enum_ref),
            derived: false,
            description: None,
            body: None,
        }
    }
}

/// The payload of a diagram node: a class or an enumeration.
///
/// Serializes with a `type` tag of `"class"` or `"enum"`, matching the wire
/// document's `cls` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Classifier {
    Class {
        name: String,
        /// True when no other modeled class inherits from this one.
        leaf: bool,
        #[serde(rename = "abstract")]
        is_abstract: bool,
        namespace: String,
        methods: Vec<Method>,
        attributes: Vec<Attribute>,
    },
    Enum {
        name: String,
        literals: Vec<Literal>,
        namespace: String,
    },
}

impl Classifier {
    /// The classifier's display name.
    pub fn name(&self) -> &str {
        match self {
            Classifier::Class { name, .. } | Classifier::Enum { name, .. } => name,
        }
    }

    /// True for enumeration payloads.
    pub fn is_enum(&self) -> bool {
        matches!(self, Classifier::Enum { .. })
    }
}
