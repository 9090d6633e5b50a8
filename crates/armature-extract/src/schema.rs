//! The raw schema document: the pipeline's input representation.
//!
//! A schema document stands in for a reflected class context: one
//! [`SchemaModel`] holds named modules, each module holds the class
//! definitions eligible for diagram extraction. Documents deserialize from
//! JSON. Nothing past this module touches the raw representation; the rest
//! of the pipeline sees fields only through
//! [`FieldDescriptor`](crate::FieldDescriptor).

use serde::Deserialize;

/// Base-class names that belong to the persistence framework rather than the
/// application. They are never modeled entities and never produce
/// generalization edges.
pub fn is_framework_base(name: &str) -> bool {
    name == "Model" || name == "object" || name.starts_with("django.")
}

/// A complete reflected schema: every module the source application exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaModel {
    /// Name of the source application, informational only.
    #[serde(default)]
    pub name: String,
    pub modules: Vec<ModuleSchema>,
}

impl SchemaModel {
    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleSchema> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Returns the only module, if exactly one is defined.
    pub fn sole_module(&self) -> Option<&ModuleSchema> {
        match self.modules.as_slice() {
            [module] => Some(module),
            _ => None,
        }
    }
}

/// One module (sub-namespace) of the schema; the extraction pass operates on
/// a single designated module.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSchema {
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassSchema>,
}

/// A reflected class definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassSchema {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Direct base-class names, framework bases included.
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub methods: Vec<MethodSchema>,
}

/// How a relational field behaves when the referenced row is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    Cascade,
    Protect,
    SetNull,
    #[default]
    Nothing,
}

/// The shape of a relational field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    ManyToMany,
    OneToOne,
    ForeignKey,
}

/// A reflected field, relational or scalar.
///
/// `choices` is kept as a raw JSON value on purpose: the descriptor adapter
/// owns the rule deciding whether a choice list is well-formed, and a
/// malformed list must downgrade the field to non-enum rather than fail
/// deserialization of the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    /// Scalar type name as reported by the schema source. Absent on
    /// relational fields.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub on_delete: DeletePolicy,
    #[serde(default)]
    pub relation: Option<RelationKind>,
    /// Name of the related class; present iff `relation` is set and the
    /// reflection layer could resolve the target.
    #[serde(default)]
    pub related: Option<String>,
    #[serde(default)]
    pub choices: Option<serde_json::Value>,
}

/// A reflected method. `body` is `None` when the source text could not be
/// retrieved (synthetic or native methods).
#[derive(Debug, Clone, Deserialize)]
pub struct MethodSchema {
    pub name: String,
    #[serde(default)]
    pub body: Option<String>,
}
