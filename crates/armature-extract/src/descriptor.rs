//! The normalized field descriptor.
//!
//! [`FieldDescriptor`] is the only view of a field the rest of the pipeline
//! is allowed to see. It normalizes the raw schema representation (scalar
//! type names, delete policies, raw choice values) into the small contract
//! the attribute builder and relationship classifier depend on, so a
//! different schema source can be substituted without touching either.

use armature_core::model::{Literal, ScalarType};

use crate::schema::{DeletePolicy, FieldSchema, RelationKind};

/// A normalized view over one reflected field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor<'a> {
    field: &'a FieldSchema,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(field: &'a FieldSchema) -> Self {
        Self { field }
    }

    /// The field's name as declared on the class.
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// True when this field references another class.
    pub fn is_relation(&self) -> bool {
        self.field.relation.is_some()
    }

    /// The shape of the relation, if any.
    pub fn relation_kind(&self) -> Option<RelationKind> {
        self.field.relation
    }

    /// The related class name, when the relation target resolved.
    pub fn related_class(&self) -> Option<&'a str> {
        self.field.related.as_deref()
    }

    /// True when the field admits a missing value.
    pub fn nullable(&self) -> bool {
        self.field.nullable
    }

    /// True when deleting the referenced row deletes this one.
    pub fn cascades_on_delete(&self) -> bool {
        self.field.on_delete == DeletePolicy::Cascade
    }

    /// True when the field carries enough metadata to be processed at all.
    /// A non-relational field with no type name and no choice list is
    /// unreflectable and gets skipped by the attribute builder.
    pub fn is_reflectable(&self) -> bool {
        self.is_relation() || self.field.type_name.is_some() || self.field.choices.is_some()
    }

    /// The validated choice list, or `None` when the field is not an
    /// enumeration.
    ///
    /// A field is an enumeration iff its raw `choices` value is a non-empty
    /// array of 2-element `[key, label]` pairs whose key is a string or an
    /// integer. Any malformed shape classifies the field as non-enum rather
    /// than erroring.
    pub fn choice_list(&self) -> Option<Vec<(Literal, String)>> {
        let raw = self.field.choices.as_ref()?.as_array()?;
        if raw.is_empty() {
            return None;
        }

        let mut pairs = Vec::with_capacity(raw.len());
        for choice in raw {
            let pair = choice.as_array()?;
            if pair.len() != 2 {
                return None;
            }
            let key = match &pair[0] {
                serde_json::Value::String(s) => Literal::Str(s.clone()),
                serde_json::Value::Number(n) => Literal::Int(n.as_i64()?),
                _ => return None,
            };
            let label = match &pair[1] {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            pairs.push((key, label));
        }
        Some(pairs)
    }

    /// True when [`choice_list`](Self::choice_list) yields a valid list.
    pub fn is_enum(&self) -> bool {
        !self.is_relation() && self.choice_list().is_some()
    }

    /// Maps the field onto the diagram's scalar type vocabulary. Fields
    /// lacking a recognizable mapping default to `str`.
    pub fn scalar_type(&self) -> ScalarType {
        if self.is_enum() {
            return ScalarType::Enum;
        }
        match self.field.type_name.as_deref() {
            Some("str") | Some("string") | Some("char") | Some("text") => ScalarType::Str,
            Some("int") | Some("integer") => ScalarType::Int,
            Some("bool") | Some("boolean") => ScalarType::Bool,
            Some("datetime") | Some("date") => ScalarType::Datetime,
            _ => ScalarType::Str,
        }
    }
}
