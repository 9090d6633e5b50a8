//! The pass-scoped pointer registry.
//!
//! One [`PointerRegistry`] lives for exactly one extraction pass. It hands
//! out the opaque identity of every class node (keyed by class name) and
//! every shared enumeration node (keyed by *field* name), creating each
//! identifier on first request and returning the same value thereafter.
//! There is no removal; the registry is dropped with the pass.

use indexmap::IndexMap;

use armature_core::identifier::Ptr;

/// Identity assignment for one extraction pass.
#[derive(Debug, Default)]
pub struct PointerRegistry {
    classes: IndexMap<String, Ptr>,
    enums: IndexMap<String, Ptr>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier for a class, minted on first call and stable for the
    /// rest of the pass.
    pub fn identifier_for(&mut self, class_name: &str) -> Ptr {
        if let Some(ptr) = self.classes.get(class_name) {
            return *ptr;
        }
        let ptr = Ptr::random();
        self.classes.insert(class_name.to_string(), ptr);
        ptr
    }

    /// The identifier for the enumeration node of a field name, minted on
    /// first call and stable for the rest of the pass.
    pub fn enum_identifier_for(&mut self, field_name: &str) -> Ptr {
        if let Some(ptr) = self.enums.get(field_name) {
            return *ptr;
        }
        let ptr = Ptr::random();
        self.enums.insert(field_name.to_string(), ptr);
        ptr
    }

    /// The already-assigned identifier for a class, if any.
    pub fn class_ptr(&self, class_name: &str) -> Option<Ptr> {
        self.classes.get(class_name).copied()
    }

    /// The already-assigned identifier for an enum field name, if any.
    pub fn enum_ptr(&self, field_name: &str) -> Option<Ptr> {
        self.enums.get(field_name).copied()
    }
}
