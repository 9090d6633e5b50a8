//! Schema-to-diagram extraction for Armature.
//!
//! This crate turns a reflected schema document into a class diagram: it
//! assigns every class and enumeration a stable node identity, classifies
//! each inter-class reference into the UML relationship taxonomy with the
//! correct multiplicity, deduplicates shared enumeration types by field
//! name, infers behavioral "calls" edges by lexically scanning method
//! bodies, and verifies the assembled graph is internally consistent.
//!
//! The pipeline depends on the schema source only through
//! [`FieldDescriptor`]; substituting a different reflection mechanism means
//! writing a new adapter, nothing more.

pub mod error;
pub mod scanner;
pub mod schema;

mod assembler;
mod attributes;
mod descriptor;
mod registry;
mod relationships;

pub use assembler::{ExtractOptions, Extractor, extract, verify_integrity};
pub use descriptor::FieldDescriptor;
pub use error::ExtractError;
pub use registry::PointerRegistry;
