//! The diagram document model.
//!
//! These types describe the graph handed to the serialization and rendering
//! collaborators: classifier nodes (classes and enumerations), typed
//! relationship edges with multiplicity, and the [`Diagram`] container.
//!
//! # Pipeline Position
//!
//! ```text
//! Schema document
//!     ↓ descriptors (armature-extract)
//! Attributes / relationships / dependencies
//!     ↓ assembler
//! Diagram (these types)
//!     ↓ auto-layout (armature)
//! Positioned diagram
//!     ↓ serialization (external)
//! Wire document
//! ```
//!
//! All types serialize directly to the studio's wire format; field renames
//! (`cls`, `cls_ptr`, `rel_ptr`, `source_ptr`, `target_ptr`) match the
//! document consumed downstream.
//!
//! # Organization
//!
//! - [`diagram`] - The [`Diagram`] container, [`Node`] wrapper, and positions
//! - [`classifier`] - Node payloads: [`Classifier`], [`Attribute`], [`Method`]
//! - [`relation`] - Edge payloads: [`Edge`], [`Relation`], [`Multiplicity`]

pub mod classifier;
pub mod diagram;
pub mod relation;

pub use classifier::*;
pub use diagram::*;
pub use relation::*;
