//! Core types for the Armature diagram pipeline.
//!
//! This crate holds the value types shared by every stage of the pipeline:
//! opaque pass-scoped identifiers and the diagram document model (class and
//! enumeration nodes, typed relationship edges, and the diagram container
//! that is handed to the serialization layer).
//!
//! No pipeline logic lives here; extraction is implemented in
//! `armature-extract` and layout in `armature`.

pub mod identifier;
pub mod model;
