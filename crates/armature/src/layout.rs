//! Auto-layout for assembled diagrams.
//!
//! Layout consumes an assembled [`Diagram`](armature_core::model::Diagram)
//! and assigns each node an integral 2-D position. Every relationship kind
//! is treated as a plain undirected connection for layout purposes; the
//! engine never adds or removes nodes or edges.

pub mod force;

pub use force::Engine;
