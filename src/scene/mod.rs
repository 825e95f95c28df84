/// Immutable scene graph.
pub mod graph;
/// Extracted geometric primitives.
pub mod primitive;
