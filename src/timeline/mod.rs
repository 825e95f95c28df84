//! Script model, ordering strategies and the timeline compiler.

/// Timeline compiler.
pub mod compiler;
/// Declarative animation scripts.
pub mod script;
/// Diagram-type ordering strategies.
pub mod strategy;
