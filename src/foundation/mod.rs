/// Geometry re-exports, colour and time types.
pub mod core;
/// Non-fatal findings reported next to successful results.
pub mod diagnostic;
/// Error taxonomy.
pub mod error;
