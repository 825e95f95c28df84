//! Recovering diagram meaning from geometry.

/// Role classification rules.
pub mod classify;
/// Connector endpoint resolution.
pub mod resolve;
