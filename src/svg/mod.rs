//! SVG input: element tree, attribute parsers and the primitive extractor.

/// Colour parsing.
pub mod color;
/// Owned element tree.
pub mod element;
/// Primitive extraction.
pub mod extract;
/// Path data parsing.
pub mod path;
/// Style and presentation attributes.
pub mod style;
/// `transform` attribute parsing.
pub mod transform;
