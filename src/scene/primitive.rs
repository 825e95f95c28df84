use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::svg::path::PathCommand;

/// Geometric shape kind of an extracted primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// `<rect>`
    Rect,
    /// `<circle>`
    Circle,
    /// `<ellipse>`
    Ellipse,
    /// `<line>`
    Line,
    /// `<polyline>`
    Polyline,
    /// `<polygon>`
    Polygon,
    /// `<path>`
    Path,
    /// `<text>`
    Text,
    /// `<g>`
    Group,
}

impl ShapeKind {
    /// Map an SVG tag name to a shape kind. Unsupported tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "polyline" => Self::Polyline,
            "polygon" => Self::Polygon,
            "path" => Self::Path,
            "text" => Self::Text,
            "g" => Self::Group,
            _ => return None,
        };
        Some(kind)
    }

    /// Lowercase tag name, also used as the prefix of generated ids.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Path => "path",
            Self::Text => "text",
            Self::Group => "g",
        }
    }
}

/// Local (untransformed) size of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Extent {
    /// Rectangle size with optional corner radius.
    Size {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// `rx` corner radius.
        corner_radius: f64,
    },
    /// Circle radius.
    Radius(f64),
    /// Ellipse radii.
    Radii {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Shapes sized by their points or children.
    None,
}

/// Resolved fill/stroke style of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintStyle {
    /// Fill colour; `None` when `fill="none"`.
    pub fill: Option<Rgba8>,
    /// Stroke colour; `None` when unset or `stroke="none"`.
    pub stroke: Option<Rgba8>,
    /// Stroke width in user units.
    pub stroke_width: f64,
    /// Element opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
    /// Stroke opacity in `[0, 1]`.
    pub stroke_opacity: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            fill: Some(Rgba8::BLACK),
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
        }
    }
}

/// A single geometric shape extracted from the SVG, before any semantic meaning is assigned.
///
/// Primitives are created once in document order and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Primitive {
    /// Unique id (taken from the document or generated).
    pub id: String,
    /// Whitespace-separated `class` tokens.
    pub classes: Vec<String>,
    /// Shape kind.
    pub kind: ShapeKind,
    /// Anchor position in document space (`x,y`, `cx,cy`, first point, ...).
    pub position: Point,
    /// Local size.
    pub extent: Extent,
    /// Local points of lines, polylines and polygons.
    pub points: Vec<Point>,
    /// Normalized local path commands (paths only).
    pub path: Vec<PathCommand>,
    /// Resolved paint style.
    pub style: PaintStyle,
    /// Accumulated transform from local to document space.
    pub transform: Affine,
    /// Document-space bounding box.
    pub bounds: Rect,
    /// Text content (text only).
    pub text: Option<String>,
    /// Explicit `data-source`/`data-target` endpoint ids, when both are present.
    pub endpoint_refs: Option<(String, String)>,
    /// Id of the enclosing group primitive.
    pub parent: Option<String>,
}

impl Primitive {
    /// Centre of the document-space bounding box.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Document-space points of line-like shapes.
    pub fn world_points(&self) -> Vec<Point> {
        self.points.iter().map(|p| self.transform * *p).collect()
    }
}
