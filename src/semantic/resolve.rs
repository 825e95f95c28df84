use crate::foundation::core::{Point, distance_to_rect};
use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind};
use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::primitive::{PaintStyle, Primitive, ShapeKind};
use crate::semantic::classify::SemanticRole;
use crate::svg::path::PathCommand;

/// Default nearest-node match distance in source geometry units.
pub const DEFAULT_MATCH_DISTANCE: f64 = 20.0;

/// Where on a node the endpoint distance is measured to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatchAnchor {
    /// Centre of the node's bounding box.
    #[default]
    Center,
    /// Closest point of the node's bounding box (0 inside it).
    Bounds,
}

/// Tunables of the relationship resolver.
///
/// The distance is used as-is in the document's coordinate space; it is not scaled to the
/// diagram size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResolverOpts {
    /// A match is accepted when the distance is strictly below this value.
    pub match_distance: f64,
    /// Distance measurement anchor.
    pub anchor: MatchAnchor,
}

impl Default for ResolverOpts {
    fn default() -> Self {
        Self {
            match_distance: DEFAULT_MATCH_DISTANCE,
            anchor: MatchAnchor::Center,
        }
    }
}

/// A connector whose two ends are matched to distinct node entities.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedConnector {
    /// Connector entity id.
    pub id: String,
    /// Node at the connector's start.
    pub start_node: String,
    /// Node at the connector's end.
    pub end_node: String,
    /// Connector paint style.
    pub style: PaintStyle,
}

impl ResolvedConnector {
    /// Build a resolved connector, rejecting self-loops.
    pub fn new(
        id: impl Into<String>,
        start_node: impl Into<String>,
        end_node: impl Into<String>,
        style: PaintStyle,
    ) -> MotionResult<Self> {
        let (id, start_node, end_node) = (id.into(), start_node.into(), end_node.into());
        if start_node == end_node {
            return Err(MotionError::invariant(format!(
                "connector '{id}' resolves to the same node '{start_node}' at both ends"
            )));
        }
        Ok(Self {
            id,
            start_node,
            end_node,
            style,
        })
    }
}

/// Endpoint resolution state of an entity.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Connection {
    /// Not a connector.
    #[default]
    None,
    /// Connector with at most one matched end. Excluded from ordering.
    Unresolved {
        /// Node matched at the start, if any.
        start: Option<String>,
        /// Node matched at the end, if any.
        end: Option<String>,
    },
    /// Both ends matched to distinct nodes.
    Resolved(ResolvedConnector),
}

impl Connection {
    /// The resolved connector, if any.
    pub fn resolved(&self) -> Option<&ResolvedConnector> {
        match self {
            Self::Resolved(rc) => Some(rc),
            _ => None,
        }
    }
}

/// Resolve every connector-role entity against the node-role entities.
///
/// `entities` is in scene insertion order; the result is parallel to it. Nodes are never
/// modified.
pub(crate) fn resolve_connectors(
    entities: &[(&Primitive, SemanticRole)],
    opts: &ResolverOpts,
    diagnostics: &mut Vec<Diagnostic>,
) -> MotionResult<Vec<Connection>> {
    let nodes: Vec<&Primitive> = entities
        .iter()
        .filter(|(_, role)| *role == SemanticRole::Node)
        .map(|(p, _)| *p)
        .collect();

    let mut out = Vec::with_capacity(entities.len());
    for (p, role) in entities {
        if *role != SemanticRole::Connector {
            out.push(Connection::None);
            continue;
        }
        out.push(resolve_one(p, &nodes, opts, diagnostics)?);
    }
    Ok(out)
}

fn resolve_one(
    p: &Primitive,
    nodes: &[&Primitive],
    opts: &ResolverOpts,
    diagnostics: &mut Vec<Diagnostic>,
) -> MotionResult<Connection> {
    if let Some((source, target)) = &p.endpoint_refs {
        let known = |id: &str| nodes.iter().any(|n| n.id == id);
        if source != target && known(source) && known(target) {
            return ResolvedConnector::new(&p.id, source, target, p.style).map(Connection::Resolved);
        }
        diagnostics.push(Diagnostic::new(
            &p.id,
            DiagnosticKind::InvalidEndpointRef,
            format!("endpoint refs '{source}' -> '{target}' do not name two distinct nodes"),
        ));
    }

    let (a, b) = connector_endpoints(p);
    let start = nearest_node(a, nodes, opts);
    let end = nearest_node(b, nodes, opts);

    match (start, end) {
        (Some(s), Some(e)) if s != e => {
            tracing::debug!(connector = %p.id, start = %s, end = %e, "resolved connector");
            ResolvedConnector::new(&p.id, s, e, p.style).map(Connection::Resolved)
        }
        (start, end) => {
            diagnostics.push(Diagnostic::new(
                &p.id,
                DiagnosticKind::UnresolvedConnector,
                format!(
                    "connector endpoints ({:.1},{:.1}) / ({:.1},{:.1}) matched {:?} / {:?}",
                    a.x, a.y, b.x, b.y, start, end
                ),
            ));
            Ok(Connection::Unresolved {
                start: start.map(str::to_owned),
                end: end.map(str::to_owned),
            })
        }
    }
}

/// Document-space start and end points of a connector-shaped primitive.
///
/// Falls back to the bounding box's top-left and bottom-right corners when the geometry does
/// not provide two endpoints.
pub fn connector_endpoints(p: &Primitive) -> (Point, Point) {
    let from_geometry = match p.kind {
        ShapeKind::Line | ShapeKind::Polyline if p.points.len() >= 2 => {
            let pts = p.world_points();
            pts.first().copied().zip(pts.last().copied())
        }
        ShapeKind::Path => path_endpoints(&p.path).map(|(a, b)| (p.transform * a, p.transform * b)),
        _ => None,
    };
    from_geometry.unwrap_or_else(|| {
        (
            Point::new(p.bounds.x0, p.bounds.y0),
            Point::new(p.bounds.x1, p.bounds.y1),
        )
    })
}

fn path_endpoints(commands: &[PathCommand]) -> Option<(Point, Point)> {
    let start = commands.iter().find_map(|c| match c {
        PathCommand::MoveTo(p) => Some(*p),
        _ => None,
    })?;
    let end = commands
        .iter()
        .rev()
        .find(|c| !matches!(c, PathCommand::MoveTo(_) | PathCommand::Close))
        .and_then(PathCommand::end_point)?;
    Some((start, end))
}

fn nearest_node<'a>(pt: Point, nodes: &[&'a Primitive], opts: &ResolverOpts) -> Option<&'a str> {
    let mut best: Option<(f64, &'a Primitive)> = None;
    for node in nodes {
        let d = match opts.anchor {
            MatchAnchor::Center => (node.center() - pt).hypot(),
            MatchAnchor::Bounds => distance_to_rect(pt, node.bounds),
        };
        // Strict comparison keeps the earliest node on ties.
        if d < opts.match_distance && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, *node));
        }
    }
    best.map(|(_, n)| n.id.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/semantic/resolve.rs"]
mod tests;
