use std::collections::HashSet;

use kurbo::Shape;

use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind};
use crate::scene::primitive::{Extent, PaintStyle, Primitive, ShapeKind};
use crate::svg::element::SvgElement;
use crate::svg::path::{parse_path_data, to_bez_path};
use crate::svg::style::{parse_length, parse_number, resolve_style};
use crate::svg::transform::parse_transform;

/// Fallback document size when neither attributes nor `viewBox` resolve.
pub const DEFAULT_DOCUMENT_SIZE: f64 = 100.0;

/// Output of primitive extraction.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Extraction {
    /// Primitives in document order (parents before children).
    pub primitives: Vec<Primitive>,
    /// Nominal document width.
    pub width: f64,
    /// Nominal document height.
    pub height: f64,
    /// Recoverable problems absorbed during extraction.
    pub diagnostics: Vec<Diagnostic>,
}

/// Flatten an SVG element tree into typed primitives.
///
/// Never fails: malformed values fall back to documented defaults and are reported through
/// [`Extraction::diagnostics`].
#[tracing::instrument(skip(root), fields(root = %root.name))]
pub fn extract(root: &SvgElement) -> Extraction {
    let mut cx = ExtractCtx {
        primitives: Vec::new(),
        diagnostics: Vec::new(),
        used_ids: HashSet::new(),
    };

    let (width, height) = document_size(root, &mut cx.diagnostics);
    if root.name == "svg" {
        let root_ctm = element_transform(root, "document", &mut cx.diagnostics);
        let root_style =
            resolve_style(root, "document", &PaintStyle::default(), &mut cx.diagnostics);
        for child in &root.children {
            cx.visit(child, None, root_ctm, &root_style);
        }
    } else {
        cx.visit(root, None, Affine::IDENTITY, &PaintStyle::default());
    }

    tracing::debug!(
        primitives = cx.primitives.len(),
        diagnostics = cx.diagnostics.len(),
        "extracted primitives"
    );
    Extraction {
        primitives: cx.primitives,
        width,
        height,
        diagnostics: cx.diagnostics,
    }
}

fn document_size(root: &SvgElement, diagnostics: &mut Vec<Diagnostic>) -> (f64, f64) {
    let view_box: Option<Vec<f64>> = root.get("viewBox").and_then(|vb| {
        vb.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()
            .filter(|v| v.len() == 4)
    });

    let mut dim = |attr: &str, vb_index: usize| -> f64 {
        if let Some(v) = root.get(attr).and_then(parse_length) {
            return v;
        }
        if let Some(v) = view_box
            .as_ref()
            .map(|vb| vb[vb_index])
            .filter(|v| v.is_finite() && *v > 0.0)
        {
            return v;
        }
        diagnostics.push(Diagnostic::new(
            "document",
            DiagnosticKind::MissingDimension,
            format!("no usable {attr}; defaulting to {DEFAULT_DOCUMENT_SIZE}"),
        ));
        DEFAULT_DOCUMENT_SIZE
    };

    let width = dim("width", 2);
    let height = dim("height", 3);
    (width, height)
}

fn element_transform(el: &SvgElement, subject: &str, diagnostics: &mut Vec<Diagnostic>) -> Affine {
    let Some(raw) = el.get("transform") else {
        return Affine::IDENTITY;
    };
    parse_transform(raw).unwrap_or_else(|| {
        diagnostics.push(Diagnostic::new(
            subject,
            DiagnosticKind::MalformedTransform,
            format!("ignoring malformed transform '{raw}'"),
        ));
        Affine::IDENTITY
    })
}

struct ExtractCtx {
    primitives: Vec<Primitive>,
    diagnostics: Vec<Diagnostic>,
    used_ids: HashSet<String>,
}

impl ExtractCtx {
    /// Convert `el` (and its subtree) and return its document-space bounds if it produced one.
    fn visit(
        &mut self,
        el: &SvgElement,
        parent: Option<&str>,
        parent_ctm: Affine,
        parent_style: &PaintStyle,
    ) -> Option<Rect> {
        let kind = ShapeKind::from_tag(&el.name)?;
        let id = self.assign_id(el, kind);
        let ctm = parent_ctm * element_transform(el, &id, &mut self.diagnostics);
        let style = resolve_style(el, &id, parent_style, &mut self.diagnostics);
        let classes = el
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();

        let mut prim = Primitive {
            id: id.clone(),
            classes,
            kind,
            position: Point::ZERO,
            extent: Extent::None,
            points: Vec::new(),
            path: Vec::new(),
            style,
            transform: ctm,
            bounds: Rect::ZERO,
            text: None,
            endpoint_refs: endpoint_refs(el),
            parent: parent.map(str::to_owned),
        };

        if kind == ShapeKind::Group {
            let index = self.primitives.len();
            self.primitives.push(prim);

            let mut union: Option<Rect> = None;
            for child in &el.children {
                if let Some(b) = self.visit(child, Some(&id), ctm, &style) {
                    union = Some(union.map_or(b, |u| u.union(b)));
                }
            }
            let origin = ctm * Point::ZERO;
            let group = &mut self.primitives[index];
            group.position = origin;
            group.bounds = union.unwrap_or_else(|| Rect::from_points(origin, origin));
            return Some(group.bounds);
        }

        self.fill_geometry(el, &mut prim);
        let bounds = prim.bounds;
        self.primitives.push(prim);
        Some(bounds)
    }

    fn fill_geometry(&mut self, el: &SvgElement, prim: &mut Primitive) {
        let ctm = prim.transform;
        let local_origin;
        match prim.kind {
            ShapeKind::Rect => {
                let x = self.num(el, "x", &prim.id);
                let y = self.num(el, "y", &prim.id);
                let w = self.num(el, "width", &prim.id).max(0.0);
                let h = self.num(el, "height", &prim.id).max(0.0);
                prim.extent = Extent::Size {
                    width: w,
                    height: h,
                    corner_radius: self.num(el, "rx", &prim.id).max(0.0),
                };
                local_origin = Point::new(x, y);
                prim.bounds = ctm.transform_rect_bbox(Rect::new(x, y, x + w, y + h));
            }
            ShapeKind::Circle | ShapeKind::Ellipse => {
                let cx = self.num(el, "cx", &prim.id);
                let cy = self.num(el, "cy", &prim.id);
                let (rx, ry) = if prim.kind == ShapeKind::Circle {
                    let r = self.num(el, "r", &prim.id).max(0.0);
                    prim.extent = Extent::Radius(r);
                    (r, r)
                } else {
                    let rx = self.num(el, "rx", &prim.id).max(0.0);
                    let ry = self.num(el, "ry", &prim.id).max(0.0);
                    prim.extent = Extent::Radii { rx, ry };
                    (rx, ry)
                };
                local_origin = Point::new(cx, cy);
                let ellipse = kurbo::Ellipse::new(local_origin, (rx, ry), 0.0);
                prim.bounds = (ctm * ellipse).bounding_box();
            }
            ShapeKind::Line => {
                let a = Point::new(self.num(el, "x1", &prim.id), self.num(el, "y1", &prim.id));
                let b = Point::new(self.num(el, "x2", &prim.id), self.num(el, "y2", &prim.id));
                prim.points = vec![a, b];
                local_origin = a;
                prim.bounds = points_bounds(&prim.world_points());
            }
            ShapeKind::Polyline | ShapeKind::Polygon => {
                prim.points = self.point_list(el, &prim.id);
                local_origin = prim.points.first().copied().unwrap_or(Point::ZERO);
                prim.bounds = points_bounds(&prim.world_points());
            }
            ShapeKind::Path => {
                let parsed = parse_path_data(el.get("d").unwrap_or_default());
                if parsed.malformed {
                    self.diagnostics.push(Diagnostic::new(
                        &prim.id,
                        DiagnosticKind::MalformedPath,
                        format!(
                            "path data stopped after {} command(s)",
                            parsed.commands.len()
                        ),
                    ));
                }
                local_origin = parsed
                    .commands
                    .first()
                    .and_then(|c| c.end_point())
                    .unwrap_or(Point::ZERO);
                let bez = to_bez_path(&parsed.commands);
                prim.bounds = if bez.elements().len() > 1 {
                    (ctm * bez).bounding_box()
                } else {
                    let o = ctm * local_origin;
                    Rect::from_points(o, o)
                };
                prim.path = parsed.commands;
            }
            ShapeKind::Text => {
                local_origin =
                    Point::new(self.num(el, "x", &prim.id), self.num(el, "y", &prim.id));
                prim.text = el.text.clone();
                let o = ctm * local_origin;
                prim.bounds = Rect::from_points(o, o);
            }
            ShapeKind::Group => local_origin = Point::ZERO,
        }
        prim.position = ctm * local_origin;
    }

    fn assign_id(&mut self, el: &SvgElement, kind: ShapeKind) -> String {
        let base = match el.get("id").map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id.to_owned(),
            None => format!("{}-{}", kind.tag(), self.primitives.len()),
        };
        if self.used_ids.insert(base.clone()) {
            return base;
        }

        let mut n = 2;
        let unique = loop {
            let candidate = format!("{base}-{n}");
            if !self.used_ids.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.diagnostics.push(Diagnostic::new(
            &unique,
            DiagnosticKind::RenamedId,
            format!("duplicate id '{base}' renamed to '{unique}'"),
        ));
        self.used_ids.insert(unique.clone());
        unique
    }

    fn num(&mut self, el: &SvgElement, key: &str, subject: &str) -> f64 {
        let Some(raw) = el.get(key) else {
            return 0.0;
        };
        parse_number(raw).unwrap_or_else(|| {
            self.diagnostics.push(Diagnostic::new(
                subject,
                DiagnosticKind::MalformedNumber,
                format!("attribute {key}='{raw}' is not a number, using 0"),
            ));
            0.0
        })
    }

    fn point_list(&mut self, el: &SvgElement, subject: &str) -> Vec<Point> {
        let tokens: Vec<&str> = el
            .get("points")
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        let nums: Vec<f64> = tokens
            .iter()
            .map_while(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        if nums.len() != tokens.len() || nums.len() % 2 != 0 {
            self.diagnostics.push(Diagnostic::new(
                subject,
                DiagnosticKind::MalformedNumber,
                "points list truncated at first malformed coordinate",
            ));
        }
        nums.chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect()
    }
}

fn endpoint_refs(el: &SvgElement) -> Option<(String, String)> {
    let source = el.get("data-source").or_else(|| el.get("data-from"))?;
    let target = el.get("data-target").or_else(|| el.get("data-to"))?;
    Some((source.trim().to_owned(), target.trim().to_owned()))
}

fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
}

#[cfg(test)]
#[path = "../../tests/unit/svg/extract.rs"]
mod tests;
