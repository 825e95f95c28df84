use super::*;
use crate::svg::element::SvgElement;
use crate::svg::extract::extract;

fn prims(children: Vec<SvgElement>) -> Vec<Primitive> {
    let mut root = SvgElement::new("svg");
    root.children = children;
    extract(&root).primitives
}

fn box_at(id: &str, x: f64, y: f64) -> SvgElement {
    SvgElement::new("rect")
        .attr("id", id)
        .attr("x", x.to_string())
        .attr("y", y.to_string())
        .attr("width", "40")
        .attr("height", "20")
}

fn resolve(ps: &[Primitive], roles: &[SemanticRole]) -> (Vec<Connection>, Vec<Diagnostic>) {
    let pairs: Vec<(&Primitive, SemanticRole)> =
        ps.iter().zip(roles.iter().copied()).collect();
    let mut diagnostics = Vec::new();
    let out = resolve_connectors(&pairs, &ResolverOpts::default(), &mut diagnostics).unwrap();
    (out, diagnostics)
}

#[test]
fn path_endpoints_use_first_move_and_last_drawn_point() {
    let ps = prims(vec![
        SvgElement::new("path")
            .attr("id", "p")
            .attr("d", "M5,5 L10,5 Q20,20 30,5 Z"),
    ]);
    let (a, b) = connector_endpoints(&ps[0]);
    assert_eq!(a, Point::new(5.0, 5.0));
    assert_eq!(b, Point::new(30.0, 5.0));
}

#[test]
fn endpoints_are_in_document_space() {
    let ps = prims(vec![
        SvgElement::new("g").attr("transform", "translate(100,0)").child(
            SvgElement::new("line")
                .attr("x1", "0")
                .attr("y1", "0")
                .attr("x2", "10")
                .attr("y2", "0"),
        ),
    ]);
    let (a, b) = connector_endpoints(&ps[1]);
    assert_eq!(a, Point::new(100.0, 0.0));
    assert_eq!(b, Point::new(110.0, 0.0));
}

#[test]
fn endpoints_fall_back_to_bounding_box_corners() {
    let ps = prims(vec![
        SvgElement::new("polygon").attr("points", "0,0 10,0 10,8"),
        SvgElement::new("path").attr("d", "M3,4"),
    ]);
    assert_eq!(
        connector_endpoints(&ps[0]),
        (Point::new(0.0, 0.0), Point::new(10.0, 8.0))
    );
    assert_eq!(
        connector_endpoints(&ps[1]),
        (Point::new(3.0, 4.0), Point::new(3.0, 4.0))
    );
}

#[test]
fn output_is_parallel_to_input_and_nodes_are_untouched() {
    let ps = prims(vec![
        box_at("node1", 0.0, 0.0),
        box_at("node2", 100.0, 0.0),
        SvgElement::new("path")
            .attr("id", "connector1")
            .attr("d", "M20,10 L120,10"),
    ]);
    let roles = [
        SemanticRole::Node,
        SemanticRole::Node,
        SemanticRole::Connector,
    ];
    let (out, diagnostics) = resolve(&ps, &roles);

    assert_eq!(out.len(), 3);
    assert_eq!(out[0], Connection::None);
    assert_eq!(out[1], Connection::None);
    let rc = out[2].resolved().unwrap();
    assert_eq!((rc.start_node.as_str(), rc.end_node.as_str()), ("node1", "node2"));
    assert_eq!(rc.style, ps[2].style);
    assert!(diagnostics.is_empty());
}

#[test]
fn match_distance_is_strict() {
    // node2's centre is (120,10); the end point sits exactly 20 away.
    let ps = prims(vec![
        box_at("node1", 0.0, 0.0),
        box_at("node2", 100.0, 0.0),
        SvgElement::new("path").attr("d", "M20,10 L140,10"),
    ]);
    let roles = [
        SemanticRole::Node,
        SemanticRole::Node,
        SemanticRole::Connector,
    ];
    let (out, _) = resolve(&ps, &roles);
    assert_eq!(
        out[2],
        Connection::Unresolved {
            start: Some("node1".into()),
            end: None,
        }
    );
}

#[test]
fn invalid_endpoint_refs_fall_back_to_geometry() {
    let ps = prims(vec![
        box_at("node1", 0.0, 0.0),
        box_at("node2", 100.0, 0.0),
        SvgElement::new("line")
            .attr("id", "edge")
            .attr("data-from", "node1")
            .attr("data-to", "ghost")
            .attr("x1", "20")
            .attr("y1", "10")
            .attr("x2", "120")
            .attr("y2", "10"),
    ]);
    let roles = [
        SemanticRole::Node,
        SemanticRole::Node,
        SemanticRole::Connector,
    ];
    let (out, diagnostics) = resolve(&ps, &roles);
    assert!(out[2].resolved().is_some());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidEndpointRef);
}

#[test]
fn only_node_roles_are_match_candidates() {
    let ps = prims(vec![
        box_at("a", 0.0, 0.0),
        box_at("b", 100.0, 0.0),
        SvgElement::new("path").attr("d", "M20,10 L120,10"),
    ]);
    let roles = [
        SemanticRole::Node,
        SemanticRole::Decoration,
        SemanticRole::Connector,
    ];
    let (out, diagnostics) = resolve(&ps, &roles);
    assert!(out[2].resolved().is_none());
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnresolvedConnector);
}
