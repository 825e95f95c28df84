use super::*;
use crate::foundation::core::Rgba8;

fn svg(children: Vec<SvgElement>) -> SvgElement {
    let mut root = SvgElement::new("svg").attr("width", "300px").attr("height", "200");
    root.children = children;
    root
}

fn by_id<'a>(ex: &'a Extraction, id: &str) -> &'a Primitive {
    ex.primitives.iter().find(|p| p.id == id).unwrap()
}

#[test]
fn document_size_resolution_order() {
    let ex = extract(&svg(vec![]));
    assert_eq!((ex.width, ex.height), (300.0, 200.0));

    let root = SvgElement::new("svg")
        .attr("width", "50%")
        .attr("viewBox", "0 0 640 480");
    let ex = extract(&root);
    assert_eq!((ex.width, ex.height), (640.0, 480.0));

    let ex = extract(&SvgElement::new("svg"));
    assert_eq!((ex.width, ex.height), (100.0, 100.0));
    assert_eq!(
        ex.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::MissingDimension)
            .count(),
        2
    );
}

#[test]
fn shapes_get_document_space_bounds() {
    let ex = extract(&svg(vec![
        SvgElement::new("rect")
            .attr("id", "node1")
            .attr("x", "0")
            .attr("y", "0")
            .attr("width", "40")
            .attr("height", "20"),
        SvgElement::new("circle")
            .attr("id", "c")
            .attr("cx", "50")
            .attr("cy", "50")
            .attr("r", "10"),
        SvgElement::new("line")
            .attr("id", "l")
            .attr("x1", "0")
            .attr("y1", "5")
            .attr("x2", "30")
            .attr("y2", "5"),
    ]));

    let rect = by_id(&ex, "node1");
    assert_eq!(rect.kind, ShapeKind::Rect);
    assert_eq!(rect.bounds, Rect::new(0.0, 0.0, 40.0, 20.0));
    assert_eq!(rect.center(), Point::new(20.0, 10.0));

    let circle = by_id(&ex, "c");
    assert_eq!(circle.extent, Extent::Radius(10.0));
    assert!((circle.bounds.x0 - 40.0).abs() < 1e-6);
    assert!((circle.bounds.x1 - 60.0).abs() < 1e-6);

    let line = by_id(&ex, "l");
    assert_eq!(line.points.len(), 2);
    assert_eq!(line.bounds, Rect::new(0.0, 5.0, 30.0, 5.0));
}

#[test]
fn groups_nest_propagate_parent_and_transform() {
    let group = SvgElement::new("g")
        .attr("id", "grp")
        .attr("transform", "translate(100, 10)")
        .attr("fill", "red")
        .child(
            SvgElement::new("rect")
                .attr("id", "inner")
                .attr("width", "10")
                .attr("height", "10"),
        )
        .child(SvgElement::new("g").attr("id", "empty"));
    let ex = extract(&svg(vec![group]));

    let ids: Vec<&str> = ex.primitives.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["grp", "inner", "empty"]);

    let inner = by_id(&ex, "inner");
    assert_eq!(inner.parent.as_deref(), Some("grp"));
    assert_eq!(inner.bounds, Rect::new(100.0, 10.0, 110.0, 20.0));
    assert_eq!(inner.position, Point::new(100.0, 10.0));
    assert_eq!(inner.style.fill, Some(Rgba8::rgb(255, 0, 0)));

    let empty = by_id(&ex, "empty");
    assert_eq!(empty.kind, ShapeKind::Group);
    assert_eq!(empty.parent.as_deref(), Some("grp"));
    assert_eq!(empty.bounds.area(), 0.0);

    assert_eq!(by_id(&ex, "grp").bounds, inner.bounds);
}

#[test]
fn malformed_path_still_yields_primitive() {
    let ex = extract(&svg(vec![
        SvgElement::new("path").attr("id", "bad").attr("d", "M 10 10 L"),
        SvgElement::new("path").attr("id", "worse").attr("d", "garbage"),
    ]));

    let bad = by_id(&ex, "bad");
    assert_eq!(bad.path.len(), 1);
    assert_eq!(bad.bounds, Rect::new(10.0, 10.0, 10.0, 10.0));

    let worse = by_id(&ex, "worse");
    assert!(worse.path.is_empty());
    assert_eq!(worse.bounds.area(), 0.0);

    assert_eq!(
        ex.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::MalformedPath)
            .count(),
        2
    );
}

#[test]
fn unsupported_elements_are_ignored_and_ids_are_made_unique() {
    let ex = extract(&svg(vec![
        SvgElement::new("defs").child(SvgElement::new("rect").attr("id", "hidden")),
        SvgElement::new("rect").attr("id", "dup"),
        SvgElement::new("rect").attr("id", "dup"),
        SvgElement::new("ellipse"),
    ]));

    let ids: Vec<&str> = ex.primitives.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["dup", "dup-2", "ellipse-2"]);
    assert!(
        ex.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::RenamedId && d.subject == "dup-2")
    );
}

#[test]
fn classes_text_and_endpoint_refs_are_captured() {
    let ex = extract(&svg(vec![
        SvgElement::new("text")
            .attr("id", "t")
            .attr("class", "title  big")
            .attr("x", "4")
            .attr("y", "8")
            .with_text("Hello"),
        SvgElement::new("polyline")
            .attr("id", "p")
            .attr("points", "0,0 10,0 10,10")
            .attr("data-source", "a")
            .attr("data-target", "b"),
    ]));

    let t = by_id(&ex, "t");
    assert_eq!(t.classes, vec!["title".to_string(), "big".to_string()]);
    assert_eq!(t.text.as_deref(), Some("Hello"));
    assert_eq!(t.position, Point::new(4.0, 8.0));

    let p = by_id(&ex, "p");
    assert_eq!(p.points.len(), 3);
    assert_eq!(p.endpoint_refs, Some(("a".to_string(), "b".to_string())));
}

#[test]
fn extraction_is_deterministic() {
    let doc = svg(vec![
        SvgElement::new("rect").attr("width", "5").attr("height", "5"),
        SvgElement::new("path").attr("d", "M0 0 C 1 2 3 4 5 6"),
    ]);
    assert_eq!(extract(&doc), extract(&doc));
}
