use super::*;
use crate::svg::element::SvgElement;
use crate::svg::extract::extract;

fn prim(el: SvgElement) -> Primitive {
    let root = SvgElement::new("svg").child(el);
    extract(&root).primitives.remove(0)
}

fn role_of(el: SvgElement) -> SemanticRole {
    classify(&prim(el), &ClassifierConfig::default())
}

#[test]
fn keywords_in_id_or_class_win_over_shape() {
    assert_eq!(
        role_of(SvgElement::new("path").attr("id", "connector1").attr("d", "M0 0 C1 1 2 2 3 3")),
        SemanticRole::Connector
    );
    assert_eq!(
        role_of(SvgElement::new("line").attr("class", "big Component")),
        SemanticRole::Node
    );
    assert_eq!(
        role_of(SvgElement::new("rect").attr("id", "diagram-title")),
        SemanticRole::Label
    );
    // Node keywords are checked before connector keywords.
    assert_eq!(
        role_of(SvgElement::new("line").attr("id", "node-link")),
        SemanticRole::Node
    );
}

#[test]
fn groups_are_always_groups() {
    assert_eq!(
        role_of(SvgElement::new("g").attr("id", "node-cluster")),
        SemanticRole::Group
    );
}

#[test]
fn shape_defaults() {
    assert_eq!(role_of(SvgElement::new("text")), SemanticRole::Label);
    assert_eq!(role_of(SvgElement::new("rect")), SemanticRole::Node);
    assert_eq!(role_of(SvgElement::new("circle")), SemanticRole::Node);
    assert_eq!(role_of(SvgElement::new("ellipse")), SemanticRole::Node);
    assert_eq!(role_of(SvgElement::new("line")), SemanticRole::Connector);
    assert_eq!(role_of(SvgElement::new("polyline")), SemanticRole::Connector);
    assert_eq!(role_of(SvgElement::new("polygon")), SemanticRole::Decoration);
}

#[test]
fn path_heuristic_separates_straight_connectors_from_shapes() {
    let straight = SvgElement::new("path").attr("d", "M0 0 L10 0 H20 V5");
    assert_eq!(role_of(straight), SemanticRole::Connector);

    let closed = SvgElement::new("path").attr("d", "M0 0 L10 0 L10 10 Z");
    assert_eq!(role_of(closed), SemanticRole::Node);

    let curved = SvgElement::new("path").attr("d", "M0 0 Q5 5 10 0");
    assert_eq!(role_of(curved), SemanticRole::Node);

    let two_moves = SvgElement::new("path").attr("d", "M0 0 L1 1 M2 2 L3 3");
    assert_eq!(role_of(two_moves), SemanticRole::Node);

    let empty = SvgElement::new("path").attr("d", "");
    assert_eq!(role_of(empty), SemanticRole::Node);
}

#[test]
fn rule_list_order_is_fixed() {
    let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "node-keyword",
            "connector-keyword",
            "label-keyword",
            "group-shape",
            "text-shape",
            "closed-shape",
            "open-shape",
            "straight-path",
            "other-path",
        ]
    );
}

#[test]
fn classification_is_deterministic_and_configurable() {
    let p = prim(SvgElement::new("polygon").attr("id", "db-main"));
    let default = ClassifierConfig::default();
    assert_eq!(classify(&p, &default), classify(&p, &default));
    assert_eq!(classify(&p, &default), SemanticRole::Decoration);
    assert!(matching_rule(&p, &default).is_none());

    let custom = ClassifierConfig {
        node_keywords: vec!["db".into()],
        ..ClassifierConfig::default()
    };
    assert_eq!(classify(&p, &custom), SemanticRole::Node);
    assert_eq!(matching_rule(&p, &custom).unwrap().name, "node-keyword");
}
