use super::*;

#[test]
fn parse_strips_namespaces_and_keeps_document_order() {
    let xml = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
        <g id="grp">
            <rect id="a" x="1" y="2" width="3" height="4"/>
            <text id="t" x="5" y="6">Hello <tspan>ignored</tspan></text>
        </g>
        <circle id="c" cx="1" cy="1" r="2"/>
    </svg>"##;

    let root = SvgElement::parse(xml).unwrap();
    assert_eq!(root.name, "svg");
    assert_eq!(root.get("width"), Some("200"));
    assert_eq!(root.children.len(), 2);

    let grp = &root.children[0];
    assert_eq!(grp.name, "g");
    assert_eq!(grp.children[0].get("id"), Some("a"));
    assert_eq!(grp.children[1].text.as_deref(), Some("Hello"));
    assert_eq!(root.children[1].name, "circle");
}

#[test]
fn parse_rejects_malformed_xml() {
    let err = SvgElement::parse("<svg><rect></svg>").unwrap_err();
    assert!(matches!(err, MotionError::Svg(_)));
}

#[test]
fn builder_and_lookup_last_attribute_wins() {
    let el = SvgElement::new("rect").attr("fill", "red").attr("fill", "blue");
    assert_eq!(el.get("fill"), Some("blue"));
    assert_eq!(el.get("stroke"), None);
}
