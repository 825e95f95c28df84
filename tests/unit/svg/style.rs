use super::*;

fn resolve(el: &SvgElement) -> (PaintStyle, Vec<Diagnostic>) {
    let mut diags = Vec::new();
    let style = resolve_style(el, "subject", &PaintStyle::default(), &mut diags);
    (style, diags)
}

#[test]
fn defaults_are_black_fill_full_opacity() {
    let (style, diags) = resolve(&SvgElement::new("rect"));
    assert_eq!(style, PaintStyle::default());
    assert_eq!(style.fill, Some(Rgba8::BLACK));
    assert!(diags.is_empty());
}

#[test]
fn direct_attributes_beat_inline_style() {
    let el = SvgElement::new("rect")
        .attr("style", "fill: red; stroke:#00f; opacity:0.5;stroke-width:3")
        .attr("fill", "#0f0")
        .attr("opacity", "0.25");
    let (style, _) = resolve(&el);
    assert_eq!(style.fill, Some(Rgba8::rgb(0, 255, 0)));
    assert_eq!(style.stroke, Some(Rgba8::rgb(0, 0, 255)));
    assert_eq!(style.opacity, 0.25);
    assert_eq!(style.stroke_width, 3.0);
}

#[test]
fn unknown_colors_fall_back_to_black_with_diagnostic() {
    let el = SvgElement::new("rect").attr("fill", "chartreuse-ish");
    let (style, diags) = resolve(&el);
    assert_eq!(style.fill, Some(Rgba8::BLACK));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::UnknownColor);
}

#[test]
fn none_disables_paint_and_opacities_clamp() {
    let el = SvgElement::new("rect")
        .attr("fill", "none")
        .attr("fill-opacity", "150%")
        .attr("stroke-opacity", "-1");
    let (style, _) = resolve(&el);
    assert_eq!(style.fill, None);
    assert_eq!(style.fill_opacity, 1.0);
    assert_eq!(style.stroke_opacity, 0.0);
}

#[test]
fn inherited_paint_is_the_base() {
    let parent = PaintStyle {
        fill: Some(Rgba8::rgb(1, 2, 3)),
        stroke: Some(Rgba8::rgb(4, 5, 6)),
        stroke_width: 2.0,
        opacity: 0.1,
        ..PaintStyle::default()
    };
    let mut diags = Vec::new();
    let style = resolve_style(&SvgElement::new("circle"), "c", &parent, &mut diags);
    assert_eq!(style.fill, parent.fill);
    assert_eq!(style.stroke, parent.stroke);
    assert_eq!(style.stroke_width, 2.0);
    assert_eq!(style.opacity, 1.0);
}

#[test]
fn lengths_strip_units_and_reject_percentages() {
    assert_eq!(parse_length("200px"), Some(200.0));
    assert_eq!(parse_length("12.5mm"), Some(12.5));
    assert_eq!(parse_length("3in"), Some(3.0));
    assert_eq!(parse_length("100%"), None);
    assert_eq!(parse_length("abc"), None);
    assert_eq!(parse_number(" 4px"), Some(4.0));
}
