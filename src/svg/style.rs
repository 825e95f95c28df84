use crate::foundation::core::Rgba8;
use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind};
use crate::scene::primitive::PaintStyle;
use crate::svg::color::{Paint, parse_paint};
use crate::svg::element::SvgElement;

const STYLE_KEYS: &[&str] = &[
    "fill",
    "stroke",
    "stroke-width",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
];

/// Split an inline `style` attribute into `(key, value)` pairs, later entries last.
pub(crate) fn parse_inline_style(s: &str) -> Vec<(&str, &str)> {
    s.split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty() && !v.is_empty()).then_some((k, v))
        })
        .collect()
}

/// Resolve the paint style of `el`.
///
/// Precedence, lowest first: `inherited` (defaults or the parent's inheritable paint), the inline
/// `style` attribute, then direct presentation attributes. Unknown colours resolve to black.
pub(crate) fn resolve_style(
    el: &SvgElement,
    subject: &str,
    inherited: &PaintStyle,
    diagnostics: &mut Vec<Diagnostic>,
) -> PaintStyle {
    let mut style = PaintStyle {
        fill: inherited.fill,
        stroke: inherited.stroke,
        stroke_width: inherited.stroke_width,
        ..PaintStyle::default()
    };

    let inline = el.get("style").map(parse_inline_style).unwrap_or_default();
    for (k, v) in inline {
        apply_decl(&mut style, k, v, subject, diagnostics);
    }
    for key in STYLE_KEYS {
        if let Some(v) = el.get(key) {
            apply_decl(&mut style, key, v, subject, diagnostics);
        }
    }
    style
}

fn apply_decl(
    style: &mut PaintStyle,
    key: &str,
    value: &str,
    subject: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match key {
        "fill" => style.fill = paint(value, subject, diagnostics),
        "stroke" => style.stroke = paint(value, subject, diagnostics),
        "stroke-width" => {
            if let Some(w) = parse_number(value) {
                style.stroke_width = w.max(0.0);
            }
        }
        "opacity" => {
            if let Some(v) = parse_opacity(value) {
                style.opacity = v;
            }
        }
        "fill-opacity" => {
            if let Some(v) = parse_opacity(value) {
                style.fill_opacity = v;
            }
        }
        "stroke-opacity" => {
            if let Some(v) = parse_opacity(value) {
                style.stroke_opacity = v;
            }
        }
        _ => {}
    }
}

fn paint(value: &str, subject: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Rgba8> {
    match parse_paint(value) {
        Paint::None => None,
        Paint::Color(c) => Some(c),
        Paint::Unknown => {
            diagnostics.push(Diagnostic::new(
                subject,
                DiagnosticKind::UnknownColor,
                format!("unrecognized colour '{value}', using black"),
            ));
            Some(Rgba8::BLACK)
        }
    }
}

fn parse_opacity(s: &str) -> Option<f64> {
    let s = s.trim();
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    v.is_finite().then(|| v.clamp(0.0, 1.0))
}

/// Parse a bare number, tolerating a trailing `px`.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim_end();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a document length, stripping `px|pt|mm|cm|in`. Percentages are unresolved.
pub(crate) fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.ends_with('%') {
        return None;
    }
    let s = ["px", "pt", "mm", "cm", "in"]
        .iter()
        .find_map(|unit| s.strip_suffix(unit))
        .unwrap_or(s)
        .trim_end();
    s.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/style.rs"]
mod tests;
