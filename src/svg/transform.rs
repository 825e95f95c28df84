use crate::foundation::core::{Affine, Point, Vec2};

/// Parse an SVG `transform` list into a single affine matrix.
///
/// Functions compose left to right, so `translate(10) scale(2)` scales first, then translates.
/// Returns `None` on any malformed function; callers treat that as identity.
pub(crate) fn parse_transform(s: &str) -> Option<Affine> {
    let mut out = Affine::IDENTITY;
    let mut rest = s.trim();

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_numbers(&rest[open + 1..close])?;
        out = out * transform_fn(name, &args)?;
        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    Some(out)
}

fn transform_fn(name: &str, a: &[f64]) -> Option<Affine> {
    let m = match (name, a.len()) {
        ("translate", 1) => Affine::translate(Vec2::new(a[0], 0.0)),
        ("translate", 2) => Affine::translate(Vec2::new(a[0], a[1])),
        ("scale", 1) => Affine::scale(a[0]),
        ("scale", 2) => Affine::scale_non_uniform(a[0], a[1]),
        ("rotate", 1) => Affine::rotate(a[0].to_radians()),
        ("rotate", 3) => Affine::rotate_about(a[0].to_radians(), Point::new(a[1], a[2])),
        ("skewX", 1) => Affine::skew(a[0].to_radians().tan(), 0.0),
        ("skewY", 1) => Affine::skew(0.0, a[0].to_radians().tan()),
        ("matrix", 6) => Affine::new([a[0], a[1], a[2], a[3], a[4], a[5]]),
        _ => return None,
    };
    Some(m)
}

fn parse_numbers(s: &str) -> Option<Vec<f64>> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/svg/transform.rs"]
mod tests;
