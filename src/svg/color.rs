use crate::foundation::core::Rgba8;

/// Result of parsing an SVG paint value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Paint {
    /// `none`: nothing is painted.
    None,
    /// A recognized colour.
    Color(Rgba8),
    /// Token was not understood. Callers fall back to black.
    Unknown,
}

const NAMED: &[(&str, Rgba8)] = &[
    ("black", Rgba8::rgb(0, 0, 0)),
    ("white", Rgba8::rgb(255, 255, 255)),
    ("red", Rgba8::rgb(255, 0, 0)),
    ("green", Rgba8::rgb(0, 128, 0)),
    ("lime", Rgba8::rgb(0, 255, 0)),
    ("blue", Rgba8::rgb(0, 0, 255)),
    ("yellow", Rgba8::rgb(255, 255, 0)),
    ("orange", Rgba8::rgb(255, 165, 0)),
    ("purple", Rgba8::rgb(128, 0, 128)),
    ("gray", Rgba8::rgb(128, 128, 128)),
    ("grey", Rgba8::rgb(128, 128, 128)),
    ("silver", Rgba8::rgb(192, 192, 192)),
    ("cyan", Rgba8::rgb(0, 255, 255)),
    ("aqua", Rgba8::rgb(0, 255, 255)),
    ("magenta", Rgba8::rgb(255, 0, 255)),
    ("fuchsia", Rgba8::rgb(255, 0, 255)),
    ("navy", Rgba8::rgb(0, 0, 128)),
    ("teal", Rgba8::rgb(0, 128, 128)),
    ("maroon", Rgba8::rgb(128, 0, 0)),
];

/// Parse a `fill`/`stroke` value: hex, `rgb(...)`, a named colour or `none`.
pub(crate) fn parse_paint(s: &str) -> Paint {
    let s = s.trim();
    if s.eq_ignore_ascii_case("none") {
        return Paint::None;
    }
    parse_color(s).map_or(Paint::Unknown, Paint::Color)
}

/// Parse a colour token. Returns `None` for anything unrecognized.
pub fn parse_color(s: &str) -> Option<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = strip_fn(s, "rgb") {
        return parse_rgb_args(args);
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, c)| *c)
}

fn strip_fn<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .trim_end()
        .strip_suffix(')')
}

fn parse_hex(s: &str) -> Option<Rgba8> {
    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }
    fn hex_nibble(c: &str) -> Option<u8> {
        u8::from_str_radix(c, 16).ok().map(|v| v * 17)
    }

    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match s.len() {
        3 => Some(Rgba8::rgb(
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
        )),
        6 => Some(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba8> {
    fn channel(tok: &str) -> Option<u8> {
        let tok = tok.trim();
        let v = match tok.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f64>().ok()? * 255.0 / 100.0,
            None => tok.parse::<f64>().ok()?,
        };
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    }

    let parts: Vec<&str> = args.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    Some(Rgba8::rgb(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}
