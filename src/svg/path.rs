use crate::foundation::core::{BezPath, Point, Vec2};

/// One absolute path segment, normalized from SVG path data.
///
/// `H`/`V` become [`PathCommand::LineTo`]; `S`/`T` get their reflected control point filled in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment.
    LineTo(Point),
    /// Quadratic Bézier segment.
    QuadTo(Point, Point),
    /// Cubic Bézier segment.
    CubicTo(Point, Point, Point),
    /// Elliptical arc segment (SVG endpoint parameterization).
    ArcTo {
        /// Ellipse radii.
        radii: Vec2,
        /// X-axis rotation in degrees.
        x_rotation: f64,
        /// Large-arc flag.
        large_arc: bool,
        /// Sweep flag.
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    /// End point of a drawing segment; `None` for `Close`.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CubicTo(_, _, p) => {
                Some(p)
            }
            Self::ArcTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }
}

/// Parsed path data: the commands read before any error, and whether an error stopped parsing.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ParsedPath {
    pub(crate) commands: Vec<PathCommand>,
    pub(crate) malformed: bool,
}

/// Parse SVG path data. Never fails: parsing stops at the first malformed token.
pub(crate) fn parse_path_data(d: &str) -> ParsedPath {
    let mut p = PathParser {
        src: d.as_bytes(),
        pos: 0,
        out: Vec::new(),
        current: Point::ZERO,
        subpath_start: Point::ZERO,
        last_cubic_ctrl: None,
        last_quad_ctrl: None,
    };
    let ok = p.run().is_some();
    ParsedPath {
        commands: p.out,
        malformed: !ok,
    }
}

/// Convert normalized commands into a `kurbo` path (arcs become cubic approximations).
pub(crate) fn to_bez_path(commands: &[PathCommand]) -> BezPath {
    let mut bez = BezPath::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    let mut open = false;
    for cmd in commands {
        if !open && !matches!(cmd, PathCommand::MoveTo(_)) {
            bez.move_to(current);
            open = true;
        }
        match *cmd {
            PathCommand::MoveTo(p) => {
                bez.move_to(p);
                start = p;
                open = true;
            }
            PathCommand::LineTo(p) => bez.line_to(p),
            PathCommand::QuadTo(c, p) => bez.quad_to(c, p),
            PathCommand::CubicTo(c1, c2, p) => bez.curve_to(c1, c2, p),
            PathCommand::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => {
                let arc = kurbo::SvgArc {
                    from: current,
                    to,
                    radii,
                    x_rotation: x_rotation.to_radians(),
                    large_arc,
                    sweep,
                };
                match kurbo::Arc::from_svg_arc(&arc) {
                    Some(arc) => {
                        for el in arc.append_iter(0.1) {
                            bez.push(el);
                        }
                    }
                    None => bez.line_to(to),
                }
            }
            PathCommand::Close => {
                bez.close_path();
                open = false;
            }
        }
        current = match cmd {
            PathCommand::Close => start,
            other => other.end_point().unwrap_or(current),
        };
    }
    bez
}

struct PathParser<'a> {
    src: &'a [u8],
    pos: usize,
    out: Vec<PathCommand>,
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl PathParser<'_> {
    fn run(&mut self) -> Option<()> {
        self.skip_separators();
        let mut prev: Option<u8> = None;
        while self.pos < self.src.len() {
            let c = self.src[self.pos];
            let cmd = if c.is_ascii_alphabetic() {
                self.pos += 1;
                c
            } else {
                // Implicit repetition; a repeated moveto continues as lineto.
                match prev? {
                    b'M' => b'L',
                    b'm' => b'l',
                    b'Z' | b'z' => return None,
                    other => other,
                }
            };
            self.command(cmd)?;
            prev = Some(cmd);
            self.skip_separators();
        }
        Some(())
    }

    fn command(&mut self, cmd: u8) -> Option<()> {
        let rel = cmd.is_ascii_lowercase();
        let base = if rel { self.current.to_vec2() } else { Vec2::ZERO };
        let upper = cmd.to_ascii_uppercase();

        let emitted = match upper {
            b'M' => {
                let p = self.point()? + base;
                self.subpath_start = p;
                PathCommand::MoveTo(p)
            }
            b'L' => PathCommand::LineTo(self.point()? + base),
            b'H' => {
                let x = self.number()? + base.x;
                PathCommand::LineTo(Point::new(x, self.current.y))
            }
            b'V' => {
                let y = self.number()? + base.y;
                PathCommand::LineTo(Point::new(self.current.x, y))
            }
            b'C' => {
                let c1 = self.point()? + base;
                let c2 = self.point()? + base;
                let p = self.point()? + base;
                PathCommand::CubicTo(c1, c2, p)
            }
            b'S' => {
                let c1 = reflect(self.last_cubic_ctrl, self.current);
                let c2 = self.point()? + base;
                let p = self.point()? + base;
                PathCommand::CubicTo(c1, c2, p)
            }
            b'Q' => {
                let c = self.point()? + base;
                let p = self.point()? + base;
                PathCommand::QuadTo(c, p)
            }
            b'T' => {
                let c = reflect(self.last_quad_ctrl, self.current);
                let p = self.point()? + base;
                PathCommand::QuadTo(c, p)
            }
            b'A' => {
                let rx = self.number()?.abs();
                let ry = self.number()?.abs();
                let x_rotation = self.number()?;
                let large_arc = self.flag()?;
                let sweep = self.flag()?;
                let to = self.point()? + base;
                PathCommand::ArcTo {
                    radii: Vec2::new(rx, ry),
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                }
            }
            b'Z' => PathCommand::Close,
            _ => return None,
        };

        self.last_cubic_ctrl = match emitted {
            PathCommand::CubicTo(_, c2, _) => Some(c2),
            _ => None,
        };
        self.last_quad_ctrl = match emitted {
            PathCommand::QuadTo(c, _) => Some(c),
            _ => None,
        };
        self.current = match emitted {
            PathCommand::Close => self.subpath_start,
            other => other.end_point().unwrap_or(self.current),
        };
        self.out.push(emitted);
        Some(())
    }

    fn skip_separators(&mut self) {
        while self.pos < self.src.len()
            && (self.src[self.pos].is_ascii_whitespace() || self.src[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    fn point(&mut self) -> Option<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Some(Point::new(x, y))
    }

    fn flag(&mut self) -> Option<bool> {
        self.skip_separators();
        let v = match self.src.get(self.pos)? {
            b'0' => false,
            b'1' => true,
            _ => return None,
        };
        self.pos += 1;
        Some(v)
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.src;
        let mut i = self.pos;

        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let mut digits = 0;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
            digits += 1;
        }
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return None;
        }
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            if bytes.get(j).is_some_and(u8::is_ascii_digit) {
                while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                    j += 1;
                }
                i = j;
            }
        }

        let text = std::str::from_utf8(&bytes[start..i]).ok()?;
        let v = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
        self.pos = i;
        Some(v)
    }
}

fn reflect(ctrl: Option<Point>, current: Point) -> Point {
    match ctrl {
        Some(c) => current + (current - c),
        None => current,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/path.rs"]
mod tests;
