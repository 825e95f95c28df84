pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Time in seconds on the compiled timeline.
pub type Seconds = f64;

/// Straight-alpha RGBA8 colour (channels are not premultiplied).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the SVG fill default.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque colour from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Format as `#rrggbb` (alpha dropped when opaque) or `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Euclidean distance from `p` to the closest point of `rect` (0 when inside).
pub fn distance_to_rect(p: Point, rect: Rect) -> f64 {
    let dx = (rect.x0 - p.x).max(0.0).max(p.x - rect.x1);
    let dy = (rect.y0 - p.y).max(0.0).max(p.y - rect.y1);
    dx.hypot(dy)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
