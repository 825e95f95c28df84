/// Curve a keyframe uses to approach the next key on its track.
///
/// Serialized by variant name (`"OutQuad"`), so scripts pick one per action.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Ease {
    /// Constant rate. Post keys of a transition use this.
    Linear,
    /// Starts slow, quadratic.
    InQuad,
    /// Ends slow, quadratic.
    OutQuad,
    /// Slow at both ends, quadratic.
    InOutQuad,
    /// Starts slow, cubic.
    InCubic,
    /// Ends slow, cubic.
    OutCubic,
    /// Slow at both ends, cubic. Actions without an explicit ease use this.
    #[default]
    InOutCubic,
    /// Keep the current value until the next key, then switch. Used for colour keys.
    Hold,
}

impl Ease {
    /// Eased fraction of the way between two keys for normalized progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t.powi(2),
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad => in_out(t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, 3),
            Self::Hold if t < 1.0 => 0.0,
            Self::Hold => 1.0,
        }
    }
}

/// Ease-in power curve on the first half, mirrored on the second.
fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 - 2.0 * t).powi(power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
