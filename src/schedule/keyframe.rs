use crate::animation::ease::Ease;
use crate::foundation::core::{Rgba8, Seconds, Vec2};

/// Animated property a keyframe drives.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Element opacity in `[0, 1]`.
    Opacity,
    /// Bounding-box centre in document space.
    Position,
    /// Rotation in degrees.
    Rotation,
    /// Uniform scale factor.
    Scale,
    /// Emission strength in `[0, 1]`.
    Emission,
    /// Emission colour.
    EmissionColor,
    /// Progress of a flow along a connector in `[0, 1]`.
    FlowProgress,
}

/// Value carried by a keyframe.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyValue {
    /// Single number.
    Scalar(f64),
    /// 2-D vector.
    Vec2(Vec2),
    /// Colour.
    Color(Rgba8),
}

/// Interpolation contract for keyframe values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl Lerp for KeyValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Vec2(x), Self::Vec2(y)) => Self::Vec2(<Vec2 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(<Rgba8 as Lerp>::lerp(x, y, t)),
            // Mismatched kinds cannot blend; hold the earlier value.
            _ => *a,
        }
    }
}

/// One timed value of one property of one entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Entity the value applies to.
    pub entity_id: String,
    /// Absolute time in seconds.
    pub time: Seconds,
    /// Driven property.
    pub property: Property,
    /// Value at `time`.
    pub value: KeyValue,
    /// Easing applied toward the next keyframe of the same track.
    pub easing: Ease,
}

/// Render-agnostic keyframe list, ordered by time, then entity, then property.
///
/// For a given `(entity, property)` pair, keyframe times are strictly increasing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeSchedule {
    /// All keyframes.
    pub keyframes: Vec<Keyframe>,
    /// Time of the last scheduled change (or the timeline end, when later).
    pub duration: Seconds,
}

impl KeyframeSchedule {
    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// `true` when nothing is animated.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Keyframes of one track, in time order.
    pub fn track(&self, entity_id: &str, property: Property) -> Vec<&Keyframe> {
        self.keyframes
            .iter()
            .filter(|k| k.entity_id == entity_id && k.property == property)
            .collect()
    }

    /// Evaluate one track at time `t`.
    ///
    /// Holds the first value before the first key and the last value after the last key.
    /// Returns `None` when the track is empty.
    pub fn sample(&self, entity_id: &str, property: Property, t: Seconds) -> Option<KeyValue> {
        let keys = self.track(entity_id, property);
        let idx = keys.partition_point(|k| k.time <= t);

        if idx == 0 {
            return keys.first().map(|k| k.value);
        }
        if idx >= keys.len() {
            return keys.last().map(|k| k.value);
        }

        let a = keys[idx - 1];
        let b = keys[idx];
        let span = b.time - a.time;
        if span <= 0.0 {
            return Some(a.value);
        }
        let te = a.easing.apply((t - a.time) / span);
        Some(KeyValue::lerp(&a.value, &b.value, te))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/keyframe.rs"]
mod tests;
