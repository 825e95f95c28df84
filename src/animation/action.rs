use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rgba8, Seconds};
use crate::foundation::error::{MotionError, MotionResult};

/// Colour used by highlight and flow effects when none is given.
pub const DEFAULT_HIGHLIGHT: Rgba8 = Rgba8::rgb(255, 196, 0);

fn default_highlight() -> Rgba8 {
    DEFAULT_HIGHLIGHT
}

/// What an action does to its target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Opacity from 0 to the entity's authored opacity, or to 1 when it is authored as 0.
    FadeIn,
    /// Opacity from the current value to 0.
    FadeOut,
    /// Move the entity's centre to `destination`.
    MoveTo {
        /// Target centre in document space.
        destination: Point,
    },
    /// Rotate to an absolute angle.
    RotateTo {
        /// Angle in degrees.
        degrees: f64,
    },
    /// Scale uniformly to an absolute factor.
    ScaleTo {
        /// Uniform scale factor.
        scale: f64,
    },
    /// Ramp emission up to full strength.
    Highlight {
        /// Emission colour.
        #[serde(default = "default_highlight")]
        color: Rgba8,
    },
    /// Run a flow along a connector and pulse the nodes downstream of it.
    FlowAlong {
        /// Emission colour of the flow and pulses.
        #[serde(default = "default_highlight")]
        color: Rgba8,
        /// Pulses per second; must be positive.
        speed: f64,
    },
}

impl Effect {
    /// Stable snake_case name of the effect.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
            Self::MoveTo { .. } => "move_to",
            Self::RotateTo { .. } => "rotate_to",
            Self::ScaleTo { .. } => "scale_to",
            Self::Highlight { .. } => "highlight",
            Self::FlowAlong { .. } => "flow_along",
        }
    }

    fn validate(&self) -> MotionResult<()> {
        let finite = |v: f64, what: &str| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(MotionError::validation(format!(
                    "{} {what} must be finite",
                    self.name()
                )))
            }
        };
        match self {
            Self::FadeIn | Self::FadeOut | Self::Highlight { .. } => Ok(()),
            Self::MoveTo { destination } => {
                finite(destination.x, "destination")?;
                finite(destination.y, "destination")
            }
            Self::RotateTo { degrees } => finite(*degrees, "angle"),
            Self::ScaleTo { scale } => finite(*scale, "scale"),
            Self::FlowAlong { speed, .. } => {
                if speed.is_finite() && *speed > 0.0 {
                    Ok(())
                } else {
                    Err(MotionError::validation(format!(
                        "flow_along speed must be positive, got {speed}"
                    )))
                }
            }
        }
    }
}

/// One animation applied to one scene entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationAction {
    /// Entity id the action animates.
    pub target: String,
    /// Motion length in seconds.
    pub duration: Seconds,
    /// Easing toward the post-value.
    #[serde(default)]
    pub ease: Ease,
    /// The effect itself.
    #[serde(flatten)]
    pub effect: Effect,
}

impl AnimationAction {
    /// Build an action with the default ease.
    pub fn new(target: impl Into<String>, duration: Seconds, effect: Effect) -> Self {
        Self {
            target: target.into(),
            duration,
            ease: Ease::default(),
            effect,
        }
    }

    /// Fade `target` in.
    pub fn fade_in(target: impl Into<String>, duration: Seconds) -> Self {
        Self::new(target, duration, Effect::FadeIn)
    }

    /// Fade `target` out.
    pub fn fade_out(target: impl Into<String>, duration: Seconds) -> Self {
        Self::new(target, duration, Effect::FadeOut)
    }

    /// Move `target`'s centre to `destination`.
    pub fn move_to(target: impl Into<String>, destination: Point, duration: Seconds) -> Self {
        Self::new(target, duration, Effect::MoveTo { destination })
    }

    /// Rotate `target` to `degrees`.
    pub fn rotate_to(target: impl Into<String>, degrees: f64, duration: Seconds) -> Self {
        Self::new(target, duration, Effect::RotateTo { degrees })
    }

    /// Scale `target` to `scale`.
    pub fn scale_to(target: impl Into<String>, scale: f64, duration: Seconds) -> Self {
        Self::new(target, duration, Effect::ScaleTo { scale })
    }

    /// Highlight `target` with the default colour.
    pub fn highlight(target: impl Into<String>, duration: Seconds) -> Self {
        Self::new(
            target,
            duration,
            Effect::Highlight {
                color: DEFAULT_HIGHLIGHT,
            },
        )
    }

    /// Flow along `connector` and pulse downstream nodes.
    pub fn flow_along(
        connector: impl Into<String>,
        color: Rgba8,
        speed: f64,
        duration: Seconds,
    ) -> Self {
        Self::new(connector, duration, Effect::FlowAlong { color, speed })
    }

    /// Replace the ease.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Check value ranges. Does not look at the scene.
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(MotionError::validation(format!(
                "{} on '{}' has invalid duration {}",
                self.effect.name(),
                self.target,
                self.duration
            )));
        }
        self.effect.validate()
    }
}

/// An action without a target, instantiated once per entity by composition cues.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionTemplate {
    /// Motion length in seconds.
    pub duration: Seconds,
    /// Easing toward the post-value.
    #[serde(default)]
    pub ease: Ease,
    /// The effect applied to each entity.
    #[serde(flatten)]
    pub effect: Effect,
}

impl ActionTemplate {
    /// Template with the default ease.
    pub fn new(effect: Effect, duration: Seconds) -> Self {
        Self {
            duration,
            ease: Ease::default(),
            effect,
        }
    }

    /// Bind the template to `target`.
    pub fn instantiate(&self, target: impl Into<String>) -> AnimationAction {
        AnimationAction {
            target: target.into(),
            duration: self.duration,
            ease: self.ease,
            effect: self.effect.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
