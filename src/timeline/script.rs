use crate::animation::action::{ActionTemplate, AnimationAction};
use crate::foundation::core::Seconds;
use crate::foundation::error::{MotionError, MotionResult};

/// Which entities a composition cue applies to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// These ids, in this order.
    Explicit(Vec<String>),
    /// All nodes, ordered by the active strategy.
    Nodes,
    /// All resolved connectors, ordered by the active strategy.
    Connectors,
    /// Nodes and resolved connectors, ordered by the active strategy.
    All,
}

impl Selection {
    /// `true` when the order comes from a strategy rather than the script.
    pub fn is_derived(&self) -> bool {
        !matches!(self, Self::Explicit(_))
    }
}

/// One item of a `Play` call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Start the action at the `Play` cursor.
    Action(AnimationAction),
    /// Start the action `offset` seconds after the `Play` cursor.
    At {
        /// Relative offset in seconds.
        offset: Seconds,
        /// The action.
        action: AnimationAction,
    },
    /// Instantiate `template` per selected entity, the i-th at `i * delay`.
    Sequential {
        /// Entities to animate.
        selection: Selection,
        /// Action applied to each entity.
        template: ActionTemplate,
        /// Delay between consecutive entities.
        delay: Seconds,
    },
    /// Instantiate `template` per selected entity, staggered by `stagger`.
    Cascade {
        /// Entities to animate.
        selection: Selection,
        /// Action applied to each entity.
        template: ActionTemplate,
        /// Stagger between consecutive entities.
        stagger: Seconds,
    },
}

impl From<AnimationAction> for Cue {
    fn from(action: AnimationAction) -> Self {
        Self::Action(action)
    }
}

impl From<(Seconds, AnimationAction)> for Cue {
    fn from((offset, action): (Seconds, AnimationAction)) -> Self {
        Self::At { offset, action }
    }
}

/// One script call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Start every cue at the cursor (plus its offset), then advance the cursor by `duration`.
    Play {
        /// Cues started by this call.
        cues: Vec<Cue>,
        /// How far the cursor advances. Independent of the actions' own durations.
        duration: Seconds,
    },
    /// Advance the cursor.
    Wait {
        /// Seconds to wait.
        duration: Seconds,
    },
}

/// Ordered list of `Play`/`Wait` calls.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Calls in execution order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `Play` call.
    pub fn play<I, C>(mut self, cues: I, duration: Seconds) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cue>,
    {
        self.steps.push(Step::Play {
            cues: cues.into_iter().map(Into::into).collect(),
            duration,
        });
        self
    }

    /// Append a `Wait` call.
    pub fn wait(mut self, duration: Seconds) -> Self {
        self.steps.push(Step::Wait { duration });
        self
    }

    /// Decode a script from JSON.
    pub fn from_json(s: &str) -> MotionResult<Self> {
        serde_json::from_str(s).map_err(|e| MotionError::serde(format!("script: {e}")))
    }

    /// Encode the script as JSON.
    pub fn to_json(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MotionError::serde(format!("script: {e}")))
    }
}

/// Expand `factory` over `entities`, the i-th action at offset `i * inter_delay`.
pub fn sequential<I, S, F>(
    entities: I,
    factory: F,
    inter_delay: Seconds,
) -> Vec<(Seconds, AnimationAction)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> AnimationAction,
{
    staggered(entities, factory, inter_delay)
}

/// Expand `factory` over `entities`, the i-th action at offset `i * stagger`.
pub fn cascade<I, S, F>(
    entities: I,
    factory: F,
    stagger: Seconds,
) -> Vec<(Seconds, AnimationAction)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> AnimationAction,
{
    staggered(entities, factory, stagger)
}

pub(crate) fn staggered<I, S, F>(
    entities: I,
    mut factory: F,
    delay: Seconds,
) -> Vec<(Seconds, AnimationAction)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> AnimationAction,
{
    entities
        .into_iter()
        .enumerate()
        .map(|(i, id)| (i as f64 * delay, factory(id.as_ref())))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/script.rs"]
mod tests;
