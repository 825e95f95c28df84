use crate::animation::action::{AnimationAction, Effect};
use crate::foundation::core::Seconds;
use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::graph::SceneGraph;
use crate::semantic::classify::SemanticRole;
use crate::timeline::script::{Cue, Script, Selection, Step, staggered};
use crate::timeline::strategy::OrderingStrategy;

/// One action placed on the absolute timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEntry {
    /// Absolute start time in seconds (never negative).
    pub start_time: Seconds,
    /// The action started at `start_time`.
    pub action: AnimationAction,
}

impl TimelineEntry {
    /// `start_time + action.duration`.
    pub fn end_time(&self) -> Seconds {
        self.start_time + self.action.duration
    }
}

/// Compiled, time-sorted action list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Entries sorted by `start_time`; ties keep script order.
    pub entries: Vec<TimelineEntry>,
    /// Cursor position after the last script step.
    pub end_time: Seconds,
}

impl Timeline {
    /// Latest of `end_time` and every entry's end.
    pub fn span(&self) -> Seconds {
        self.entries
            .iter()
            .map(TimelineEntry::end_time)
            .fold(self.end_time, f64::max)
    }
}

/// Compiles a [`Script`] against one scene and one ordering strategy.
#[derive(Debug)]
pub struct TimelineCompiler<'a> {
    scene: &'a SceneGraph,
    strategy: &'a dyn OrderingStrategy,
}

impl<'a> TimelineCompiler<'a> {
    /// Compiler bound to `scene` and `strategy`.
    pub fn new(scene: &'a SceneGraph, strategy: &'a dyn OrderingStrategy) -> Self {
        Self { scene, strategy }
    }

    /// Walk the script with a cursor and emit absolute-time entries.
    ///
    /// The strategy is validated before any step, so a misconfigured strategy fails even when
    /// the script never asks it for an order.
    #[tracing::instrument(skip_all, fields(strategy = self.strategy.name(), steps = script.steps.len()))]
    pub fn compile(&self, script: &Script) -> MotionResult<Timeline> {
        self.strategy.validate(self.scene)?;

        let mut cursor: Seconds = 0.0;
        let mut entries = Vec::new();
        for step in &script.steps {
            match step {
                Step::Play { cues, duration } => {
                    non_negative("play duration", *duration)?;
                    for cue in cues {
                        for (offset, action) in self.expand(cue)? {
                            self.check_action(&action)?;
                            entries.push(TimelineEntry {
                                start_time: cursor + offset,
                                action,
                            });
                        }
                    }
                    cursor += duration;
                }
                Step::Wait { duration } => {
                    non_negative("wait duration", *duration)?;
                    cursor += duration;
                }
            }
        }

        // `sort_by` is stable: equal start times keep emission order.
        entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        tracing::debug!(entries = entries.len(), end_time = cursor, "compiled timeline");
        Ok(Timeline {
            entries,
            end_time: cursor,
        })
    }

    fn expand(&self, cue: &Cue) -> MotionResult<Vec<(Seconds, AnimationAction)>> {
        match cue {
            Cue::Action(action) => Ok(vec![(0.0, action.clone())]),
            Cue::At { offset, action } => {
                non_negative("cue offset", *offset)?;
                Ok(vec![(*offset, action.clone())])
            }
            Cue::Sequential {
                selection,
                template,
                delay,
            } => {
                non_negative("sequential delay", *delay)?;
                let ids = self.select(selection)?;
                Ok(staggered(ids, |id| template.instantiate(id), *delay))
            }
            Cue::Cascade {
                selection,
                template,
                stagger,
            } => {
                non_negative("cascade stagger", *stagger)?;
                let ids = self.select(selection)?;
                Ok(staggered(ids, |id| template.instantiate(id), *stagger))
            }
        }
    }

    fn select(&self, selection: &Selection) -> MotionResult<Vec<String>> {
        match selection {
            Selection::Explicit(ids) => Ok(ids.clone()),
            derived => self.strategy.order(self.scene, derived),
        }
    }

    fn check_action(&self, action: &AnimationAction) -> MotionResult<()> {
        action.validate()?;
        let Some(entity) = self.scene.get(&action.target) else {
            return Err(MotionError::unknown_entity(action.target.as_str()));
        };
        if matches!(action.effect, Effect::FlowAlong { .. })
            && entity.role != SemanticRole::Connector
        {
            return Err(MotionError::validation(format!(
                "flow_along target '{}' is a {:?}, not a connector",
                action.target, entity.role
            )));
        }
        Ok(())
    }
}

fn non_negative(what: &str, v: Seconds) -> MotionResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(MotionError::validation(format!(
            "{what} must be a non-negative number of seconds, got {v}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compiler.rs"]
mod tests;
