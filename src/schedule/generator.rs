use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use crate::animation::action::Effect;
use crate::animation::ease::Ease;
use crate::foundation::core::{Rgba8, Seconds, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::graph::{Entity, SceneGraph};
use crate::schedule::keyframe::{KeyValue, Keyframe, KeyframeSchedule, Property};
use crate::semantic::resolve::ResolvedConnector;
use crate::timeline::compiler::{Timeline, TimelineEntry};
use crate::timeline::strategy::OrderingStrategy;

/// Animated state of one entity between transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EntityState {
    opacity: f64,
    position: Vec2,
    rotation: f64,
    scale: f64,
    emission: f64,
}

impl EntityState {
    fn of(entity: &Entity) -> Self {
        Self {
            opacity: entity.primitive.style.opacity,
            position: entity.primitive.center().to_vec2(),
            rotation: 0.0,
            scale: 1.0,
            emission: 0.0,
        }
    }
}

/// Collects keyframes keyed by `(entity index, property, time)`; a repeat key replaces the
/// earlier value.
#[derive(Default)]
struct KeySink {
    keys: IndexMap<(usize, Property, u64), Keyframe>,
}

impl KeySink {
    fn push(
        &mut self,
        index: usize,
        id: &str,
        property: Property,
        time: Seconds,
        value: KeyValue,
        easing: Ease,
    ) {
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        let time = time + 0.0;
        self.keys.insert(
            (index, property, time.to_bits()),
            Keyframe {
                entity_id: id.to_owned(),
                time,
                property,
                value,
                easing,
            },
        );
    }

    /// Pre-value at `start` (eased toward the post-value), post-value at `end`.
    #[allow(clippy::too_many_arguments)]
    fn transition(
        &mut self,
        index: usize,
        id: &str,
        property: Property,
        (start, end): (Seconds, Seconds),
        pre: KeyValue,
        post: KeyValue,
        ease: Ease,
    ) {
        self.push(index, id, property, start, pre, ease);
        self.push(index, id, property, end, post, Ease::Linear);
    }

    fn finish(self, min_duration: Seconds) -> KeyframeSchedule {
        let mut keyed: Vec<((usize, Property, u64), Keyframe)> = self.keys.into_iter().collect();
        keyed.sort_by(|(ka, a), (kb, b)| {
            a.time
                .total_cmp(&b.time)
                .then(ka.0.cmp(&kb.0))
                .then(ka.1.cmp(&kb.1))
        });
        let keyframes: Vec<Keyframe> = keyed.into_iter().map(|(_, k)| k).collect();
        let duration = keyframes
            .last()
            .map_or(min_duration, |k| k.time.max(min_duration));
        KeyframeSchedule {
            keyframes,
            duration,
        }
    }
}

/// Expands a [`Timeline`] into per-property keyframes.
#[derive(Debug)]
pub struct ScheduleGenerator<'a> {
    scene: &'a SceneGraph,
    strategy: &'a dyn OrderingStrategy,
}

impl<'a> ScheduleGenerator<'a> {
    /// Generator bound to `scene`; `strategy` ranks nodes reached by flow pulses.
    pub fn new(scene: &'a SceneGraph, strategy: &'a dyn OrderingStrategy) -> Self {
        Self { scene, strategy }
    }

    /// Expand every timeline entry, in timeline order.
    #[tracing::instrument(skip_all, fields(entries = timeline.entries.len()))]
    pub fn generate(&self, timeline: &Timeline) -> MotionResult<KeyframeSchedule> {
        let rank: IndexSet<String> = self.strategy.rank_nodes(self.scene)?.into_iter().collect();
        let mut states: Vec<Option<EntityState>> = vec![None; self.scene.len()];
        let mut sink = KeySink::default();

        for entry in &timeline.entries {
            let target = entry.action.target.as_str();
            let Some((index, entity)) = self.scene.get_indexed(target) else {
                return Err(MotionError::unknown_entity(target));
            };
            let mut state = states[index].unwrap_or_else(|| EntityState::of(entity));
            self.expand(entry, index, entity, &mut state, &mut sink);
            states[index] = Some(state);

            if let (Effect::FlowAlong { color, speed }, Some(rc)) =
                (&entry.action.effect, entity.resolved())
            {
                for (node, distance) in self.downstream(rc, &rank) {
                    let Some((node_index, _)) = self.scene.get_indexed(node) else {
                        continue;
                    };
                    let baseline = states[node_index].map_or(0.0, |s| s.emission);
                    let offset = (distance - 1) as f64 / speed;
                    pulse(
                        &mut sink,
                        (node_index, node),
                        entry.start_time + offset,
                        1.0 / speed,
                        baseline,
                        *color,
                        entry.action.ease,
                    );
                }
            }
        }

        let schedule = sink.finish(timeline.end_time);
        tracing::debug!(
            keyframes = schedule.keyframes.len(),
            duration = schedule.duration,
            "generated keyframe schedule"
        );
        Ok(schedule)
    }

    fn expand(
        &self,
        entry: &TimelineEntry,
        index: usize,
        entity: &Entity,
        state: &mut EntityState,
        sink: &mut KeySink,
    ) {
        let id = entity.id();
        let span = (entry.start_time, entry.end_time());
        let ease = entry.action.ease;
        let scalar = |sink: &mut KeySink, property, pre: f64, post: f64| {
            sink.transition(
                index,
                id,
                property,
                span,
                KeyValue::Scalar(pre),
                KeyValue::Scalar(post),
                ease,
            );
            post
        };

        match &entry.action.effect {
            Effect::FadeIn => {
                let target = fade_in_target(entity.primitive.style.opacity);
                state.opacity = scalar(sink, Property::Opacity, 0.0, target);
            }
            Effect::FadeOut => {
                state.opacity = scalar(sink, Property::Opacity, state.opacity, 0.0);
            }
            Effect::RotateTo { degrees } => {
                state.rotation = scalar(sink, Property::Rotation, state.rotation, *degrees);
            }
            Effect::ScaleTo { scale } => {
                state.scale = scalar(sink, Property::Scale, state.scale, *scale);
            }
            Effect::MoveTo { destination } => {
                let post = destination.to_vec2();
                sink.transition(
                    index,
                    id,
                    Property::Position,
                    span,
                    KeyValue::Vec2(state.position),
                    KeyValue::Vec2(post),
                    ease,
                );
                state.position = post;
            }
            Effect::Highlight { color } => {
                sink.push(
                    index,
                    id,
                    Property::EmissionColor,
                    span.0,
                    KeyValue::Color(*color),
                    Ease::Hold,
                );
                state.emission = scalar(sink, Property::Emission, state.emission, 1.0);
            }
            Effect::FlowAlong { color, .. } => {
                sink.push(
                    index,
                    id,
                    Property::EmissionColor,
                    span.0,
                    KeyValue::Color(*color),
                    Ease::Hold,
                );
                scalar(sink, Property::FlowProgress, 0.0, 1.0);
            }
        }
    }

    /// Nodes reachable from `rc`'s end node over resolved connectors, with their BFS distance
    /// (the end node is at distance 1). Ordered by distance, then strategy rank.
    ///
    /// The flow's start node is never included, even when a cycle leads back to it.
    fn downstream(
        &self,
        rc: &ResolvedConnector,
        rank: &IndexSet<String>,
    ) -> SmallVec<[(&'a str, usize); 8]> {
        let scene: &'a SceneGraph = self.scene;
        let Some((_, first)) = scene.get_indexed(&rc.end_node) else {
            return SmallVec::new();
        };

        let mut seen: IndexSet<&'a str> = IndexSet::new();
        if let Some(source) = scene.get(&rc.start_node) {
            seen.insert(source.id());
        }
        let mut queue: VecDeque<(&'a str, usize)> = VecDeque::new();
        seen.insert(first.id());
        queue.push_back((first.id(), 1));

        let mut out: SmallVec<[(&'a str, usize); 8]> = SmallVec::new();
        while let Some((node, distance)) = queue.pop_front() {
            out.push((node, distance));
            for c in scene.outgoing(node) {
                let Some(next) = scene.resolved_connector(c) else {
                    continue;
                };
                let Some((_, next)) = scene.get_indexed(&next.end_node) else {
                    continue;
                };
                if seen.insert(next.id()) {
                    queue.push_back((next.id(), distance + 1));
                }
            }
        }

        out.sort_by_key(|(node, distance)| {
            (
                *distance,
                rank.get_index_of(*node).unwrap_or(usize::MAX),
                scene.index_of(node).unwrap_or(usize::MAX),
            )
        });
        out
    }
}

/// Opacity a fade-in ends at: the authored opacity, or fully opaque for elements authored as
/// hidden (`opacity="0"`).
fn fade_in_target(authored: f64) -> f64 {
    if authored > 0.0 { authored } else { 1.0 }
}

/// One emission pulse: baseline at `start`, full strength half a period later, back to
/// baseline after a full period.
fn pulse(
    sink: &mut KeySink,
    (index, id): (usize, &str),
    start: Seconds,
    period: Seconds,
    baseline: f64,
    color: Rgba8,
    ease: Ease,
) {
    let peak = start + period / 2.0;
    sink.push(
        index,
        id,
        Property::EmissionColor,
        start,
        KeyValue::Color(color),
        Ease::Hold,
    );
    sink.push(index, id, Property::Emission, start, KeyValue::Scalar(baseline), ease);
    sink.push(index, id, Property::Emission, peak, KeyValue::Scalar(1.0), ease);
    sink.push(
        index,
        id,
        Property::Emission,
        start + period,
        KeyValue::Scalar(baseline),
        Ease::Linear,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/generator.rs"]
mod tests;
