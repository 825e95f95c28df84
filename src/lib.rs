//! diagram-motion compiles an SVG diagram plus a declarative animation script into a
//! render-agnostic keyframe schedule.
//!
//! The pipeline runs strictly forward:
//!
//! - [`svg::extract::extract`] flattens the SVG into typed primitives
//! - [`SceneGraph::build`] classifies them, resolves connector endpoints and builds indices
//! - [`TimelineCompiler`] turns a [`Script`] into absolute-time actions
//! - [`ScheduleGenerator`] expands those actions into per-property keyframes
//!
//! [`compile`] runs all of it; [`compile_batch`] runs independent jobs in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves and animation actions.
pub mod animation;
/// Shared geometry, colour, error and diagnostic types.
pub mod foundation;
/// End-to-end entry points.
pub mod pipeline;
/// Extracted primitives and the scene graph.
pub mod scene;
/// Keyframes and the schedule generator.
pub mod schedule;
/// Classification and connector resolution.
pub mod semantic;
/// SVG parsing and primitive extraction.
pub mod svg;
/// Scripts, ordering strategies and the timeline compiler.
pub mod timeline;

pub use crate::animation::action::{ActionTemplate, AnimationAction, Effect};
pub use crate::animation::ease::Ease;
pub use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Seconds, Vec2};
pub use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind};
pub use crate::foundation::error::{MotionError, MotionResult};
pub use crate::pipeline::{Compiled, Job, PipelineOpts, compile, compile_batch, compile_str};
pub use crate::scene::graph::{Entity, SceneGraph};
pub use crate::scene::primitive::{Extent, PaintStyle, Primitive, ShapeKind};
pub use crate::schedule::generator::ScheduleGenerator;
pub use crate::schedule::keyframe::{KeyValue, Keyframe, KeyframeSchedule, Property};
pub use crate::semantic::classify::{ClassifierConfig, SemanticRole};
pub use crate::semantic::resolve::{Connection, MatchAnchor, ResolvedConnector, ResolverOpts};
pub use crate::svg::element::SvgElement;
pub use crate::timeline::compiler::{Timeline, TimelineCompiler, TimelineEntry};
pub use crate::timeline::script::{Cue, Script, Selection, Step, cascade, sequential};
pub use crate::timeline::strategy::{DiagramType, Flowchart, Network, OrderingStrategy, Sequence};
