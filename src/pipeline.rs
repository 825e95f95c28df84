//! End-to-end compilation: SVG + script → scene graph, timeline and keyframe schedule.

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::graph::SceneGraph;
use crate::schedule::generator::ScheduleGenerator;
use crate::schedule::keyframe::KeyframeSchedule;
use crate::semantic::classify::ClassifierConfig;
use crate::semantic::resolve::ResolverOpts;
use crate::svg::element::SvgElement;
use crate::svg::extract::extract;
use crate::timeline::compiler::{Timeline, TimelineCompiler};
use crate::timeline::script::Script;
use crate::timeline::strategy::DiagramType;

const FINGERPRINT_SEED: u64 = 0x5eed_d1a6_7a11_0001;

/// Every externally tunable parameter of one compilation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    /// Keyword sets for the classifier.
    pub classifier: ClassifierConfig,
    /// Connector matching options.
    pub resolver: ResolverOpts,
    /// Active diagram type (ordering strategy).
    pub diagram: DiagramType,
}

impl PipelineOpts {
    /// Default options with the given diagram type.
    pub fn with_diagram(diagram: DiagramType) -> Self {
        Self {
            diagram,
            ..Self::default()
        }
    }

    /// Decode options from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> MotionResult<Self> {
        serde_json::from_str(s).map_err(|e| MotionError::serde(format!("options: {e}")))
    }
}

/// Output of one compilation, owned by the caller.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Compiled {
    /// Recovered scene structure (with diagnostics).
    pub scene: SceneGraph,
    /// Absolute-time action list.
    pub timeline: Timeline,
    /// Keyframes for the renderer.
    pub schedule: KeyframeSchedule,
}

impl Compiled {
    /// Pretty JSON encoding of the whole result.
    pub fn to_json(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MotionError::serde(e.to_string()))
    }

    /// Stable 64-bit hash of the serialized scene graph and keyframe schedule.
    ///
    /// Two compilations of the same input produce the same fingerprint.
    pub fn fingerprint(&self) -> MotionResult<u64> {
        let bytes = serde_json::to_vec(&(&self.scene, &self.schedule))
            .map_err(|e| MotionError::serde(e.to_string()))?;
        Ok(xxh3_64_with_seed(&bytes, FINGERPRINT_SEED))
    }
}

/// Run every stage on one document and one script.
#[tracing::instrument(skip_all, fields(diagram = ?opts.diagram))]
pub fn compile(svg: &SvgElement, script: &Script, opts: &PipelineOpts) -> MotionResult<Compiled> {
    let scene = SceneGraph::build(extract(svg), &opts.classifier, &opts.resolver)?;
    let strategy = opts.diagram.strategy();
    let timeline = TimelineCompiler::new(&scene, strategy.as_ref()).compile(script)?;
    let schedule = ScheduleGenerator::new(&scene, strategy.as_ref()).generate(&timeline)?;
    tracing::debug!(
        entities = scene.len(),
        diagnostics = scene.diagnostics().len(),
        keyframes = schedule.len(),
        "compiled diagram"
    );
    Ok(Compiled {
        scene,
        timeline,
        schedule,
    })
}

/// [`compile`] from SVG text and a JSON script.
pub fn compile_str(
    svg_xml: &str,
    script_json: &str,
    opts: &PipelineOpts,
) -> MotionResult<Compiled> {
    let svg = SvgElement::parse(svg_xml)?;
    let script = Script::from_json(script_json)?;
    compile(&svg, &script, opts)
}

/// One independent compilation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    /// Document root.
    pub svg: SvgElement,
    /// Animation script.
    pub script: Script,
    /// Options.
    pub opts: PipelineOpts,
}

/// Compile independent jobs on the rayon pool. Results keep input order.
pub fn compile_batch(jobs: &[Job]) -> Vec<MotionResult<Compiled>> {
    jobs.par_iter()
        .map(|job| compile(&job.svg, &job.script, &job.opts))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
