use std::collections::VecDeque;

use indexmap::IndexSet;

use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::graph::SceneGraph;
use crate::timeline::script::Selection;

/// Policy that orders entities when a script does not list them explicitly.
pub trait OrderingStrategy: Send + Sync + std::fmt::Debug {
    /// Stable strategy name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Reject configurations that cannot produce an order for `scene`.
    fn validate(&self, _scene: &SceneGraph) -> MotionResult<()> {
        Ok(())
    }

    /// Node ids in the order this strategy ranks them.
    fn rank_nodes(&self, scene: &SceneGraph) -> MotionResult<Vec<String>>;

    /// Entity ids for `selection`, in strategy order.
    fn order(&self, scene: &SceneGraph, selection: &Selection) -> MotionResult<Vec<String>>;
}

/// Diagram type chosen by the caller; selects the ordering strategy.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagramType {
    /// Flow order from the sources of the connector graph.
    Flowchart,
    /// Document order, nodes before edges.
    #[default]
    Network,
    /// Caller-supplied chronological order.
    Sequence {
        /// Entity ids in chronological order. Required.
        #[serde(default)]
        order: Option<Vec<String>>,
    },
}

impl DiagramType {
    /// Build the strategy for this diagram type.
    pub fn strategy(&self) -> Box<dyn OrderingStrategy> {
        match self {
            Self::Flowchart => Box::new(Flowchart),
            Self::Network => Box::new(Network),
            Self::Sequence { order } => Box::new(Sequence {
                order: order.clone(),
            }),
        }
    }
}

/// Nodes in BFS topological order from nodes without incoming resolved connectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flowchart;

impl OrderingStrategy for Flowchart {
    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn rank_nodes(&self, scene: &SceneGraph) -> MotionResult<Vec<String>> {
        Ok(flow_order(scene))
    }

    fn order(&self, scene: &SceneGraph, selection: &Selection) -> MotionResult<Vec<String>> {
        let nodes = flow_order(scene);
        Ok(match selection {
            Selection::Explicit(ids) => ids.clone(),
            Selection::Nodes => nodes,
            Selection::Connectors => connectors_by_start(scene, &nodes),
            Selection::All => {
                let mut out = Vec::with_capacity(scene.len());
                for n in nodes {
                    let outgoing = scene.outgoing(&n).to_vec();
                    out.push(n);
                    out.extend(outgoing);
                }
                out
            }
        })
    }
}

/// Nodes in insertion order, then connectors grouped by their start node.
#[derive(Clone, Copy, Debug, Default)]
pub struct Network;

impl OrderingStrategy for Network {
    fn name(&self) -> &'static str {
        "network"
    }

    fn rank_nodes(&self, scene: &SceneGraph) -> MotionResult<Vec<String>> {
        Ok(scene.nodes().to_vec())
    }

    fn order(&self, scene: &SceneGraph, selection: &Selection) -> MotionResult<Vec<String>> {
        let nodes = scene.nodes().to_vec();
        Ok(match selection {
            Selection::Explicit(ids) => ids.clone(),
            Selection::Nodes => nodes,
            Selection::Connectors => connectors_by_start(scene, &nodes),
            Selection::All => {
                let connectors = connectors_by_start(scene, &nodes);
                nodes.into_iter().chain(connectors).collect()
            }
        })
    }
}

/// Explicit chronological order; nothing is derived.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    /// Entity ids in chronological order.
    pub order: Option<Vec<String>>,
}

impl Sequence {
    /// Strategy with the given chronological order.
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: Some(order.into_iter().map(Into::into).collect()),
        }
    }

    fn list(&self) -> MotionResult<&[String]> {
        self.order
            .as_deref()
            .ok_or_else(|| MotionError::missing_order(self.name()))
    }
}

impl OrderingStrategy for Sequence {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn validate(&self, scene: &SceneGraph) -> MotionResult<()> {
        match self.list()?.iter().find(|id| !scene.contains(id)) {
            Some(id) => Err(MotionError::unknown_entity(id.as_str())),
            None => Ok(()),
        }
    }

    fn rank_nodes(&self, scene: &SceneGraph) -> MotionResult<Vec<String>> {
        Ok(self
            .list()?
            .iter()
            .filter(|id| scene.node(id).is_some())
            .cloned()
            .collect())
    }

    fn order(&self, scene: &SceneGraph, selection: &Selection) -> MotionResult<Vec<String>> {
        if let Selection::Explicit(ids) = selection {
            return Ok(ids.clone());
        }
        self.validate(scene)?;
        let list = self.list()?;
        Ok(match selection {
            Selection::Nodes => self.rank_nodes(scene)?,
            Selection::Connectors => list
                .iter()
                .filter(|id| scene.resolved_connector(id).is_some())
                .cloned()
                .collect(),
            Selection::All | Selection::Explicit(_) => list.to_vec(),
        })
    }
}

/// Kahn's algorithm over resolved connectors, FIFO so equal-depth nodes keep insertion order.
///
/// Nodes held back by cycles are appended in insertion order.
fn flow_order(scene: &SceneGraph) -> Vec<String> {
    let nodes = scene.nodes();
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| scene.incoming(n).len()).collect();
    let index: IndexSet<&str> = nodes.iter().map(String::as_str).collect();

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut queued: Vec<bool> = in_degree.iter().map(|&d| d == 0).collect();
    let mut out = Vec::with_capacity(nodes.len());

    while let Some(i) = queue.pop_front() {
        out.push(nodes[i].clone());
        for c in scene.outgoing(&nodes[i]) {
            let Some(j) = scene
                .resolved_connector(c)
                .and_then(|rc| index.get_index_of(rc.end_node.as_str()))
            else {
                continue;
            };
            in_degree[j] = in_degree[j].saturating_sub(1);
            if in_degree[j] == 0 && !queued[j] {
                queued[j] = true;
                queue.push_back(j);
            }
        }
    }

    if out.len() < nodes.len() {
        tracing::debug!(
            held_back = nodes.len() - out.len(),
            "connector graph has cycles; appending remaining nodes in document order"
        );
        out.extend(
            nodes
                .iter()
                .zip(&queued)
                .filter(|(_, seen)| !**seen)
                .map(|(n, _)| n.clone()),
        );
    }
    out
}

/// Resolved connectors, stably grouped by the rank of their start node in `nodes`.
fn connectors_by_start(scene: &SceneGraph, nodes: &[String]) -> Vec<String> {
    let rank: IndexSet<&str> = nodes.iter().map(String::as_str).collect();
    let mut connectors: Vec<(usize, &str)> = scene
        .resolved_connectors()
        .map(|rc| {
            let r = rank.get_index_of(rc.start_node.as_str());
            (r.unwrap_or(usize::MAX), rc.id.as_str())
        })
        .collect();
    connectors.sort_by_key(|(r, _)| *r);
    connectors.into_iter().map(|(_, id)| id.to_owned()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/strategy.rs"]
mod tests;
