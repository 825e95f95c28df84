use indexmap::IndexMap;

use crate::foundation::diagnostic::Diagnostic;
use crate::foundation::error::{MotionError, MotionResult};
use crate::scene::primitive::{Primitive, ShapeKind};
use crate::semantic::classify::{ClassifierConfig, SemanticRole, classify};
use crate::semantic::resolve::{Connection, ResolvedConnector, ResolverOpts, resolve_connectors};
use crate::svg::extract::Extraction;

/// A primitive together with its semantic role and connector resolution.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Entity {
    /// The extracted geometry.
    pub primitive: Primitive,
    /// Assigned semantic role.
    pub role: SemanticRole,
    /// Endpoint resolution (connectors only).
    pub connection: Connection,
}

impl Entity {
    /// Entity id (same as the primitive id).
    pub fn id(&self) -> &str {
        &self.primitive.id
    }

    /// The resolved connector, if this entity is one.
    pub fn resolved(&self) -> Option<&ResolvedConnector> {
        self.connection.resolved()
    }
}

/// Immutable semantic structure recovered from one SVG document.
///
/// Entities keep document order. Derived indices (node list, adjacency) are computed once at
/// construction and only reference resolved connectors.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneGraph {
    width: f64,
    height: f64,
    entities: IndexMap<String, Entity>,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    nodes: Vec<String>,
    #[serde(skip)]
    outgoing: IndexMap<String, Vec<String>>,
    #[serde(skip)]
    incoming: IndexMap<String, Vec<String>>,
}

impl SceneGraph {
    /// Classify, validate and resolve an extraction into a scene graph.
    ///
    /// Fails only on structural invariant violations (duplicate ids, dangling or non-group
    /// parents), which indicate a defect upstream rather than bad input.
    #[tracing::instrument(skip_all, fields(primitives = extraction.primitives.len()))]
    pub fn build(
        extraction: Extraction,
        classifier: &ClassifierConfig,
        resolver: &ResolverOpts,
    ) -> MotionResult<Self> {
        let Extraction {
            primitives,
            width,
            height,
            mut diagnostics,
        } = extraction;

        let mut seen: IndexMap<&str, ShapeKind> = IndexMap::with_capacity(primitives.len());
        for p in &primitives {
            if let Some(parent) = p.parent.as_deref() {
                match seen.get(parent) {
                    Some(ShapeKind::Group) => {}
                    Some(_) => {
                        return Err(MotionError::invariant(format!(
                            "parent '{parent}' of '{}' is not a group",
                            p.id
                        )));
                    }
                    None => {
                        return Err(MotionError::invariant(format!(
                            "parent '{parent}' of '{}' does not precede it",
                            p.id
                        )));
                    }
                }
            }
            if seen.insert(p.id.as_str(), p.kind).is_some() {
                return Err(MotionError::invariant(format!(
                    "duplicate entity id '{}'",
                    p.id
                )));
            }
        }

        let roles: Vec<SemanticRole> = primitives.iter().map(|p| classify(p, classifier)).collect();
        let pairs: Vec<(&Primitive, SemanticRole)> =
            primitives.iter().zip(roles.iter().copied()).collect();
        let connections = resolve_connectors(&pairs, resolver, &mut diagnostics)?;

        let entities: IndexMap<String, Entity> = primitives
            .into_iter()
            .zip(roles)
            .zip(connections)
            .map(|((primitive, role), connection)| {
                (
                    primitive.id.clone(),
                    Entity {
                        primitive,
                        role,
                        connection,
                    },
                )
            })
            .collect();

        let nodes: Vec<String> = entities
            .values()
            .filter(|e| e.role == SemanticRole::Node)
            .map(|e| e.id().to_owned())
            .collect();

        let mut outgoing: IndexMap<String, Vec<String>> =
            nodes.iter().map(|n| (n.clone(), Vec::new())).collect();
        let mut incoming = outgoing.clone();
        for rc in entities.values().filter_map(Entity::resolved) {
            let (Some(out), true) = (
                outgoing.get_mut(&rc.start_node),
                incoming.contains_key(&rc.end_node),
            ) else {
                return Err(MotionError::invariant(format!(
                    "connector '{}' references a non-node endpoint",
                    rc.id
                )));
            };
            out.push(rc.id.clone());
            if let Some(inc) = incoming.get_mut(&rc.end_node) {
                inc.push(rc.id.clone());
            }
        }

        tracing::debug!(
            entities = entities.len(),
            nodes = nodes.len(),
            resolved = entities.values().filter(|e| e.resolved().is_some()).count(),
            "built scene graph"
        );

        Ok(Self {
            width,
            height,
            entities,
            diagnostics,
            nodes,
            outgoing,
            incoming,
        })
    }

    /// Nominal document width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Nominal document height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when the document produced no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity together with its insertion index.
    pub fn get_indexed(&self, id: &str) -> Option<(usize, &Entity)> {
        self.entities.get_full(id).map(|(i, _, e)| (i, e))
    }

    /// `true` when `id` names an entity.
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Insertion index of an entity.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entities.get_index_of(id)
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Node-role entity ids in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Node-role entity by id.
    pub fn node(&self, id: &str) -> Option<&Entity> {
        self.get(id).filter(|e| e.role == SemanticRole::Node)
    }

    /// Resolved connectors in insertion order.
    pub fn resolved_connectors(&self) -> impl Iterator<Item = &ResolvedConnector> {
        self.entities.values().filter_map(Entity::resolved)
    }

    /// Resolved connector by id.
    pub fn resolved_connector(&self, id: &str) -> Option<&ResolvedConnector> {
        self.get(id).and_then(Entity::resolved)
    }

    /// Ids of resolved connectors leaving `node`, in insertion order.
    pub fn outgoing(&self, node: &str) -> &[String] {
        self.outgoing.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ids of resolved connectors arriving at `node`, in insertion order.
    pub fn incoming(&self, node: &str) -> &[String] {
        self.incoming.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ids of entities with `role`, in insertion order.
    pub fn with_role(&self, role: SemanticRole) -> impl Iterator<Item = &str> {
        self.entities
            .values()
            .filter(move |e| e.role == role)
            .map(Entity::id)
    }

    /// Entities with `role` that have no ancestor of the same role, in insertion order.
    pub fn roots_of(&self, role: SemanticRole) -> Vec<&str> {
        self.with_role(role)
            .filter(|id| {
                let mut parent = self.get(id).and_then(|e| e.primitive.parent.as_deref());
                while let Some(pid) = parent {
                    let Some(p) = self.get(pid) else { break };
                    if p.role == role {
                        return false;
                    }
                    parent = p.primitive.parent.as_deref();
                }
                true
            })
            .collect()
    }

    /// Recoverable problems found while extracting and resolving.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
