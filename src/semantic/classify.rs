use crate::scene::primitive::{Primitive, ShapeKind};
use crate::svg::path::PathCommand;

/// Diagram meaning assigned to a primitive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum SemanticRole {
    /// A diagram box/vertex.
    Node,
    /// An edge joining two nodes.
    Connector,
    /// Text or a caption.
    Label,
    /// A structural container.
    Group,
    /// Anything else.
    Decoration,
}

/// Keyword sets used by the id/class rules.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Keywords that mark a node/component.
    pub node_keywords: Vec<String>,
    /// Keywords that mark a connector/link.
    pub connector_keywords: Vec<String>,
    /// Keywords that mark a label/title.
    pub label_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| (*s).to_owned()).collect()
        }
        Self {
            node_keywords: words(&[
                "node",
                "component",
                "box",
                "entity",
                "actor",
                "state",
                "service",
            ]),
            connector_keywords: words(&["connector", "connection", "edge", "link", "arrow"]),
            label_keywords: words(&["label", "title", "caption"]),
        }
    }
}

impl ClassifierConfig {
    fn tagged(&self, p: &Primitive, keywords: &[String]) -> bool {
        if p.kind == ShapeKind::Group {
            // Groups always keep the Group role.
            return false;
        }
        let id = p.id.to_ascii_lowercase();
        let classes: Vec<String> = p.classes.iter().map(|c| c.to_ascii_lowercase()).collect();
        keywords.iter().any(|kw| {
            let kw = kw.to_ascii_lowercase();
            !kw.is_empty() && (id.contains(&kw) || classes.iter().any(|c| c.contains(&kw)))
        })
    }
}

/// One predicate → role rule of the classifier cascade.
pub struct Rule {
    /// Stable rule name, useful in tests and logs.
    pub name: &'static str,
    /// Role assigned when the predicate matches.
    pub role: SemanticRole,
    predicate: fn(&Primitive, &ClassifierConfig) -> bool,
}

impl Rule {
    /// Evaluate this rule's predicate.
    pub fn matches(&self, p: &Primitive, config: &ClassifierConfig) -> bool {
        (self.predicate)(p, config)
    }
}

/// The classifier cascade, evaluated top-down, first match wins.
///
/// Later rules are coarser fallbacks; unmatched primitives become [`SemanticRole::Decoration`].
pub const RULES: &[Rule] = &[
    Rule {
        name: "node-keyword",
        role: SemanticRole::Node,
        predicate: |p, c| c.tagged(p, &c.node_keywords),
    },
    Rule {
        name: "connector-keyword",
        role: SemanticRole::Connector,
        predicate: |p, c| c.tagged(p, &c.connector_keywords),
    },
    Rule {
        name: "label-keyword",
        role: SemanticRole::Label,
        predicate: |p, c| c.tagged(p, &c.label_keywords),
    },
    Rule {
        name: "group-shape",
        role: SemanticRole::Group,
        predicate: |p, _| p.kind == ShapeKind::Group,
    },
    Rule {
        name: "text-shape",
        role: SemanticRole::Label,
        predicate: |p, _| p.kind == ShapeKind::Text,
    },
    Rule {
        name: "closed-shape",
        role: SemanticRole::Node,
        predicate: |p, _| {
            matches!(
                p.kind,
                ShapeKind::Rect | ShapeKind::Circle | ShapeKind::Ellipse
            )
        },
    },
    Rule {
        name: "open-shape",
        role: SemanticRole::Connector,
        predicate: |p, _| matches!(p.kind, ShapeKind::Line | ShapeKind::Polyline),
    },
    Rule {
        name: "straight-path",
        role: SemanticRole::Connector,
        predicate: |p, _| p.kind == ShapeKind::Path && is_straight_polyline(&p.path),
    },
    Rule {
        name: "other-path",
        role: SemanticRole::Node,
        predicate: |p, _| p.kind == ShapeKind::Path,
    },
];

/// Assign exactly one role to `p`. Pure and total.
pub fn classify(p: &Primitive, config: &ClassifierConfig) -> SemanticRole {
    matching_rule(p, config).map_or(SemanticRole::Decoration, |r| r.role)
}

/// The first rule of [`RULES`] that matches `p`.
pub fn matching_rule(p: &Primitive, config: &ClassifierConfig) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.matches(p, config))
}

/// One `MoveTo` followed only by (at least one) `LineTo`.
fn is_straight_polyline(commands: &[PathCommand]) -> bool {
    match commands.split_first() {
        Some((PathCommand::MoveTo(_), rest)) => {
            !rest.is_empty() && rest.iter().all(|c| matches!(c, PathCommand::LineTo(_)))
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/semantic/classify.rs"]
mod tests;
