use crate::foundation::error::{MotionError, MotionResult};

/// Owned SVG element tree with attributes in document order.
///
/// This is the boundary type between XML tokenizing and primitive extraction. It can be built
/// programmatically (see [`SvgElement::new`] / [`SvgElement::attr`]) or from XML text with
/// [`SvgElement::parse`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgElement {
    /// Local tag name without namespace prefix (`rect`, `g`, ...).
    pub name: String,
    /// Attributes by local name, in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements, in document order.
    pub children: Vec<SvgElement>,
    /// Concatenated direct text content (used by `<text>`).
    pub text: Option<String>,
}

impl SvgElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder-style child append.
    pub fn child(mut self, child: SvgElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text content setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute by local name. The last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parse XML text and return the document's root element.
    pub fn parse(xml: &str) -> MotionResult<Self> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| MotionError::svg(e.to_string()))?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_owned(), a.value().to_owned()))
            .collect();

        let mut children = Vec::new();
        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        let text = text.trim();
        Self {
            name: node.tag_name().name().to_owned(),
            attributes,
            children,
            text: (!text.is_empty()).then(|| text.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/element.rs"]
mod tests;
