//! Template values.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::dom::{DomId, Subtree};

/// What a node or mark template returns: a declarative description of the
/// tree to build.
#[derive(Debug, Clone)]
pub enum OutputSpec<'a> {
    /// A text leaf.
    Text(Cow<'a, str>),
    /// A pre-built node used as is.
    Node(Subtree),
    /// A pre-built node with its own content hole inside it.
    Rendered { tree: Subtree, hole: Option<DomId> },
    /// An element built from a tag, optional attributes and children.
    Element(ElementSpec<'a>),
    /// The same micro-language as JSON: a string is a text leaf, an array
    /// is `[tag, {attrs}?, ...children]` where `0` marks the content hole.
    ///
    /// Borrowed values are compared by identity against the attributes of
    /// the node or mark being rendered.
    Json(Cow<'a, Value>),
}

impl<'a> OutputSpec<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        OutputSpec::Text(text.into())
    }

    /// A JSON template borrowed from elsewhere, typically from attributes.
    pub fn json(value: &'a Value) -> Self {
        OutputSpec::Json(Cow::Borrowed(value))
    }

    /// An owned JSON template such as `json!(["p", 0])`.
    pub fn from_json(value: Value) -> Self {
        OutputSpec::Json(Cow::Owned(value))
    }

    pub fn node(tree: Subtree) -> Self {
        OutputSpec::Node(tree)
    }

    pub fn rendered(tree: Subtree, hole: Option<DomId>) -> Self {
        OutputSpec::Rendered { tree, hole }
    }
}

impl<'a> From<ElementSpec<'a>> for OutputSpec<'a> {
    fn from(spec: ElementSpec<'a>) -> Self {
        OutputSpec::Element(spec)
    }
}

impl<'a> From<&'a str> for OutputSpec<'a> {
    fn from(text: &'a str) -> Self {
        OutputSpec::Text(Cow::Borrowed(text))
    }
}

impl From<String> for OutputSpec<'_> {
    fn from(text: String) -> Self {
        OutputSpec::Text(Cow::Owned(text))
    }
}

impl From<Subtree> for OutputSpec<'_> {
    fn from(tree: Subtree) -> Self {
        OutputSpec::Node(tree)
    }
}

/// One child slot of an [`ElementSpec`].
#[derive(Debug, Clone)]
pub enum SpecChild<'a> {
    /// Where the node's content goes. Only legal as the sole child.
    Hole,
    Spec(OutputSpec<'a>),
}

/// A structural template: `tag`, optional attributes, children.
#[derive(Debug, Clone)]
pub struct ElementSpec<'a> {
    pub tag: Cow<'a, str>,
    pub attrs: Option<Vec<(Cow<'a, str>, Value)>>,
    pub children: Vec<SpecChild<'a>>,
}

impl<'a> ElementSpec<'a> {
    pub fn new(tag: impl Into<Cow<'a, str>>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            children: Vec::new(),
        }
    }

    /// Add one attribute. Null values render as the empty string.
    pub fn attr(mut self, key: impl Into<Cow<'a, str>>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Add every entry of a JSON object as an attribute, in order.
    pub fn attrs(mut self, map: Map<String, Value>) -> Self {
        let attrs = self.attrs.get_or_insert_with(Vec::new);
        attrs.extend(map.into_iter().map(|(k, v)| (Cow::Owned(k), v)));
        self
    }

    pub fn child(mut self, child: impl Into<OutputSpec<'a>>) -> Self {
        self.children.push(SpecChild::Spec(child.into()));
        self
    }

    pub fn hole(mut self) -> Self {
        self.children.push(SpecChild::Hole);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder() {
        let spec = ElementSpec::new("a")
            .attr("href", "x")
            .attr("title", Value::Null)
            .hole();
        assert_eq!(spec.tag, "a");
        assert_eq!(spec.attrs.as_ref().map(Vec::len), Some(2));
        assert!(matches!(spec.children.as_slice(), [SpecChild::Hole]));
    }

    #[test]
    fn test_attrs_from_map_keep_order() {
        let map = json!({"src": "a.png", "alt": "A"});
        let spec = ElementSpec::new("img").attrs(map.as_object().cloned().unwrap_or_default());
        let keys: Vec<_> = spec.attrs.unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["src", "alt"]);
    }

    #[test]
    fn test_json_borrowing() {
        let value = json!(["p", 0]);
        match OutputSpec::json(&value) {
            OutputSpec::Json(Cow::Borrowed(v)) => assert!(std::ptr::eq(v, &value)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
