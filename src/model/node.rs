//! Document nodes and fragments.

use std::fmt;
use std::sync::Arc;

use crate::schema::NodeType;

use super::attrs::Attrs;
use super::mark::Mark;

/// An immutable document node.
#[derive(Clone)]
pub struct Node {
    node_type: Arc<NodeType>,
    attrs: Attrs,
    content: Fragment,
    marks: Vec<Mark>,
    text: Option<String>,
}

impl Node {
    /// Create a node. Marks are normalized into a mark set.
    pub fn new(node_type: Arc<NodeType>, attrs: Attrs, content: Fragment, marks: Vec<Mark>) -> Self {
        Self {
            node_type,
            attrs,
            content,
            marks: Mark::set_from(marks),
            text: None,
        }
    }

    pub(crate) fn new_text(node_type: Arc<NodeType>, text: String, marks: Vec<Mark>) -> Self {
        Self {
            node_type,
            attrs: Attrs::empty(),
            content: Fragment::empty(),
            marks: Mark::set_from(marks),
            text: Some(text),
        }
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    pub fn type_name(&self) -> &str {
        self.node_type.name()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn content(&self) -> &Fragment {
        &self.content
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Text of a text node.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type.is_leaf()
    }

    pub fn is_inline(&self) -> bool {
        self.node_type.is_inline()
    }

    pub fn is_block(&self) -> bool {
        self.node_type.is_block()
    }

    pub fn child_count(&self) -> usize {
        self.content.len()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.child(index)
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.content.text_content(),
        }
    }

    /// Copy of this node with a different mark set.
    pub fn with_marks(&self, marks: Vec<Mark>) -> Node {
        Node {
            marks: Mark::set_from(marks),
            ..self.clone()
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut base = match &self.text {
            Some(text) => format!("{text:?}"),
            None if self.content.is_empty() => self.type_name().to_string(),
            None => format!("{}({:?})", self.type_name(), self.content),
        };
        for mark in self.marks.iter().rev() {
            base = format!("{mark:?}({base})");
        }
        f.write_str(&base)
    }
}

/// An ordered sequence of sibling nodes.
#[derive(Clone, Default)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Node> for Fragment {
    fn from(node: Node) -> Self {
        Self { nodes: vec![node] }
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.nodes.iter().map(|n| format!("{n:?}")).collect();
        write!(f, "<{}>", parts.join(", "))
    }
}
