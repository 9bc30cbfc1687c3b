//! Schemas: the node and mark types a document may use, each optionally
//! carrying a DOM template.
//!
//! Content expressions are kept as declared but not interpreted; the only
//! thing derived from them is whether a type is a leaf.
//!
//! # Example
//!
//! ```
//! use prosedom::render::{ElementSpec, OutputSpec};
//! use prosedom::schema::{MarkSpec, NodeSpec, Schema};
//!
//! let schema = Schema::new(
//!     [
//!         ("doc", NodeSpec::new().content("paragraph+")),
//!         ("paragraph", NodeSpec::new().content("text*").to_dom(|_| ElementSpec::new("p").hole().into())),
//!         ("text", NodeSpec::new().group("inline")),
//!     ],
//!     [("em", MarkSpec::new().to_dom(|_, _| OutputSpec::from(ElementSpec::new("em").hole())))],
//! )
//! .unwrap();
//!
//! assert!(schema.node_type("text").unwrap().is_leaf());
//! assert_eq!(schema.mark_type("em").unwrap().rank(), 0);
//! ```

pub mod basic;
mod spec;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Fragment, Mark, Node};

pub use spec::{AttrSpec, MarkSpec, NodeSpec};
pub(crate) use spec::compute_attrs;

/// A node type of a schema.
pub struct NodeType {
    name: String,
    spec: NodeSpec,
}

impl NodeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    pub fn is_text(&self) -> bool {
        self.name == "text"
    }

    /// True when the type declares no content.
    pub fn is_leaf(&self) -> bool {
        self.spec.content.as_deref().is_none_or(|c| c.trim().is_empty())
    }

    pub fn is_inline(&self) -> bool {
        self.spec.inline || self.is_text()
    }

    pub fn is_block(&self) -> bool {
        !self.is_inline()
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.name)
    }
}

/// A mark type of a schema. Its rank is its declaration index and decides
/// the order of marks in a mark set.
pub struct MarkType {
    name: String,
    rank: usize,
    spec: MarkSpec,
}

impl MarkType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn spec(&self) -> &MarkSpec {
        &self.spec
    }

    pub fn is_spanning(&self) -> bool {
        self.spec.spanning
    }
}

impl fmt::Debug for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkType({})", self.name)
    }
}

/// An immutable set of node and mark types, in declaration order.
#[derive(Debug)]
pub struct Schema {
    nodes: Vec<Arc<NodeType>>,
    marks: Vec<Arc<MarkType>>,
    node_index: HashMap<String, usize>,
    mark_index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema. A `text` node type is required; duplicate names are
    /// rejected.
    pub fn new<N, M, S, T>(nodes: N, marks: M) -> Result<Self>
    where
        N: IntoIterator<Item = (S, NodeSpec)>,
        M: IntoIterator<Item = (T, MarkSpec)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut schema = Schema {
            nodes: Vec::new(),
            marks: Vec::new(),
            node_index: HashMap::new(),
            mark_index: HashMap::new(),
        };

        for (name, spec) in nodes {
            let name = name.into();
            if schema.node_index.contains_key(&name) {
                return Err(Error::InvalidSchema(format!("duplicate node type {name:?}")));
            }
            schema.node_index.insert(name.clone(), schema.nodes.len());
            schema.nodes.push(Arc::new(NodeType { name, spec }));
        }

        for (rank, (name, spec)) in marks.into_iter().enumerate() {
            let name = name.into();
            if schema.mark_index.contains_key(&name) {
                return Err(Error::InvalidSchema(format!("duplicate mark type {name:?}")));
            }
            schema.mark_index.insert(name.clone(), rank);
            schema.marks.push(Arc::new(MarkType { name, rank, spec }));
        }

        match schema.node_type("text") {
            None => Err(Error::InvalidSchema("every schema needs a 'text' type".to_string())),
            Some(text) if !text.spec.attrs.is_empty() => Err(Error::InvalidSchema(
                "the text node type should not have attributes".to_string(),
            )),
            Some(_) => Ok(schema),
        }
    }

    pub fn node_type(&self, name: &str) -> Option<&Arc<NodeType>> {
        self.node_index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn mark_type(&self, name: &str) -> Option<&Arc<MarkType>> {
        self.mark_index.get(name).map(|&i| &self.marks[i])
    }

    pub fn node_types(&self) -> impl Iterator<Item = &Arc<NodeType>> {
        self.nodes.iter()
    }

    pub fn mark_types(&self) -> impl Iterator<Item = &Arc<MarkType>> {
        self.marks.iter()
    }

    /// The first declared node type, conventionally the document node.
    pub fn top_node_type(&self) -> Option<&Arc<NodeType>> {
        self.nodes.first()
    }

    /// Create a non-text node. `attrs` may be omitted when every declared
    /// attribute has a default.
    pub fn node(
        &self,
        type_name: &str,
        attrs: Option<&Map<String, Value>>,
        content: Vec<Node>,
        marks: Vec<Mark>,
    ) -> Result<Node> {
        let node_type = self
            .node_type(type_name)
            .ok_or_else(|| Error::UnknownNodeType(type_name.to_string()))?;
        if node_type.is_text() {
            return Err(Error::InvalidDocument(
                "text nodes are created with Schema::text".to_string(),
            ));
        }
        let attrs = compute_attrs(type_name, &node_type.spec.attrs, attrs)?;
        let content = Fragment::from(content);
        if node_type.is_leaf() && !content.is_empty() {
            return Err(Error::InvalidDocument(format!(
                "leaf node type {type_name:?} cannot have content"
            )));
        }
        Ok(Node::new(Arc::clone(node_type), attrs, content, marks))
    }

    /// Create a text node. Empty text is not allowed.
    pub fn text(&self, text: impl Into<String>, marks: Vec<Mark>) -> Result<Node> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::InvalidDocument("empty text nodes are not allowed".to_string()));
        }
        let node_type = self
            .node_type("text")
            .ok_or_else(|| Error::UnknownNodeType("text".to_string()))?;
        Ok(Node::new_text(Arc::clone(node_type), text, marks))
    }

    /// Create a mark.
    pub fn mark(&self, type_name: &str, attrs: Option<&Map<String, Value>>) -> Result<Mark> {
        let mark_type = self
            .mark_type(type_name)
            .ok_or_else(|| Error::UnknownMarkType(type_name.to_string()))?;
        let attrs = compute_attrs(type_name, &mark_type.spec.attrs, attrs)?;
        Ok(Mark::new(Arc::clone(mark_type), attrs))
    }
}
