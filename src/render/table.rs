//! Templates and the per-schema template table.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{Mark, Node};
use crate::schema::Schema;

use super::spec::OutputSpec;

/// Renders a node into an [`OutputSpec`].
pub trait RenderNode: Send + Sync {
    fn render<'a>(&self, node: &'a Node) -> OutputSpec<'a>;
}

/// Renders a mark into an [`OutputSpec`]. `inline` tells whether the marked
/// content is inline.
pub trait RenderMark: Send + Sync {
    fn render<'a>(&self, mark: &'a Mark, inline: bool) -> OutputSpec<'a>;
}

impl<F> RenderNode for F
where
    F: for<'a> Fn(&'a Node) -> OutputSpec<'a> + Send + Sync,
{
    fn render<'a>(&self, node: &'a Node) -> OutputSpec<'a> {
        self(node)
    }
}

impl<F> RenderMark for F
where
    F: for<'a> Fn(&'a Mark, bool) -> OutputSpec<'a> + Send + Sync,
{
    fn render<'a>(&self, mark: &'a Mark, inline: bool) -> OutputSpec<'a> {
        self(mark, inline)
    }
}

fn text_template(node: &Node) -> OutputSpec<'_> {
    OutputSpec::Text(Cow::Borrowed(node.text().unwrap_or("")))
}

/// Node and mark templates by type name.
#[derive(Clone, Default)]
pub struct TemplateTable {
    nodes: HashMap<String, Arc<dyn RenderNode>>,
    marks: HashMap<String, Arc<dyn RenderMark>>,
}

impl TemplateTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the templates declared by a schema. A `text` template that
    /// renders the node's text is added unless the schema declares one.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut table = Self::new();
        for node_type in schema.node_types() {
            if let Some(template) = &node_type.spec().to_dom {
                table.nodes.insert(node_type.name().to_string(), Arc::clone(template));
            }
        }
        table
            .nodes
            .entry("text".to_string())
            .or_insert_with(|| Arc::new(text_template) as Arc<dyn RenderNode>);
        for mark_type in schema.mark_types() {
            if let Some(template) = &mark_type.spec().to_dom {
                table.marks.insert(mark_type.name().to_string(), Arc::clone(template));
            }
        }
        table
    }

    pub fn insert_node(&mut self, name: impl Into<String>, template: Arc<dyn RenderNode>) {
        self.nodes.insert(name.into(), template);
    }

    pub fn insert_mark(&mut self, name: impl Into<String>, template: Arc<dyn RenderMark>) {
        self.marks.insert(name.into(), template);
    }

    pub fn node(&self, name: &str) -> Option<&dyn RenderNode> {
        self.nodes.get(name).map(|t| &**t)
    }

    pub fn mark(&self, name: &str) -> Option<&dyn RenderMark> {
        self.marks.get(name).map(|t| &**t)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn has_mark(&self, name: &str) -> bool {
        self.marks.contains_key(name)
    }
}

impl fmt::Debug for TemplateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<_> = self.nodes.keys().collect();
        let mut marks: Vec<_> = self.marks.keys().collect();
        nodes.sort();
        marks.sort();
        f.debug_struct("TemplateTable")
            .field("nodes", &nodes)
            .field("marks", &marks)
            .finish()
    }
}
