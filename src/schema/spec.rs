//! Node and mark type specifications.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Attrs, Mark, Node};
use crate::render::{OutputSpec, RenderMark, RenderNode};

/// Declaration of one attribute. An attribute without a default must be
/// supplied whenever a node or mark of the type is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrSpec {
    pub default: Option<Value>,
}

impl AttrSpec {
    pub fn required() -> Self {
        Self { default: None }
    }

    pub fn with_default(value: impl Into<Value>) -> Self {
        Self {
            default: Some(value.into()),
        }
    }
}

/// Specification of a node type.
#[derive(Clone, Default)]
pub struct NodeSpec {
    /// Content expression. `None` (or empty) makes the type a leaf.
    pub content: Option<String>,
    pub group: Option<String>,
    pub inline: bool,
    pub attrs: Vec<(String, AttrSpec)>,
    pub to_dom: Option<Arc<dyn RenderNode>>,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, expr: impl Into<String>) -> Self {
        self.content = Some(expr.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, spec: AttrSpec) -> Self {
        self.attrs.push((name.into(), spec));
        self
    }

    /// Register the template that renders nodes of this type.
    pub fn to_dom<F>(mut self, template: F) -> Self
    where
        F: for<'a> Fn(&'a Node) -> OutputSpec<'a> + Send + Sync + 'static,
    {
        self.to_dom = Some(Arc::new(template));
        self
    }

    /// Register a template object implementing [`RenderNode`].
    pub fn to_dom_with(mut self, template: Arc<dyn RenderNode>) -> Self {
        self.to_dom = Some(template);
        self
    }
}

impl fmt::Debug for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSpec")
            .field("content", &self.content)
            .field("group", &self.group)
            .field("inline", &self.inline)
            .field("attrs", &self.attrs)
            .field("to_dom", &self.to_dom.is_some())
            .finish()
    }
}

/// Specification of a mark type.
#[derive(Clone)]
pub struct MarkSpec {
    pub attrs: Vec<(String, AttrSpec)>,
    /// Whether adjacent nodes with an equal mark of this type may share
    /// one wrapper element.
    pub spanning: bool,
    pub to_dom: Option<Arc<dyn RenderMark>>,
}

impl Default for MarkSpec {
    fn default() -> Self {
        Self {
            attrs: Vec::new(),
            spanning: true,
            to_dom: None,
        }
    }
}

impl MarkSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, spec: AttrSpec) -> Self {
        self.attrs.push((name.into(), spec));
        self
    }

    pub fn spanning(mut self, spanning: bool) -> Self {
        self.spanning = spanning;
        self
    }

    /// Register the template that renders marks of this type. The flag
    /// tells whether the marked content is inline.
    pub fn to_dom<F>(mut self, template: F) -> Self
    where
        F: for<'a> Fn(&'a Mark, bool) -> OutputSpec<'a> + Send + Sync + 'static,
    {
        self.to_dom = Some(Arc::new(template));
        self
    }

    /// Register a template object implementing [`RenderMark`].
    pub fn to_dom_with(mut self, template: Arc<dyn RenderMark>) -> Self {
        self.to_dom = Some(template);
        self
    }
}

impl fmt::Debug for MarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkSpec")
            .field("attrs", &self.attrs)
            .field("spanning", &self.spanning)
            .field("to_dom", &self.to_dom.is_some())
            .finish()
    }
}

/// Resolve the attributes of a new node or mark: declared attributes take
/// the given value or their default, undeclared ones are dropped.
pub(crate) fn compute_attrs(
    type_name: &str,
    specs: &[(String, AttrSpec)],
    given: Option<&Map<String, Value>>,
) -> Result<Attrs> {
    let mut built = Map::new();
    for (name, spec) in specs {
        let value = match given.and_then(|g| g.get(name)) {
            Some(value) => value.clone(),
            None => spec.default.clone().ok_or_else(|| Error::MissingAttribute {
                type_name: type_name.to_string(),
                attr: name.clone(),
            })?,
        };
        built.insert(name.clone(), value);
    }
    Ok(Attrs::new(built))
}
