//! Turning template output into tree nodes.
//!
//! Templates return an [`OutputSpec`]. [`render_spec`] interprets it
//! against any [`TreeBackend`], producing the outer node and, when the
//! template left one, the content hole where the rendered node's children
//! belong.

mod guard;
mod spec;
mod table;

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use crate::dom::{TreeBackend, graft, is_valid_attr_name, is_valid_tag_name};
use crate::error::{Error, Result};
use crate::model::Attrs;

pub use guard::{Suspicious, SuspiciousGuard};
pub use spec::{ElementSpec, OutputSpec, SpecChild};
pub use table::{RenderMark, RenderNode, TemplateTable};

/// A rendered spec: the outer node and the content hole, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered<H> {
    pub dom: H,
    pub hole: Option<H>,
}

impl<H> Rendered<H> {
    fn leaf(dom: H) -> Self {
        Self { dom, hole: None }
    }
}

/// Render a spec without any attribute source to guard against.
pub fn render_spec<B: TreeBackend>(
    backend: &mut B,
    spec: &OutputSpec<'_>,
) -> Result<Rendered<B::Handle>> {
    Renderer {
        backend,
        blocked: &[],
    }
    .render(spec)
}

/// Render a spec, refusing any JSON array found in the attributes of
/// `sources` (see [`SuspiciousGuard`]).
pub fn render_spec_guarded<B: TreeBackend>(
    backend: &mut B,
    spec: &OutputSpec<'_>,
    guard: &SuspiciousGuard,
    sources: &[&Attrs],
) -> Result<Rendered<B::Handle>> {
    let blocked = guard.collect(sources);
    Renderer {
        backend,
        blocked: &blocked,
    }
    .render(spec)
}

struct Renderer<'r, B: TreeBackend> {
    backend: &'r mut B,
    blocked: &'r [Arc<Suspicious>],
}

impl<B: TreeBackend> Renderer<'_, B> {
    fn render(&mut self, spec: &OutputSpec<'_>) -> Result<Rendered<B::Handle>> {
        match spec {
            OutputSpec::Text(text) => Ok(Rendered::leaf(self.backend.create_text(text))),
            OutputSpec::Node(tree) => {
                let (dom, _) = graft(self.backend, tree.dom(), tree.root(), None);
                Ok(Rendered::leaf(dom))
            }
            OutputSpec::Rendered { tree, hole } => {
                if let Some(hole) = *hole {
                    let source = tree.dom();
                    let inside = source.descendants(tree.root()).any(|id| id == hole);
                    if !inside || !source.is_element(hole) {
                        return Err(Error::malformed(format!(
                            "content hole {hole:?} is not an element of the rendered tree"
                        )));
                    }
                }
                let (dom, hole) = graft(self.backend, tree.dom(), tree.root(), *hole);
                Ok(Rendered { dom, hole })
            }
            OutputSpec::Element(element) => self.render_element(element),
            OutputSpec::Json(value) => self.render_json(value),
        }
    }

    fn render_element(&mut self, spec: &ElementSpec<'_>) -> Result<Rendered<B::Handle>> {
        check_tag(&spec.tag)?;
        let dom = self.backend.create_element(&spec.tag);

        if let Some(attrs) = &spec.attrs {
            for (key, value) in attrs {
                self.set_attribute(dom, key, value)?;
            }
        }

        let mut hole = None;
        let count = spec.children.len();
        for child in &spec.children {
            match child {
                SpecChild::Hole if count == 1 => return Ok(Rendered { dom, hole: Some(dom) }),
                SpecChild::Hole => return Err(misplaced_hole()),
                SpecChild::Spec(child) => {
                    let rendered = self.render(child)?;
                    self.adopt(dom, rendered, &mut hole)?;
                }
            }
        }
        Ok(Rendered { dom, hole })
    }

    fn render_json(&mut self, value: &Value) -> Result<Rendered<B::Handle>> {
        let items = match value {
            Value::String(text) => return Ok(Rendered::leaf(self.backend.create_text(text))),
            Value::Array(items) => items,
            other => {
                return Err(Error::malformed(format!(
                    "expected a string or an array, got {other}"
                )));
            }
        };

        let tag = match items.first() {
            Some(Value::String(tag)) => tag,
            _ => return Err(Error::malformed("the first element of a spec array must be a tag name")),
        };
        check_tag(tag)?;
        if self.blocked.iter().any(|s| s.contains(value)) {
            tracing::debug!(tag = %tag, "refusing template array taken from attributes");
            return Err(Error::UnsafeTemplate { tag: tag.clone() });
        }

        let dom = self.backend.create_element(tag);
        let mut start = 1;
        if let Some(Value::Object(attrs)) = items.get(1) {
            start = 2;
            for (key, value) in attrs {
                self.set_attribute(dom, key, value)?;
            }
        }

        let mut hole = None;
        let children = &items[start..];
        for child in children {
            match child {
                Value::Number(n) if n.as_u64() == Some(0) => {
                    if children.len() != 1 {
                        return Err(misplaced_hole());
                    }
                    return Ok(Rendered { dom, hole: Some(dom) });
                }
                Value::String(_) | Value::Array(_) => {
                    let rendered = self.render_json(child)?;
                    self.adopt(dom, rendered, &mut hole)?;
                }
                other => {
                    return Err(Error::malformed(format!("unexpected child {other} in <{tag}>")));
                }
            }
        }
        Ok(Rendered { dom, hole })
    }

    fn set_attribute(&mut self, dom: B::Handle, key: &str, value: &Value) -> Result<()> {
        if key.is_empty() {
            return Ok(());
        }
        if !is_valid_attr_name(key) {
            return Err(Error::malformed(format!("invalid attribute name {key:?}")));
        }
        self.backend.set_attribute(dom, key, &attr_value(value));
        Ok(())
    }

    /// Append a rendered child, taking over its hole.
    fn adopt(
        &mut self,
        parent: B::Handle,
        child: Rendered<B::Handle>,
        hole: &mut Option<B::Handle>,
    ) -> Result<()> {
        if let Some(inner) = child.hole {
            if hole.is_some() {
                return Err(Error::malformed("multiple content holes"));
            }
            *hole = Some(inner);
        }
        self.backend.append_child(parent, child.dom);
        Ok(())
    }
}

fn check_tag(tag: &str) -> Result<()> {
    if !is_valid_tag_name(tag) {
        return Err(Error::malformed(format!("invalid tag name {tag:?}")));
    }
    Ok(())
}

fn misplaced_hole() -> Error {
    Error::malformed("content hole must be the only child of its parent node")
}

fn attr_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
