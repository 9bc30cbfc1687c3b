//! Serializing documents into trees.
//!
//! [`DomSerializer`] renders nodes through the templates of a schema. When
//! serializing a run of siblings it shares mark wrappers between adjacent
//! nodes, so `<em>a<strong>b</strong>c</em>` comes out as one `em` rather
//! than three.

use crate::dom::{Dom, DomId, HtmlOptions, TreeBackend};
use crate::error::{Error, Result};
use crate::model::{Fragment, Mark, Node};
use crate::render::{Rendered, SuspiciousGuard, TemplateTable, render_spec_guarded};
use crate::schema::Schema;

/// What to do when a mark's template fails while serializing a fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkErrorPolicy {
    /// Drop the wrapper for that mark on that node and keep going.
    #[default]
    Lenient,
    /// Abort on template-authoring errors; drop the wrapper otherwise.
    Strict,
}

/// Options for a serialization call.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    pub mark_errors: MarkErrorPolicy,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_errors(mut self, policy: MarkErrorPolicy) -> Self {
        self.mark_errors = policy;
        self
    }

    /// Shorthand for `mark_errors(MarkErrorPolicy::Strict)`.
    pub fn strict_marks(self) -> Self {
        self.mark_errors(MarkErrorPolicy::Strict)
    }
}

/// Renders nodes and fragments into any [`TreeBackend`].
///
/// Build one per schema and reuse it; it is `Send + Sync` and keeps a cache
/// of attribute scans shared by all calls.
#[derive(Debug)]
pub struct DomSerializer {
    templates: TemplateTable,
    guard: SuspiciousGuard,
}

impl DomSerializer {
    pub fn new(templates: TemplateTable) -> Self {
        Self {
            templates,
            guard: SuspiciousGuard::new(),
        }
    }

    /// A serializer using the templates declared in `schema`.
    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(TemplateTable::from_schema(schema))
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    pub fn has_node_template(&self, name: &str) -> bool {
        self.templates.has_node(name)
    }

    pub fn has_mark_template(&self, name: &str) -> bool {
        self.templates.has_mark(name)
    }

    /// Serialize a sibling sequence into `target`, or into a new fragment
    /// container when `target` is `None`. Returns the container.
    ///
    /// Adjacent nodes whose leading marks are equal share the wrapper
    /// elements of those marks. Marks without a template are ignored.
    pub fn serialize_fragment<B: TreeBackend>(
        &self,
        fragment: &Fragment,
        backend: &mut B,
        target: Option<B::Handle>,
        options: &SerializeOptions,
    ) -> Result<B::Handle> {
        let target = target.unwrap_or_else(|| backend.create_fragment());
        let mut top = target;
        // Open wrappers, outermost first, with the element each was appended to.
        let mut active: Vec<(&Mark, B::Handle)> = Vec::new();

        for node in fragment {
            let marks = node.marks();
            let (mut keep, mut next) = (0, 0);
            while keep < active.len() && next < marks.len() {
                let mark = &marks[next];
                if !self.templates.has_mark(mark.type_name()) {
                    next += 1;
                    continue;
                }
                let (open, _) = active[keep];
                if mark != open || !open.is_spanning() {
                    break;
                }
                keep += 1;
                next += 1;
            }

            while active.len() > keep {
                if let Some((_, parent)) = active.pop() {
                    top = parent;
                }
            }

            for mark in &marks[next..] {
                match self.render_mark(mark, node, backend) {
                    Ok(Some(wrapper)) => {
                        backend.append_child(top, wrapper.dom);
                        active.push((mark, top));
                        top = wrapper.hole.unwrap_or(wrapper.dom);
                    }
                    Ok(None) => {}
                    Err(err) => recover_mark_error(err, mark, node, options)?,
                }
            }

            let inner = self.render_node_inner(node, backend, options)?;
            backend.append_child(top, inner);
        }

        Ok(target)
    }

    /// Serialize one node, wrapped in its own marks.
    pub fn serialize_node<B: TreeBackend>(
        &self,
        node: &Node,
        backend: &mut B,
        options: &SerializeOptions,
    ) -> Result<B::Handle> {
        let mut dom = self.render_node_inner(node, backend, options)?;
        for mark in node.marks().iter().rev() {
            if let Some(wrapper) = self.render_mark(mark, node, backend)? {
                backend.append_child(wrapper.hole.unwrap_or(wrapper.dom), dom);
                dom = wrapper.dom;
            }
        }
        Ok(dom)
    }

    /// Render `node` through its template and fill the content hole, if
    /// any, with its children. Marks are left to the caller.
    fn render_node_inner<B: TreeBackend>(
        &self,
        node: &Node,
        backend: &mut B,
        options: &SerializeOptions,
    ) -> Result<B::Handle> {
        let template = self
            .templates
            .node(node.type_name())
            .ok_or_else(|| Error::MissingTemplate(node.type_name().to_string()))?;
        let spec = template.render(node);
        let Rendered { dom, hole } = render_spec_guarded(backend, &spec, &self.guard, &[node.attrs()])?;

        if let Some(hole) = hole {
            if node.is_leaf() {
                return Err(Error::LeafContentHole(node.type_name().to_string()));
            }
            self.serialize_fragment(node.content(), backend, Some(hole), options)?;
        }
        Ok(dom)
    }

    /// Render the wrapper of `mark` on `node`, or `None` when the mark type
    /// has no template.
    fn render_mark<B: TreeBackend>(
        &self,
        mark: &Mark,
        node: &Node,
        backend: &mut B,
    ) -> Result<Option<Rendered<B::Handle>>> {
        let Some(template) = self.templates.mark(mark.type_name()) else {
            return Ok(None);
        };
        let spec = template.render(mark, node.is_inline());
        render_spec_guarded(backend, &spec, &self.guard, &[mark.attrs(), node.attrs()]).map(Some)
    }

    /// Serialize a fragment into a new [`Dom`], returning the container.
    pub fn fragment_to_dom(&self, fragment: &Fragment, options: &SerializeOptions) -> Result<(Dom, DomId)> {
        let mut dom = Dom::new();
        let root = self.serialize_fragment(fragment, &mut dom, None, options)?;
        Ok((dom, root))
    }

    /// Serialize a node into a new [`Dom`].
    pub fn node_to_dom(&self, node: &Node, options: &SerializeOptions) -> Result<(Dom, DomId)> {
        let mut dom = Dom::new();
        let root = self.serialize_node(node, &mut dom, options)?;
        Ok((dom, root))
    }

    pub fn fragment_to_html(
        &self,
        fragment: &Fragment,
        options: &SerializeOptions,
        html: &HtmlOptions,
    ) -> Result<String> {
        let (dom, root) = self.fragment_to_dom(fragment, options)?;
        Ok(dom.inner_html(root, html))
    }

    pub fn node_to_html(&self, node: &Node, options: &SerializeOptions, html: &HtmlOptions) -> Result<String> {
        let (dom, root) = self.node_to_dom(node, options)?;
        Ok(dom.to_html(root, html))
    }
}

fn recover_mark_error(err: Error, mark: &Mark, node: &Node, options: &SerializeOptions) -> Result<()> {
    if options.mark_errors == MarkErrorPolicy::Strict && err.is_template_error() {
        tracing::warn!(
            mark = mark.type_name(),
            node = node.type_name(),
            error = %err,
            "mark template failed"
        );
        return Err(err);
    }
    tracing::debug!(
        mark = mark.type_name(),
        node = node.type_name(),
        error = %err,
        "dropping wrapper of unrenderable mark"
    );
    Ok(())
}
