//! html5ever TreeSink implementation for [`Dom`].
//!
//! Used to turn HTML snippets into pre-built subtrees that templates can
//! hand to the renderer verbatim.

use std::borrow::Cow;
use std::cell::{Ref, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Dom, DomId, NodeData};

/// Handle used by TreeSink to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub DomId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(DomId::NONE)
    }
}

/// TreeSink that builds a [`Dom`].
///
/// Uses interior mutability (RefCell) because html5ever's TreeSink trait
/// requires methods to take `&self` but we need to mutate the DOM.
pub struct DomSink {
    dom: RefCell<Dom>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(Dom::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> Dom {
        self.dom.into_inner()
    }
}

impl TreeSink for DomSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = Ref<'a, QualName>
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // Snippets come from template authors; be lenient like browsers
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        // Holds a shared borrow of the arena until the tree builder drops
        // the name; a mutating sink call in that window would panic.
        Ref::map(self.dom.borrow(), |dom| match dom.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => name,
            _ => &EMPTY,
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let mut dom = self.dom.borrow_mut();
        let id = dom.create_element(name);
        for attr in attrs {
            dom.set_attr(id, attr.name, attr.value.to_string());
        }
        NodeHandle(id)
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent.0, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent.0, &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.dom.borrow().parent(element.0);
        match parent {
            Some(parent) => self.append(&NodeHandle(parent), child),
            None => self.append(prev_element, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Snippets never need a doctype
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => dom.insert_before(sibling.0, node.0),
            NodeOrText::AppendText(text) => {
                let text_node = dom.create_text(text.to_string());
                dom.insert_before(sibling.0, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        let missing: Vec<_> = attrs
            .into_iter()
            .filter(|attr| !dom.attrs(target.0).iter().any(|a| a.name == attr.name))
            .collect();
        for attr in missing {
            dom.set_attr(target.0, attr.name, attr.value.to_string());
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children: Vec<_> = self.dom.borrow().children(node.0).collect();
        let mut dom = self.dom.borrow_mut();
        for child in children {
            dom.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    use super::*;

    fn parse_html(html: &str) -> Dom {
        let sink = DomSink::new();
        parse_document(sink, ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        let p = dom.find_by_tag(dom.document(), "p").expect("should find p");
        let text_id = dom.children(p).next().expect("p should have child");
        assert_eq!(dom.text_content(text_id), Some("Hello"));
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<div id="main" class="container header">Content</div>"#);

        let div = dom.find_by_tag(dom.document(), "div").expect("should find div");
        assert_eq!(dom.get_attr(div, "id"), Some("main"));
        assert_eq!(dom.get_attr(div, "class"), Some("container header"));
    }

    #[test]
    fn test_misnested_markup_is_repaired() {
        let dom = parse_html("<p><b>one<i>two</b>three</i></p>");
        let p = dom.find_by_tag(dom.document(), "p").expect("should find p");
        assert_eq!(dom.inner_text(p), "onetwothree");
    }

    #[test]
    fn test_implied_end_tags() {
        let dom = parse_html("<ul><li>a<li>b</ul><table><tr><td>x<td>y</table><dl><dt>k<dd>v</dl>");
        let root = dom.document();
        assert_eq!(dom.find_all_by_tag(root, "li").len(), 2);
        assert_eq!(dom.find_all_by_tag(root, "td").len(), 2);
        let tr = dom.find_by_tag(root, "tr").expect("should find tr");
        assert_eq!(dom.parent(tr).and_then(|p| dom.element_name(p)).map(|n| &**n), Some("tbody"));
        let dd = dom.find_by_tag(root, "dd").expect("should find dd");
        assert_eq!(dom.inner_text(dd), "v");
    }
}
