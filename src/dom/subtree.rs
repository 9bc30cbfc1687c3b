//! Pre-built detached trees that templates can pass through verbatim.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use super::arena::{Dom, DomId};
use super::tree_sink::DomSink;

/// A node inside its own [`Dom`], not yet part of any output tree.
///
/// The serializer grafts a copy of the subtree into its backend, so one
/// `Subtree` can be reused by a template across many renders.
#[derive(Debug, Clone)]
pub struct Subtree {
    dom: Dom,
    root: DomId,
}

impl Subtree {
    /// Wrap node `root` of `dom`.
    pub fn new(dom: Dom, root: DomId) -> Self {
        Self { dom, root }
    }

    /// Parse an HTML snippet and keep the first node of its body.
    ///
    /// Returns `None` when the snippet has no body content.
    pub fn parse_html(html: &str) -> Option<Self> {
        let dom = parse_document(DomSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom();
        let body = dom.find_by_tag(dom.document(), "body")?;
        let root = dom.children(body).next()?;
        Some(Self { dom, root })
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn root(&self) -> DomId {
        self.root
    }

    /// Find the first element with `tag` inside the subtree, e.g. to mark
    /// it as the content hole of a pass-through result.
    pub fn find_by_tag(&self, tag: &str) -> Option<DomId> {
        self.dom.find_by_tag(self.root, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_html_keeps_first_body_node() {
        let tree = Subtree::parse_html(r#"<figure class="x"><img src="a.png"><figcaption></figcaption></figure><p>ignored</p>"#)
            .expect("snippet has content");
        assert_eq!(tree.dom().element_name(tree.root()).unwrap().as_ref(), "figure");
        assert!(tree.find_by_tag("figcaption").is_some());
        assert!(tree.find_by_tag("p").is_none());
    }

    #[test]
    fn test_parse_empty_snippet() {
        assert!(Subtree::parse_html("").is_none());
    }
}
