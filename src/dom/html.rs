//! HTML printing for [`Dom`] trees.

use std::fmt::Write;

use super::arena::{Dom, DomId, NodeData};

/// Output options for HTML printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Emit void elements XHTML style (`<br/>`) instead of `<br>`.
    pub xhtml: bool,
}

impl HtmlOptions {
    pub fn xhtml() -> Self {
        Self { xhtml: true }
    }
}

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `tag` is an HTML void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_name_char(c: char) -> bool {
    !(c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '='))
}

/// Whether `name` can be printed as an element name: an ASCII letter
/// followed by characters that cannot end the tag.
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(is_name_char)
}

/// Whether `name` can be printed as an attribute name.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

impl Dom {
    /// Serialize the node `id` (including itself) to HTML. Document and
    /// fragment nodes print only their children.
    pub fn to_html(&self, id: DomId, options: &HtmlOptions) -> String {
        let mut out = String::new();
        write_node(self, id, options, &mut out);
        out
    }

    /// Serialize the children of `id` to HTML.
    pub fn inner_html(&self, id: DomId, options: &HtmlOptions) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            write_node(self, child, options, &mut out);
        }
        out
    }
}

fn write_node(dom: &Dom, id: DomId, options: &HtmlOptions, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, options, out);
            }
        }
        NodeData::Text(text) => out.push_str(&escape_xml(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element { name, attrs } => {
            let tag: &str = &name.local;
            if !is_valid_tag_name(tag) {
                // Unprintable element: keep its content only.
                for child in dom.children(id) {
                    write_node(dom, child, options, out);
                }
                return;
            }
            out.push('<');
            out.push_str(tag);
            for attr in attrs.iter().filter(|a| is_valid_attr_name(&a.name.local)) {
                // Writing into a String cannot fail
                let _ = write!(out, " {}=\"{}\"", &*attr.name.local, escape_xml(&attr.value));
            }

            if is_void_element(tag) && node.first_child.is_none() {
                out.push_str(if options.xhtml { "/>" } else { ">" });
                return;
            }

            out.push('>');
            for child in dom.children(id) {
                write_node(dom, child, options, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Escape special XML/HTML characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html_name;

    fn paragraph_with_break() -> (Dom, DomId) {
        let mut dom = Dom::new();
        let p = dom.create_element(html_name("p"));
        dom.set_attr(p, html_name("class"), "a\"b".to_string());
        let text = dom.create_text("x < y".to_string());
        let br = dom.create_element(html_name("br"));
        dom.append(dom.document(), p);
        dom.append(p, text);
        dom.append(p, br);
        (dom, p)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello"), "Hello");
        assert_eq!(escape_xml("<script>"), "&lt;script&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"Say "hi""#), "Say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&#39;s");
    }

    #[test]
    fn test_to_html() {
        let (dom, p) = paragraph_with_break();
        assert_eq!(
            dom.to_html(p, &HtmlOptions::default()),
            r#"<p class="a&quot;b">x &lt; y<br></p>"#
        );
        assert_eq!(
            dom.to_html(p, &HtmlOptions::xhtml()),
            r#"<p class="a&quot;b">x &lt; y<br/></p>"#
        );
    }

    #[test]
    fn test_document_prints_children_only() {
        let (dom, _) = paragraph_with_break();
        let html = dom.to_html(dom.document(), &HtmlOptions::default());
        assert!(html.starts_with("<p "));
        assert_eq!(html, dom.inner_html(dom.document(), &HtmlOptions::default()));
    }

    #[test]
    fn test_name_checks() {
        assert!(is_valid_tag_name("h1"));
        assert!(is_valid_tag_name("my-widget"));
        assert!(!is_valid_tag_name(""));
        assert!(!is_valid_tag_name("1h"));
        assert!(!is_valid_tag_name("a><script"));
        assert!(!is_valid_tag_name("b/"));

        assert!(is_valid_attr_name("data-x"));
        assert!(is_valid_attr_name("xlink:href"));
        for bad in ["", "a b", "x>y", "a=b", "q\"", "q'", "a/b", "tab\u{7}"] {
            assert!(!is_valid_attr_name(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_unprintable_names_are_not_written() {
        let mut dom = Dom::new();
        let outer = dom.create_element(html_name("x><script>"));
        let p = dom.create_element(html_name("p"));
        dom.set_attr(p, html_name("id"), "k".to_string());
        dom.set_attr(p, html_name("on><b"), "v".to_string());
        let text = dom.create_text("t".to_string());
        dom.append(outer, p);
        dom.append(p, text);
        assert_eq!(dom.to_html(outer, &HtmlOptions::default()), r#"<p id="k">t</p>"#);
    }

    #[test]
    fn test_empty_non_void_element_closes() {
        let mut dom = Dom::new();
        let td = dom.create_element(html_name("td"));
        assert_eq!(dom.to_html(td, &HtmlOptions::xhtml()), "<td></td>");
    }
}
