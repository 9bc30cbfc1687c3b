//! End-to-end rendering of documents in the basic schema.

use serde_json::json;

use prosedom::schema::basic;
use prosedom::{DomSerializer, HtmlOptions, Node, SerializeOptions};

fn render(doc: serde_json::Value, html: &HtmlOptions) -> String {
    let schema = basic::schema();
    let doc = Node::from_json(&schema, &doc).expect("valid document");
    DomSerializer::from_schema(&schema)
        .fragment_to_html(doc.content(), &SerializeOptions::default(), html)
        .expect("renders")
}

fn paragraph(content: serde_json::Value) -> serde_json::Value {
    json!({"type": "doc", "content": [{"type": "paragraph", "content": content}]})
}

#[test]
fn test_blocks() {
    let doc = json!({"type": "doc", "content": [
        {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Title"}]},
        {"type": "blockquote", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "quoted"}]}
        ]},
        {"type": "horizontal_rule"},
        {"type": "code_block", "content": [{"type": "text", "text": "let x = 1 < 2;"}]}
    ]});
    assert_eq!(
        render(doc, &HtmlOptions::default()),
        "<h2>Title</h2><blockquote><p>quoted</p></blockquote><hr>\
         <pre><code>let x = 1 &lt; 2;</code></pre>"
    );
}

#[test]
fn test_heading_level_defaults_to_one() {
    let doc = json!({"type": "doc", "content": [
        {"type": "heading", "content": [{"type": "text", "text": "T"}]}
    ]});
    assert_eq!(render(doc, &HtmlOptions::default()), "<h1>T</h1>");
}

#[test]
fn test_heading_level_cannot_inject_markup() {
    let doc = json!({"type": "doc", "content": [
        {"type": "heading", "attrs": {"level": "1><script>alert(1)</script><h1"},
         "content": [{"type": "text", "text": "t"}]},
        {"type": "heading", "attrs": {"level": 9}, "content": [{"type": "text", "text": "u"}]}
    ]});
    assert_eq!(render(doc, &HtmlOptions::default()), "<h1>t</h1><h1>u</h1>");
}

#[test]
fn test_lists() {
    let item = |text: &str| {
        json!({"type": "list_item", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": text}]}
        ]})
    };
    let doc = json!({"type": "doc", "content": [
        {"type": "bullet_list", "content": [item("a"), item("b")]},
        {"type": "ordered_list", "content": [item("one")]},
        {"type": "ordered_list", "attrs": {"order": 3}, "content": [item("three")]}
    ]});
    assert_eq!(
        render(doc, &HtmlOptions::default()),
        "<ul><li><p>a</p></li><li><p>b</p></li></ul>\
         <ol><li><p>one</p></li></ol>\
         <ol start=\"3\"><li><p>three</p></li></ol>"
    );
}

#[test]
fn test_inline_nodes_and_void_elements() {
    let doc = paragraph(json!([
        {"type": "text", "text": "see "},
        {"type": "image", "attrs": {"src": "cat.png", "alt": "A cat"}},
        {"type": "hard_break"},
        {"type": "text", "text": "done"}
    ]));
    assert_eq!(
        render(doc.clone(), &HtmlOptions::default()),
        r#"<p>see <img src="cat.png" alt="A cat" title=""><br>done</p>"#
    );
    assert_eq!(
        render(doc, &HtmlOptions::xhtml()),
        r#"<p>see <img src="cat.png" alt="A cat" title=""/><br/>done</p>"#
    );
}

#[test]
fn test_links_and_marks() {
    let link = json!({"type": "link", "attrs": {"href": "https://example.com", "title": "Ex"}});
    let doc = paragraph(json!([
        {"type": "text", "text": "go ", "marks": [link.clone()]},
        {"type": "text", "text": "now", "marks": [link, {"type": "strong"}]},
        {"type": "text", "text": "!", "marks": [{"type": "bold"}]},
        {"type": "text", "text": "x", "marks": [{"type": "code"}, {"type": "italic"}]}
    ]));
    assert_eq!(
        render(doc, &HtmlOptions::default()),
        r#"<p><a href="https://example.com" title="Ex">go <strong>now</strong></a><strong>!</strong><em><code>x</code></em></p>"#
    );
}

#[test]
fn test_escaping() {
    let doc = paragraph(json!([
        {"type": "text", "text": "<script>\"&'", "marks": [
            {"type": "link", "attrs": {"href": "a\"b"}}
        ]}
    ]));
    assert_eq!(
        render(doc, &HtmlOptions::default()),
        "<p><a href=\"a&quot;b\" title=\"\">&lt;script&gt;&quot;&amp;&#39;</a></p>"
    );
}

#[test]
fn test_doc_node_has_no_template() {
    let schema = basic::schema();
    let serializer = DomSerializer::from_schema(&schema);
    assert!(!serializer.has_node_template("doc"));
    assert!(serializer.has_node_template("text"));
    assert!(serializer.has_mark_template("italic"));

    let doc = Node::from_json(&schema, &json!({"type": "doc", "content": []})).unwrap();
    let err = serializer.node_to_dom(&doc, &SerializeOptions::default()).unwrap_err();
    assert!(matches!(err, prosedom::Error::MissingTemplate(_)));
}
