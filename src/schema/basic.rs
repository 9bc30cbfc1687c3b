//! A basic rich-text schema: paragraphs, headings, quotes, code, images,
//! lists and the common inline marks.

use serde_json::Value;

use crate::model::{Mark, Node};
use crate::render::{ElementSpec, OutputSpec};

use super::{AttrSpec, MarkSpec, NodeSpec, Schema};

fn wrap(tag: &'static str) -> OutputSpec<'static> {
    ElementSpec::new(tag).hole().into()
}

/// `h1` to `h6`; anything but an integer level in that range gives `h1`.
fn heading(node: &Node) -> OutputSpec<'_> {
    let tag = match node.attrs().get("level").and_then(Value::as_u64) {
        Some(2) => "h2",
        Some(3) => "h3",
        Some(4) => "h4",
        Some(5) => "h5",
        Some(6) => "h6",
        _ => "h1",
    };
    wrap(tag)
}

fn image(node: &Node) -> OutputSpec<'_> {
    ElementSpec::new("img")
        .attrs(node.attrs().pick(&["src", "alt", "title"]))
        .into()
}

fn ordered_list(node: &Node) -> OutputSpec<'_> {
    let spec = ElementSpec::new("ol");
    let spec = match node.attrs().get("order") {
        Some(order) if order.as_u64() != Some(1) => spec.attr("start", order.clone()),
        _ => spec,
    };
    spec.hole().into()
}

fn link(mark: &Mark, _inline: bool) -> OutputSpec<'_> {
    ElementSpec::new("a")
        .attrs(mark.attrs().pick(&["href", "title"]))
        .hole()
        .into()
}

/// Node specs in declaration order. The first one is the document node.
pub fn nodes() -> Vec<(&'static str, NodeSpec)> {
    vec![
        ("doc", NodeSpec::new().content("block+")),
        (
            "paragraph",
            NodeSpec::new()
                .content("inline*")
                .group("block")
                .to_dom(|_| wrap("p")),
        ),
        (
            "blockquote",
            NodeSpec::new()
                .content("block+")
                .group("block")
                .to_dom(|_| wrap("blockquote")),
        ),
        (
            "horizontal_rule",
            NodeSpec::new()
                .group("block")
                .to_dom(|_| ElementSpec::new("hr").into()),
        ),
        (
            "heading",
            NodeSpec::new()
                .attr("level", AttrSpec::with_default(1))
                .content("inline*")
                .group("block")
                .to_dom(heading),
        ),
        (
            "code_block",
            NodeSpec::new()
                .content("text*")
                .group("block")
                .to_dom(|_| ElementSpec::new("pre").child(ElementSpec::new("code").hole()).into()),
        ),
        ("text", NodeSpec::new().group("inline")),
        (
            "image",
            NodeSpec::new()
                .inline()
                .attr("src", AttrSpec::required())
                .attr("alt", AttrSpec::with_default(Value::Null))
                .attr("title", AttrSpec::with_default(Value::Null))
                .group("inline")
                .to_dom(image),
        ),
        (
            "hard_break",
            NodeSpec::new()
                .inline()
                .group("inline")
                .to_dom(|_| ElementSpec::new("br").into()),
        ),
        (
            "ordered_list",
            NodeSpec::new()
                .attr("order", AttrSpec::with_default(1))
                .content("list_item+")
                .group("block")
                .to_dom(ordered_list),
        ),
        (
            "bullet_list",
            NodeSpec::new()
                .content("list_item+")
                .group("block")
                .to_dom(|_| wrap("ul")),
        ),
        (
            "list_item",
            NodeSpec::new()
                .content("paragraph block*")
                .to_dom(|_| wrap("li")),
        ),
    ]
}

/// Mark specs in rank order.
pub fn marks() -> Vec<(&'static str, MarkSpec)> {
    vec![
        (
            "link",
            MarkSpec::new()
                .attr("href", AttrSpec::required())
                .attr("title", AttrSpec::with_default(Value::Null))
                .to_dom(link),
        ),
        ("em", MarkSpec::new().to_dom(|_, _| wrap("em"))),
        ("italic", MarkSpec::new().to_dom(|_, _| wrap("em"))),
        ("strong", MarkSpec::new().to_dom(|_, _| wrap("strong"))),
        ("bold", MarkSpec::new().to_dom(|_, _| wrap("strong"))),
        ("code", MarkSpec::new().to_dom(|_, _| wrap("code"))),
    ]
}

/// The basic schema.
pub fn schema() -> Schema {
    match Schema::new(nodes(), marks()) {
        Ok(schema) => schema,
        // The declarations above have a text type and unique names.
        Err(err) => unreachable!("basic schema is valid: {err}"),
    }
}
