//! Loading documents from their JSON form.
//!
//! The format is the usual one for schema-based rich-text documents:
//!
//! ```json
//! {"type": "paragraph", "attrs": {}, "content": [
//!     {"type": "text", "text": "hi", "marks": [{"type": "em"}]}
//! ]}
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::Schema;

use super::mark::Mark;
use super::node::Node;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeJson {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    attrs: Option<Map<String, Value>>,
    #[serde(default)]
    content: Vec<NodeJson>,
    #[serde(default)]
    marks: Vec<MarkJson>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarkJson {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    attrs: Option<Map<String, Value>>,
}

impl Node {
    /// Build a node tree from its JSON representation.
    pub fn from_json(schema: &Schema, json: &Value) -> Result<Node> {
        let parsed = NodeJson::deserialize(json)?;
        resolve_node(schema, parsed)
    }

    /// Parse a JSON string into a node tree.
    pub fn from_json_str(schema: &Schema, json: &str) -> Result<Node> {
        let parsed: NodeJson = serde_json::from_str(json)?;
        resolve_node(schema, parsed)
    }
}

/// Read a JSON document from a file.
pub fn read_json_document(schema: &Schema, path: impl AsRef<Path>) -> Result<Node> {
    let text = fs::read_to_string(path)?;
    Node::from_json_str(schema, &text)
}

fn resolve_node(schema: &Schema, json: NodeJson) -> Result<Node> {
    let marks = json
        .marks
        .into_iter()
        .map(|m| schema.mark(&m.type_name, m.attrs.as_ref()))
        .collect::<Result<Vec<Mark>>>()?;

    if json.type_name == "text" {
        if !json.content.is_empty() {
            return Err(Error::InvalidDocument("text nodes cannot have content".to_string()));
        }
        let text = json
            .text
            .ok_or_else(|| Error::InvalidDocument("text node without text".to_string()))?;
        return schema.text(text, marks);
    }

    if json.text.is_some() {
        return Err(Error::InvalidDocument(format!(
            "only text nodes carry text, not {:?}",
            json.type_name
        )));
    }

    let content = json
        .content
        .into_iter()
        .map(|child| resolve_node(schema, child))
        .collect::<Result<Vec<Node>>>()?;
    schema.node(&json.type_name, json.attrs.as_ref(), content, marks)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::schema::basic;

    use super::*;

    #[test]
    fn test_from_json() {
        let schema = basic::schema();
        let doc = Node::from_json(
            &schema,
            &json!({
                "type": "doc",
                "content": [{
                    "type": "heading",
                    "attrs": {"level": 2},
                    "content": [
                        {"type": "text", "text": "Hello "},
                        {"type": "text", "text": "world", "marks": [{"type": "strong"}, {"type": "em"}]}
                    ]
                }]
            }),
        )
        .unwrap();

        let heading = doc.child(0).unwrap();
        assert_eq!(heading.type_name(), "heading");
        assert_eq!(heading.attrs().get("level"), Some(&json!(2)));
        let marked = heading.child(1).unwrap();
        let names: Vec<_> = marked.marks().iter().map(Mark::type_name).collect();
        assert_eq!(names, ["em", "strong"]);
        assert_eq!(doc.text_content(), "Hello world");
    }

    #[test]
    fn test_defaults_filled() {
        let schema = basic::schema();
        let heading = Node::from_json_str(&schema, r#"{"type": "heading"}"#).unwrap();
        assert_eq!(heading.attrs().get("level"), Some(&json!(1)));
    }

    #[test]
    fn test_rejects_bad_documents() {
        let schema = basic::schema();
        assert!(matches!(
            Node::from_json(&schema, &json!({"type": "video"})),
            Err(Error::UnknownNodeType(_))
        ));
        assert!(matches!(
            Node::from_json(&schema, &json!({"type": "text"})),
            Err(Error::InvalidDocument(_))
        ));
        assert!(matches!(
            Node::from_json(&schema, &json!({"type": "paragraph", "text": "x"})),
            Err(Error::InvalidDocument(_))
        ));
        assert!(matches!(
            Node::from_json(&schema, &json!({"type": "text", "text": "x", "marks": [{"type": "blink"}]})),
            Err(Error::UnknownMarkType(_))
        ));
        assert!(matches!(
            Node::from_json(&schema, &json!({"type": "image"})),
            Err(Error::MissingAttribute { .. })
        ));
        assert!(matches!(Node::from_json_str(&schema, "{"), Err(Error::Json(_))));
    }
}
