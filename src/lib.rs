//! # prosedom
//!
//! Render schema-based rich-text documents into DOM-like trees through
//! per-type templates.
//!
//! ## Features
//!
//! - Templates written as Rust builders or as JSON (`["p", {"class": "x"}, 0]`)
//! - Adjacent nodes with equal marks share one wrapper element
//! - Template arrays stored in document attributes are refused
//! - Renders into any [`TreeBackend`]; an arena [`Dom`] with HTML output is
//!   included
//!
//! ## Quick Start
//!
//! ```
//! use prosedom::schema::basic;
//! use prosedom::{DomSerializer, HtmlOptions, Node, SerializeOptions};
//!
//! let schema = basic::schema();
//! let doc = Node::from_json_str(&schema, r#"{"type": "doc", "content": [
//!     {"type": "paragraph", "content": [
//!         {"type": "text", "text": "Hello "},
//!         {"type": "text", "text": "world", "marks": [{"type": "em"}]}
//!     ]}
//! ]}"#).unwrap();
//!
//! let serializer = DomSerializer::from_schema(&schema);
//! let html = serializer
//!     .fragment_to_html(doc.content(), &SerializeOptions::default(), &HtmlOptions::default())
//!     .unwrap();
//! assert_eq!(html, "<p>Hello <em>world</em></p>");
//! ```

pub mod dom;
pub mod error;
pub mod model;
pub mod render;
pub mod schema;
pub mod serializer;

pub use dom::{Dom, DomId, HtmlOptions, Subtree, TreeBackend};
pub use error::{Error, Result};
pub use model::{Attrs, Fragment, Mark, Node, read_json_document};
pub use render::{ElementSpec, OutputSpec, Rendered, render_spec};
pub use schema::Schema;
pub use serializer::{DomSerializer, MarkErrorPolicy, SerializeOptions};
