//! Output trees.
//!
//! The serializer builds through the [`TreeBackend`] primitives. [`Dom`] is
//! the bundled arena implementation with HTML printing; [`Subtree`] holds
//! pre-built fragments that templates pass through unchanged.

mod arena;
mod backend;
mod html;
mod subtree;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, DescendantsIter, Dom, DomId, DomNode, NodeData, html_name};
pub use backend::{TreeBackend, graft};
pub use html::{HtmlOptions, escape_xml, is_valid_attr_name, is_valid_tag_name, is_void_element};
pub use subtree::Subtree;
pub use tree_sink::{DomSink, NodeHandle};
