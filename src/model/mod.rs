//! Read-only document model: nodes, marks, fragments and their attributes.
//!
//! Nodes are immutable once built. Build them through a
//! [`Schema`](crate::schema::Schema) or load them from JSON.

mod attrs;
mod json;
mod mark;
mod node;

pub use attrs::{Attrs, AttrsId};
pub use json::read_json_document;
pub use mark::Mark;
pub use node::{Fragment, Node};
