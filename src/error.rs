//! Error types for prosedom operations.

use thiserror::Error;

/// Errors that can occur while loading documents or rendering them.
#[derive(Error, Debug)]
pub enum Error {
    /// A template value breaks the rules of the template language
    /// (bad tag or attribute name, misplaced or duplicate content hole).
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// A template passed in an array that was stored in the attributes of
    /// the node or mark being rendered.
    #[error(
        "Using an array from an attribute object as a DOM spec (<{tag}>). \
         This may be an attempted cross site scripting attack."
    )]
    UnsafeTemplate { tag: String },

    /// A leaf node's template produced a content hole.
    #[error("Content hole not allowed in a leaf node spec ({0})")]
    LeafContentHole(String),

    /// No template is registered for a node type that has to be rendered.
    #[error("No DOM template registered for node type {0:?}")]
    MissingTemplate(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Unknown mark type: {0}")]
    UnknownMarkType(String),

    #[error("No value supplied for attribute {attr:?} of {type_name:?}")]
    MissingAttribute { type_name: String, attr: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::MalformedTemplate`].
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedTemplate(msg.into())
    }

    /// Whether this error stems from a badly authored template rather than
    /// from the document or the environment.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedTemplate(_) | Error::UnsafeTemplate { .. } | Error::LeafContentHole(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
