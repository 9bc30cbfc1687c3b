//! Marks: annotations on inline content.

use std::fmt;
use std::sync::Arc;

use crate::schema::MarkType;

use super::attrs::Attrs;

/// A mark of some [`MarkType`] with its attributes.
///
/// Two marks are equal when they have the same type and structurally equal
/// attributes.
#[derive(Clone)]
pub struct Mark {
    mark_type: Arc<MarkType>,
    attrs: Attrs,
}

impl Mark {
    pub fn new(mark_type: Arc<MarkType>, attrs: Attrs) -> Self {
        Self { mark_type, attrs }
    }

    pub fn mark_type(&self) -> &Arc<MarkType> {
        &self.mark_type
    }

    pub fn type_name(&self) -> &str {
        self.mark_type.name()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Whether an equal mark may share a wrapper across sibling boundaries.
    pub fn is_spanning(&self) -> bool {
        self.mark_type.is_spanning()
    }

    /// Add this mark to an ordered mark set, returning the new set.
    ///
    /// The set stays sorted by type rank. A mark of the same type already
    /// in the set is replaced; an equal mark leaves the set unchanged.
    pub fn add_to_set(&self, set: &[Mark]) -> Vec<Mark> {
        let mut out = Vec::with_capacity(set.len() + 1);
        let mut placed = false;
        for other in set {
            if other == self {
                return set.to_vec();
            }
            if other.type_name() == self.type_name() {
                continue;
            }
            if !placed && other.mark_type.rank() > self.mark_type.rank() {
                out.push(self.clone());
                placed = true;
            }
            out.push(other.clone());
        }
        if !placed {
            out.push(self.clone());
        }
        out
    }

    /// Normalize arbitrary marks into a mark set.
    pub fn set_from(marks: impl IntoIterator<Item = Mark>) -> Vec<Mark> {
        marks
            .into_iter()
            .fold(Vec::new(), |set, mark| mark.add_to_set(&set))
    }

    /// Whether this mark is in `set`.
    pub fn is_in_set(&self, set: &[Mark]) -> bool {
        set.iter().any(|m| m == self)
    }
}

impl PartialEq for Mark {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.attrs == other.attrs
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attrs.is_empty() {
            write!(f, "{}", self.type_name())
        } else {
            write!(f, "{}({:?})", self.type_name(), self.attrs)
        }
    }
}
