//! The tree-building primitives the renderer is written against.

use std::fmt::Debug;

use super::arena::{Dom, DomId, NodeData, html_name};

/// A real or virtual tree the serializer can build into.
///
/// The renderer only ever creates nodes and appends them; it never reads
/// back from the tree, so any implementation of these primitives works.
pub trait TreeBackend {
    /// Reference to a node owned by the backend.
    type Handle: Copy + Eq + Debug;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Handle;

    /// Create a detached text leaf.
    fn create_text(&mut self, text: &str) -> Self::Handle;

    /// Set an attribute on an element created by this backend.
    fn set_attribute(&mut self, element: Self::Handle, key: &str, value: &str);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle);

    /// Create a detached container used when serializing a fragment
    /// without an explicit target.
    fn create_fragment(&mut self) -> Self::Handle;
}

impl TreeBackend for Dom {
    type Handle = DomId;

    fn create_element(&mut self, tag: &str) -> DomId {
        Dom::create_element(self, html_name(tag))
    }

    fn create_text(&mut self, text: &str) -> DomId {
        Dom::create_text(self, text.to_string())
    }

    fn set_attribute(&mut self, element: DomId, key: &str, value: &str) {
        self.set_attr(element, html_name(key), value.to_string());
    }

    fn append_child(&mut self, parent: DomId, child: DomId) {
        self.append(parent, child);
    }

    fn create_fragment(&mut self) -> DomId {
        Dom::create_fragment(self)
    }
}

/// Copy the subtree at `root` of `source` into `backend` by replaying the
/// primitives. Returns the copy of `root` and, if `mark` lies inside the
/// subtree, its copy too. Comments are dropped; a document node at the
/// root becomes a fragment container.
pub fn graft<B: TreeBackend>(
    backend: &mut B,
    source: &Dom,
    root: DomId,
    mark: Option<DomId>,
) -> (B::Handle, Option<B::Handle>) {
    let mut marked = None;
    let copy = graft_node(backend, source, root, mark, &mut marked);
    (copy, marked)
}

fn graft_node<B: TreeBackend>(
    backend: &mut B,
    source: &Dom,
    id: DomId,
    mark: Option<DomId>,
    marked: &mut Option<B::Handle>,
) -> B::Handle {
    let handle = match source.get(id).map(|n| &n.data) {
        Some(NodeData::Element { name, attrs }) => {
            let el = backend.create_element(&name.local);
            for attr in attrs {
                backend.set_attribute(el, &attr.name.local, &attr.value);
            }
            el
        }
        Some(NodeData::Text(text)) => backend.create_text(text),
        Some(NodeData::Document) | Some(NodeData::Comment(_)) | None => backend.create_fragment(),
    };
    if mark == Some(id) {
        *marked = Some(handle);
    }
    for child in source.children(id) {
        if matches!(source.get(child).map(|n| &n.data), Some(NodeData::Comment(_))) {
            continue;
        }
        let copy = graft_node(backend, source, child, mark, marked);
        backend.append_child(handle, copy);
    }
    handle
}
