//! Arena-based output tree.
//!
//! Rendered documents land in a `Dom`: every node lives in one contiguous
//! vector and parent/child/sibling links are indices into it. Element names
//! are html5ever `QualName`s in the HTML namespace.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomId(pub u32);

impl DomId {
    /// Sentinel value for no node.
    pub const NONE: DomId = DomId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root, or a detached fragment container.
    Document,
    /// Element with name and attributes (in insertion order).
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    /// Comment. Only produced when parsing HTML snippets.
    Comment(String),
}

/// Element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub data: NodeData,
    pub parent: DomId,
    pub first_child: DomId,
    pub last_child: DomId,
    pub prev_sibling: DomId,
    pub next_sibling: DomId,
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: DomId::NONE,
            first_child: DomId::NONE,
            last_child: DomId::NONE,
            prev_sibling: DomId::NONE,
            next_sibling: DomId::NONE,
        }
    }
}

/// Build an HTML-namespace qualified name.
pub fn html_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

/// Arena-allocated DOM tree.
///
/// Index 0 is always the document node. Nodes are never freed; detaching
/// a node only unlinks it.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<DomNode>,
    document: DomId,
}

impl Dom {
    /// Create a new empty tree with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: DomId::NONE,
        };
        dom.document = dom.alloc(DomNode::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: DomNode) -> DomId {
        let id = DomId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> DomId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: DomId) -> Option<&DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: DomId) -> Option<&mut DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a detached element node without attributes.
    pub fn create_element(&mut self, name: QualName) -> DomId {
        self.alloc(DomNode::new(NodeData::Element {
            name,
            attrs: Vec::new(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: String) -> DomId {
        self.alloc(DomNode::new(NodeData::Text(text)))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: String) -> DomId {
        self.alloc(DomNode::new(NodeData::Comment(text)))
    }

    /// Create a detached fragment container.
    pub fn create_fragment(&mut self) -> DomId {
        self.alloc(DomNode::new(NodeData::Document))
    }

    /// Set an attribute on an element. An existing attribute of the same
    /// name keeps its position and gets the new value. No-op on non-elements.
    pub fn set_attr(&mut self, id: DomId, name: QualName, value: String) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, .. } = &mut node.data
        {
            if let Some(existing) = attrs.iter_mut().find(|a| a.name == name) {
                existing.value = value;
            } else {
                attrs.push(Attribute { name, value });
            }
        }
    }

    /// Append a child to a parent node. A child that is still attached
    /// elsewhere is detached first.
    pub fn append(&mut self, parent: DomId, child: DomId) {
        if self.get(child).is_some_and(|n| n.parent.is_some()) {
            self.detach(child);
        }

        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = DomId::NONE;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: DomId, new_node: DomId) {
        if self.get(new_node).is_some_and(|n| n.parent.is_some()) {
            self.detach(new_node);
        }

        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to the last child if it is a text node, or create one.
    pub fn append_text(&mut self, parent: DomId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings.
    pub fn detach(&mut self, id: DomId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = DomId::NONE;
            node.prev_sibling = DomId::NONE;
            node.next_sibling = DomId::NONE;
        }
    }

    /// Get the number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but its document node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: DomId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(DomId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, id: DomId) -> Option<DomId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_some())
    }

    /// Iterate over `root` and its descendants in document order.
    pub fn descendants(&self, root: DomId) -> DescendantsIter<'_> {
        DescendantsIter {
            dom: self,
            stack: if self.get(root).is_some() {
                vec![root]
            } else {
                Vec::new()
            },
        }
    }

    /// Find the first element with the given tag under `root` (inclusive).
    pub fn find_by_tag(&self, root: DomId, tag: &str) -> Option<DomId> {
        self.descendants(root)
            .find(|&id| self.element_name(id).is_some_and(|n| n.as_ref() == tag))
    }

    /// All elements with the given tag under `root` (inclusive), in
    /// document order.
    pub fn find_all_by_tag(&self, root: DomId, tag: &str) -> Vec<DomId> {
        self.descendants(root)
            .filter(|&id| self.element_name(id).is_some_and(|n| n.as_ref() == tag))
            .collect()
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a Dom,
    current: DomId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = DomId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(DomId::NONE);
        Some(id)
    }
}

/// Depth-first, pre-order iterator.
pub struct DescendantsIter<'a> {
    dom: &'a Dom,
    stack: Vec<DomId>,
}

impl Iterator for DescendantsIter<'_> {
    type Item = DomId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        let mut children: Vec<DomId> = self.dom.children(current).collect();
        children.reverse();
        self.stack.extend(children);
        Some(current)
    }
}

/// Convenience accessors.
impl Dom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: DomId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: DomId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.as_str())
    }

    /// All attributes of an element, empty for other nodes.
    pub fn attrs(&self, id: DomId) -> &[Attribute] {
        static EMPTY: &[Attribute] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: DomId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: DomId) -> bool {
        self.get(id).is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: DomId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn inner_text(&self, id: DomId) -> String {
        self.descendants(id)
            .filter_map(|d| self.text_content(d))
            .collect()
    }
}
