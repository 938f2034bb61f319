//! Arena-backed document tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`], so the
//! parent back-reference needs no shared ownership. A [`NodeHandle`] borrows
//! the tree and implements [`DocumentNode`].

use super::{DocumentNode, NodeKind};

/// Index of a node inside a [`DocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Character data, only for `NodeKind::Text`.
    text: String,
    attrs: Vec<(String, String)>,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            text: String::new(),
            attrs: Vec::new(),
        }
    }
}

/// Owned document tree with a single `Container` root.
///
/// # Example
///
/// ```rust
/// use rs_opengraph::tree::{DocTree, NodeKind};
///
/// let mut tree = DocTree::new();
/// let root = tree.root();
/// let para = tree.append(root, NodeKind::Container);
/// tree.append_text(para, "Hello world.");
///
/// assert_eq!(rs_opengraph::tree::DocumentNode::text(&tree.handle(root)), "Hello world.");
/// ```
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<NodeData>,
}

impl DocTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Container, None)],
        }
    }

    /// The document root.
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child of `kind` under `parent` and return its id.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a text leaf under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.append(parent, NodeKind::Text);
        self.nodes[id.0].text = text.to_string();
        id
    }

    /// Append an image leaf under `parent`.
    pub fn append_image(&mut self, parent: NodeId, uri: &str, alt: Option<&str>) -> NodeId {
        let id = self.append(parent, NodeKind::Image);
        self.set_attr(id, "uri", uri);
        if let Some(alt) = alt {
            self.set_attr(id, "alt", alt);
        }
        id
    }

    /// Set (or replace) an attribute on a node.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[id.0].attrs;
        if let Some(slot) = attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Borrow a node as a [`DocumentNode`] handle.
    #[inline]
    #[must_use]
    pub fn handle(&self, id: NodeId) -> NodeHandle<'_> {
        NodeHandle { tree: self, id }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn collect_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.kind == NodeKind::Text {
                out.push_str(&node.text);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to one node of a [`DocTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeHandle<'a> {
    tree: &'a DocTree,
    id: NodeId,
}

impl NodeHandle<'_> {
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl DocumentNode for NodeHandle<'_> {
    fn kind(&self) -> NodeKind {
        self.tree.nodes[self.id.0].kind
    }

    fn children(&self) -> Vec<Self> {
        self.tree.nodes[self.id.0]
            .children
            .iter()
            .map(|&id| Self { tree: self.tree, id })
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.tree.nodes[self.id.0]
            .parent
            .map(|id| Self { tree: self.tree, id })
    }

    fn text(&self) -> String {
        self.tree.collect_text(self.id)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.tree.nodes[self.id.0]
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}
