//! Document tree capability.
//!
//! The extractor never owns or builds the page tree. It walks any type that
//! implements [`DocumentNode`], a read-only handle exposing the node's role,
//! its children in document order, its parent, and its flattened text.
//!
//! Two implementations ship with the crate:
//! - [`arena::DocTree`] for hosts that build their own tree (and for tests)
//! - [`html::HtmlPage`] for already-rendered HTML pages

pub mod arena;
pub mod html;

pub use arena::{DocTree, NodeHandle, NodeId};
pub use html::{HtmlNode, HtmlPage};

/// Numbering style of a list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyle {
    /// Unordered (bullet) list.
    Bullet,
    /// Ordered (enumerated) list.
    Enumerated,
}

/// Role of a node in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Character data. Always a leaf.
    Text,
    /// Section heading.
    Title,
    /// Ordered or unordered list.
    List(ListStyle),
    /// Entry of a list.
    ListItem,
    /// Callout box (note, warning, ...).
    Admonition,
    /// Comment or otherwise invisible node.
    Invisible,
    /// Raw pass-through markup.
    Raw,
    /// Literal / code block.
    LiteralBlock,
    /// Image reference. Exposes `uri` and `alt` attributes.
    Image,
    /// Any other structural node (section, paragraph, emphasis, ...).
    Container,
}

/// Read-only handle into a host-owned document tree.
///
/// Handles are cheap to clone; they borrow the tree rather than own it.
pub trait DocumentNode: Clone {
    /// The node's role.
    fn kind(&self) -> NodeKind;

    /// Child handles in document order. Empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// Parent handle, `None` at the root.
    fn parent(&self) -> Option<Self>;

    /// Flattened text content of the subtree rooted at this node.
    fn text(&self) -> String;

    /// Attribute lookup. Image nodes expose `uri` and `alt`.
    fn attr(&self, _name: &str) -> Option<String> {
        None
    }
}

/// First image referenced by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub uri: String,
    pub alt: Option<String>,
}

/// Find the first [`NodeKind::Image`] with a `uri`, in document order.
#[must_use]
pub fn first_image<N: DocumentNode>(root: &N) -> Option<ImageRef> {
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if node.kind() == NodeKind::Image {
            if let Some(uri) = node.attr("uri").filter(|u| !u.is_empty()) {
                return Some(ImageRef {
                    uri,
                    alt: node.attr("alt"),
                });
            }
        }
        stack.extend(node.children().into_iter().rev());
    }

    None
}
