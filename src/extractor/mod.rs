//! Page description extraction.
//!
//! Walks a document tree once, depth-first in document order, and condenses
//! its text into one punctuated line:
//!
//! - comments, admonitions, raw blocks and literal block content are skipped
//! - the first title is dropped when it is the page's own heading
//! - titles end with `:`, list items with `,`, lists with `.`
//! - nested lists open with `-`
//! - the result never exceeds the budget and ends in `...` when cut
//!
//! ```rust
//! use rs_opengraph::extract_description;
//! use rs_opengraph::tree::{DocTree, ListStyle, NodeKind};
//!
//! let mut tree = DocTree::new();
//! let root = tree.root();
//! let list = tree.append(root, NodeKind::List(ListStyle::Bullet));
//! for label in ["Item 1", "Item 2"] {
//!     let item = tree.append(list, NodeKind::ListItem);
//!     let para = tree.append(item, NodeKind::Container);
//!     tree.append_text(para, label);
//! }
//!
//! assert_eq!(extract_description(&tree.handle(root), 200, &[]), "Item 1, Item 2.");
//! ```

pub mod state;
pub mod text;

use tracing::debug;

pub use state::{ExtractorState, Flow, Visit};

use crate::tree::{DocumentNode, NodeKind};

enum Step<N> {
    Enter(N),
    Exit(NodeKind),
}

/// Build the description of the tree rooted at `root`.
///
/// `budget` is the maximum length in chars. `known_titles` holds the page
/// title in its plain forms; a first title matching one of them is skipped.
#[must_use]
pub fn extract_description<N: DocumentNode>(root: &N, budget: usize, known_titles: &[&str]) -> String {
    let mut state = ExtractorState::new(budget, known_titles);
    let mut stack = vec![Step::Enter(root.clone())];
    let mut truncated = false;

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                let children = node.children();
                if state.enter(&node, children.is_empty()) == Visit::Descend {
                    stack.push(Step::Exit(node.kind()));
                    stack.extend(children.into_iter().rev().map(Step::Enter));
                }
            }
            Step::Exit(kind) => {
                if state.exit(kind) == Flow::Stop {
                    truncated = true;
                    break;
                }
            }
        }
    }

    let description = state.into_description();
    debug!(budget, len = description.chars().count(), truncated, "extracted description");
    description
}
