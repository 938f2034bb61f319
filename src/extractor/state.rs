//! Per-page extraction state.
//!
//! `ExtractorState` owns the description under construction and the
//! counters that drive punctuation. One instance serves exactly one walk.

use tracing::trace;

use super::text::{needs_separator, normalize_leaf_text};
use crate::tree::{DocumentNode, NodeKind};

/// What the walker should do with a node after its enter phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the children, then run the exit phase.
    Descend,
    /// Drop the whole subtree. The exit phase does not run.
    Skip,
}

/// Whether the walk may continue after an exit phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The description hit its budget and was truncated.
    Stop,
}

/// Accumulator for one description walk.
pub struct ExtractorState<'t> {
    description: String,
    /// Length of `description` in chars.
    len: usize,
    budget: usize,
    list_depth: usize,
    title_consumed: bool,
    known_titles: &'t [&'t str],
}

impl<'t> ExtractorState<'t> {
    #[must_use]
    pub fn new(budget: usize, known_titles: &'t [&'t str]) -> Self {
        Self {
            description: String::new(),
            len: 0,
            budget,
            list_depth: 0,
            title_consumed: false,
            known_titles,
        }
    }

    /// Enter phase. `is_leaf` is whether the node has no children.
    pub fn enter<N: DocumentNode>(&mut self, node: &N, is_leaf: bool) -> Visit {
        let kind = node.kind();

        match kind {
            NodeKind::Invisible | NodeKind::Admonition | NodeKind::Raw => {
                trace!(?kind, "skipping subtree");
                return Visit::Skip;
            }
            _ => {}
        }
        if node
            .parent()
            .is_some_and(|p| p.kind() == NodeKind::LiteralBlock)
        {
            trace!("skipping literal block content");
            return Visit::Skip;
        }

        match kind {
            NodeKind::List(_) => {
                self.list_depth += 1;
                if self.list_depth > 1 {
                    self.push("-");
                }
            }
            NodeKind::Title if !self.title_consumed => {
                self.title_consumed = true;
                let text = node.text();
                if self.known_titles.contains(&text.as_str()) {
                    trace!(title = %text, "skipping page title");
                    return Visit::Skip;
                }
            }
            _ => {}
        }

        if is_leaf {
            let text = normalize_leaf_text(&node.text());
            if needs_separator(&self.description, &text) {
                self.push(" ");
            }
            self.push(&text);
        }

        Visit::Descend
    }

    /// Exit phase for a node that was entered with [`Visit::Descend`].
    pub fn exit(&mut self, kind: NodeKind) -> Flow {
        match kind {
            NodeKind::Title => self.push(":"),
            NodeKind::ListItem => self.push(","),
            NodeKind::List(_) => {
                if self.description.ends_with(',') {
                    self.description.pop();
                    self.len -= 1;
                }
                self.push(".");
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            _ => {}
        }

        if self.len > self.budget {
            self.truncate();
            return Flow::Stop;
        }
        Flow::Continue
    }

    /// Current list nesting depth.
    #[must_use]
    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn into_description(self) -> String {
        self.description
    }

    fn push(&mut self, s: &str) {
        self.description.push_str(s);
        self.len += s.chars().count();
    }

    /// Cut to exactly `budget` chars, ending in `...` when there is room.
    fn truncate(&mut self) {
        self.cut_at_char(self.budget);
        if self.budget >= 3 {
            self.cut_at_char(self.budget - 3);
            self.push("...");
        }
    }

    fn cut_at_char(&mut self, count: usize) {
        if let Some((idx, _)) = self.description.char_indices().nth(count) {
            self.description.truncate(idx);
            self.len = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DocTree, ListStyle};

    #[test]
    fn test_list_depth_tracks_nesting() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let outer = tree.append(root, NodeKind::List(ListStyle::Bullet));
        let item = tree.append(outer, NodeKind::ListItem);
        let inner = tree.append(item, NodeKind::List(ListStyle::Enumerated));

        let mut state = ExtractorState::new(200, &[]);
        state.enter(&tree.handle(outer), false);
        assert_eq!(state.list_depth(), 1);
        assert_eq!(state.description(), "");

        state.enter(&tree.handle(item), false);
        state.enter(&tree.handle(inner), true);
        assert_eq!(state.list_depth(), 2);
        assert_eq!(state.description(), "-");

        state.exit(NodeKind::List(ListStyle::Enumerated));
        assert_eq!(state.list_depth(), 1);
        state.exit(NodeKind::ListItem);
        state.exit(NodeKind::List(ListStyle::Bullet));
        assert_eq!(state.list_depth(), 0);
        assert_eq!(state.description(), "-..");
    }

    #[test]
    fn test_only_first_title_is_checked() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let first = tree.append(root, NodeKind::Title);
        tree.append_text(first, "Page");
        let second = tree.append(root, NodeKind::Title);
        tree.append_text(second, "Page");

        let known = ["Page"];
        let mut state = ExtractorState::new(200, &known);
        assert_eq!(state.enter(&tree.handle(first), false), Visit::Skip);
        assert_eq!(state.enter(&tree.handle(second), false), Visit::Descend);
    }

    #[test]
    fn test_exit_truncates_and_stops() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let text = tree.append_text(root, "abcdefghij");

        let mut state = ExtractorState::new(5, &[]);
        state.enter(&tree.handle(text), true);
        assert_eq!(state.exit(NodeKind::Text), Flow::Stop);
        assert_eq!(state.description(), "ab...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let text = tree.append_text(root, "ééééééééé");

        let mut state = ExtractorState::new(6, &[]);
        state.enter(&tree.handle(text), true);
        assert_eq!(state.exit(NodeKind::Text), Flow::Stop);
        assert_eq!(state.description(), "ééé...");
    }

    #[test]
    fn test_tiny_budget_has_no_ellipsis() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let text = tree.append_text(root, "abcdef");

        let mut state = ExtractorState::new(2, &[]);
        state.enter(&tree.handle(text), true);
        assert_eq!(state.exit(NodeKind::Text), Flow::Stop);
        assert_eq!(state.into_description(), "ab");
    }

    #[test]
    fn test_exactly_at_budget_continues() {
        let mut tree = DocTree::new();
        let root = tree.root();
        let text = tree.append_text(root, "abcde");

        let mut state = ExtractorState::new(5, &[]);
        state.enter(&tree.handle(text), true);
        assert_eq!(state.exit(NodeKind::Text), Flow::Continue);
        assert_eq!(state.description(), "abcde");
    }
}
