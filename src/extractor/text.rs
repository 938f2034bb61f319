//! Leaf text normalization and joining rules.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("SPACE_RUN regex"));

/// Flatten one leaf's text onto a single line.
///
/// Carriage returns are dropped, newlines become spaces, the ends are
/// trimmed and remaining runs of spaces collapse to one.
#[must_use]
pub fn normalize_leaf_text(raw: &str) -> String {
    let text = raw.replace('\r', "").replace('\n', " ");
    SPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// ASCII whitespace as a docs toolchain sees it (includes vertical tab).
#[inline]
fn is_separator_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Whether a space must go between `description` and the next `text`.
///
/// Words never run together, and punctuation that opens `text` attaches
/// directly to what came before.
#[must_use]
pub fn needs_separator(description: &str, text: &str) -> bool {
    let Some(last) = description.chars().last() else {
        return false;
    };
    let Some(first) = text.chars().next() else {
        return false;
    };
    !is_separator_space(last) && !is_separator_space(first) && !first.is_ascii_punctuation()
}
