//! Title sanitizing.
//!
//! Page titles arrive as rendered HTML fragments (`<em>Fast</em> builds`).
//! A single scan strips the markup and yields two plain variants: all
//! character data, and only the data sitting outside every tag. Both are
//! used as keys when the extractor looks for the page's own heading.

use dom_query::Document;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Plain forms of a page title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedTitle {
    /// All character data, markup removed.
    pub text: String,
    /// Character data at nesting depth zero only.
    pub text_outside_tags: String,
}

impl SanitizedTitle {
    /// Both variants, for [`crate::extract_description`]'s known titles.
    #[must_use]
    pub fn known_titles(&self) -> [&str; 2] {
        [self.text.as_str(), self.text_outside_tags.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    Open,
    Close,
    Same,
}

enum Markup {
    /// `<` that does not start markup; kept as data.
    Literal,
    /// Markup running to the end of input.
    Unterminated,
    /// Markup of `len` bytes.
    Tag { len: usize, depth: Depth },
}

/// Strip markup from a raw title.
///
/// Never fails: unclosed tags and stray `<` degrade to whatever data was
/// seen, and the depth counter never drops below zero.
///
/// ```rust
/// use rs_opengraph::sanitize_title;
///
/// let title = sanitize_title("<b>Hello</b> World");
/// assert_eq!(title.text, "Hello World");
/// assert_eq!(title.text_outside_tags, " World");
/// ```
#[must_use]
pub fn sanitize_title(raw: &str) -> SanitizedTitle {
    let mut title = SanitizedTitle::default();
    let mut depth = 0usize;
    let mut rest = raw;

    while let Some(lt) = rest.find('<') {
        push_data(&mut title, &rest[..lt], depth);
        let markup = &rest[lt..];

        match classify(markup) {
            Markup::Literal => {
                push_data(&mut title, "<", depth);
                rest = &markup[1..];
            }
            Markup::Unterminated => {
                rest = "";
                break;
            }
            Markup::Tag { len, depth: change } => {
                match change {
                    Depth::Open => depth += 1,
                    Depth::Close => depth = depth.saturating_sub(1),
                    Depth::Same => {}
                }
                rest = &markup[len..];
            }
        }
    }
    push_data(&mut title, rest, depth);

    title
}

fn push_data(title: &mut SanitizedTitle, data: &str, depth: usize) {
    if data.is_empty() {
        return;
    }
    let decoded = decode_references(data);
    if depth == 0 {
        title.text_outside_tags.push_str(&decoded);
    }
    title.text.push_str(&decoded);
}

/// Classify markup starting at a `<`.
fn classify(markup: &str) -> Markup {
    let after = &markup[1..];

    if let Some(body) = after.strip_prefix("!--") {
        return match body.find("-->") {
            Some(end) => Markup::Tag {
                len: 4 + end + 3,
                depth: Depth::Same,
            },
            None => Markup::Unterminated,
        };
    }

    match after.chars().next() {
        Some('!' | '?') => match markup.find('>') {
            Some(end) => Markup::Tag {
                len: end + 1,
                depth: Depth::Same,
            },
            None => Markup::Unterminated,
        },
        Some('/') => match markup.find('>') {
            Some(end) => {
                let name = tag_name(&after[1..]);
                let depth = if is_void(name) { Depth::Same } else { Depth::Close };
                Markup::Tag { len: end + 1, depth }
            }
            None => Markup::Unterminated,
        },
        Some(c) if c.is_ascii_alphabetic() => match find_tag_end(markup) {
            Some(end) => {
                let name = tag_name(after);
                let self_closing = markup[..end].ends_with('/');
                let depth = if self_closing || is_void(name) {
                    Depth::Same
                } else {
                    Depth::Open
                };
                Markup::Tag { len: end + 1, depth }
            }
            None => Markup::Unterminated,
        },
        _ => Markup::Literal,
    }
}

/// Byte offset of the `>` closing a start tag, honoring quoted attributes.
fn find_tag_end(markup: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in markup.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(idx),
            (None, _) => {}
        }
    }
    None
}

fn tag_name(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(s.len());
    &s[..end]
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Decode character references in a run of character data.
///
/// The run holds no `<`, so the HTML tokenizer sees it as plain text and
/// applies the full named and numeric reference tables. Unknown or
/// malformed references come back verbatim.
fn decode_references(data: &str) -> String {
    if !data.contains('&') {
        return data.to_string();
    }
    let fragment = Document::from(format!("<body>{data}</body>").as_str());
    fragment.select("body").text().to_string()
}
