//! Charset sniffing for rendered pages.
//!
//! Documentation builders write UTF-8 almost everywhere, but older themes
//! and hand-edited pages still declare legacy charsets. Pages handed to
//! [`crate::tree::HtmlPage::from_bytes`] are decoded here first.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes of the page head searched for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("META_CHARSET_RE regex")
});

/// Pick the encoding of a rendered page.
///
/// A byte-order mark wins, then the first charset declaration in the head,
/// then UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_WINDOW)]);
    sniff_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn sniff_charset(head: &str) -> Option<&str> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Decode page bytes to a UTF-8 string.
///
/// Undecodable sequences become U+FFFD; a page is never rejected.
///
/// # Examples
///
/// ```
/// use rs_opengraph::encoding::transcode_to_utf8;
///
/// let page = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(page).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // decode() strips a matching BOM itself
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
