//! URL Utility Functions
//!
//! Joining page and image paths onto the site URL, and the path arithmetic
//! needed to place document-relative images.

use url::Url;

use crate::error::{Error, Result};

/// Whether `s` starts with a URL scheme (`https:`, `data:`, ...).
///
/// Purely syntactic: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`.
/// Such values are already absolute and are emitted unchanged, even when
/// the rest of the URL would not parse.
#[must_use]
pub fn has_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Parse a configured base URL.
pub fn parse_base(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|source| Error::InvalidUrl {
        url: base.to_string(),
        source,
    })
}

/// Resolve `path` against `base`.
///
/// Without a base (or with an empty one) the path is returned as-is, which
/// leaves `og:url` relative rather than failing the page.
///
/// # Examples
///
/// ```
/// use rs_opengraph::url_utils::join_url;
///
/// let url = join_url(Some("http://example.org/en/latest/"), "guide/index.html")?;
/// assert_eq!(url, "http://example.org/en/latest/guide/index.html");
/// assert_eq!(join_url(None, "index.html")?, "index.html");
/// # Ok::<(), rs_opengraph::Error>(())
/// ```
pub fn join_url(base: Option<&str>, path: &str) -> Result<String> {
    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return Ok(path.to_string());
    };

    let base = parse_base(base)?;
    base.join(path)
        .map(String::from)
        .map_err(|source| Error::InvalidUrl {
            url: path.to_string(),
            source,
        })
}

/// Scheme, host and path of `url`; query and fragment removed.
pub fn canonical_root(url: &str) -> Result<String> {
    let mut parsed = parse_base(url)?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.into())
}

/// Whether `path` is absolute on the build's filesystem.
#[must_use]
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/') || path.starts_with(std::path::MAIN_SEPARATOR)
}

/// Whether `path` lies inside one of the copied-verbatim directories.
#[must_use]
pub fn is_under_static_path(path: &str, static_paths: &[String]) -> bool {
    static_paths.iter().any(|dir| {
        let dir = dir.trim_end_matches('/');
        !dir.is_empty() && path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Resolve a path relative to the directory of document `docname`.
///
/// `.` and `..` segments are folded; `..` past the top is kept, as
/// POSIX `normpath` does for relative paths.
///
/// ```
/// use rs_opengraph::url_utils::document_relative;
///
/// assert_eq!(document_relative("guide/setup", "img/shot.png"), "guide/img/shot.png");
/// assert_eq!(document_relative("guide/setup", "../logo.png"), "logo.png");
/// ```
#[must_use]
pub fn document_relative(docname: &str, path: &str) -> String {
    let parent = docname.rsplit_once('/').map_or("", |(dir, _)| dir);
    let mut segments: Vec<&str> = Vec::new();

    for segment in parent.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}
