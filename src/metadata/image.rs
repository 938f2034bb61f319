//! `og:image` selection and URL resolution.

use tracing::{debug, warn};

use super::PageFields;
use crate::error::Result;
use crate::tree::{self, DocumentNode};
use crate::url_utils;
use crate::Options;

/// Per-page field naming the image.
pub const IMAGE_FIELD: &str = "og:image";
/// Per-page field naming the image's alt text.
pub const IMAGE_ALT_FIELD: &str = "og:image:alt";
/// Per-page field overriding [`Options::use_first_image`].
pub const USE_FIRST_IMAGE_FIELD: &str = "ogp_use_first_image";

/// Image chosen for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageChoice {
    pub url: String,
    /// Explicit alt text; `None` lets the caller fall back.
    pub alt: Option<String>,
}

/// Where an image path is relative to.
#[derive(Debug, Clone, Copy)]
pub enum ImageOrigin<'a> {
    /// A source path of document `docname`, published under `site_url`.
    Source {
        site_url: Option<&'a str>,
        docname: &'a str,
        static_paths: &'a [String],
    },
    /// A path relative to the rendered page at `page_url`.
    Page { page_url: &'a str },
}

/// Resolve an image path to the URL put in `og:image`.
///
/// Empty values and values with a scheme come back unchanged. A page URL
/// without a scheme (no site URL configured) keeps the result relative.
pub fn resolve_image_url(path: &str, origin: ImageOrigin<'_>) -> Result<String> {
    if path.is_empty() || url_utils::has_scheme(path) {
        return Ok(path.to_string());
    }

    match origin {
        ImageOrigin::Source {
            site_url,
            docname,
            static_paths,
        } => {
            let published = if url_utils::is_under_static_path(path, static_paths) {
                path.to_string()
            } else if url_utils::is_absolute_path(path) {
                // Absolute source paths start at the documentation root
                path.trim_start_matches(['/', std::path::MAIN_SEPARATOR]).to_string()
            } else {
                url_utils::document_relative(docname, path)
            };
            url_utils::join_url(site_url, &published)
        }
        ImageOrigin::Page { page_url } if url_utils::has_scheme(page_url) => {
            url_utils::join_url(Some(page_url), path)
        }
        ImageOrigin::Page { page_url } => Ok(if url_utils::is_absolute_path(path) {
            path.to_string()
        } else {
            url_utils::document_relative(page_url, path)
        }),
    }
}

/// [`resolve_image_url`], keeping the value as written when it cannot be
/// joined. Image values come from page content and never fail the page.
fn resolve_or_verbatim(path: &str, origin: ImageOrigin<'_>) -> String {
    resolve_image_url(path, origin).unwrap_or_else(|err| {
        warn!(path, error = %err, "unresolvable image URL, keeping it as written");
        path.to_string()
    })
}

/// Pick the page image.
///
/// In order: the page's `og:image` field, the first image in the tree when
/// enabled, the site-wide image. Consumed fields are removed from `fields`
/// so they are not emitted twice.
pub fn select_image<N: DocumentNode>(
    fields: &mut PageFields,
    root: &N,
    options: &Options,
    site_url: Option<&str>,
    page_url: &str,
    docname: &str,
) -> Option<ImageChoice> {
    let source = ImageOrigin::Source {
        site_url,
        docname,
        static_paths: &options.static_paths,
    };

    let choice = if let Some(path) = fields.remove(IMAGE_FIELD) {
        ImageChoice {
            url: resolve_or_verbatim(&path, source),
            alt: fields.remove(IMAGE_ALT_FIELD),
        }
    } else if let Some(first) = use_first_image(fields, options)
        .then(|| tree::first_image(root))
        .flatten()
    {
        let field_alt = fields.remove(IMAGE_ALT_FIELD);
        ImageChoice {
            url: resolve_or_verbatim(&first.uri, ImageOrigin::Page { page_url }),
            alt: first.alt.or(field_alt),
        }
    } else {
        ImageChoice {
            url: options
                .image
                .as_deref()
                .map(|path| resolve_or_verbatim(path, source))
                .unwrap_or_default(),
            alt: options.image_alt.clone(),
        }
    };

    if choice.url.is_empty() {
        return None;
    }
    debug!(url = %choice.url, "selected page image");
    Some(choice)
}

fn use_first_image(fields: &PageFields, options: &Options) -> bool {
    fields
        .get(USE_FIRST_IMAGE_FIELD)
        .map_or(options.use_first_image, parse_flag)
}

/// Field-list flags are text; only explicit negatives (or nothing) are false.
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DocTree;

    const SITE: Option<&str> = Some("http://example.org/en/latest/");
    const PAGE: &str = "http://example.org/en/latest/guide/setup.html";

    fn source<'a>(docname: &'a str, statics: &'a [String]) -> ImageOrigin<'a> {
        ImageOrigin::Source {
            site_url: SITE,
            docname,
            static_paths: statics,
        }
    }

    fn select(fields: &mut PageFields, tree: &DocTree, options: &Options) -> Option<ImageChoice> {
        select_image(fields, &tree.handle(tree.root()), options, SITE, PAGE, "guide/setup")
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let page = ImageOrigin::Page { page_url: PAGE };
        let url = resolve_image_url("https://cdn.example.com/a.png", page).unwrap();
        assert_eq!(url, "https://cdn.example.com/a.png");
        assert_eq!(resolve_image_url("", page).unwrap(), "");
    }

    #[test]
    fn test_resolve_keeps_unparseable_urls_with_scheme() {
        let url = resolve_image_url("https://[bad]/a.png", source("guide/setup", &[])).unwrap();
        assert_eq!(url, "https://[bad]/a.png");
    }

    #[test]
    fn test_resolve_document_relative() {
        let url = resolve_image_url("img/shot.png", source("guide/setup", &[])).unwrap();
        assert_eq!(url, "http://example.org/en/latest/guide/img/shot.png");
    }

    #[test]
    fn test_resolve_static_path_untouched() {
        let statics = vec!["_static".to_string()];
        let url = resolve_image_url("_static/logo.png", source("guide/setup", &statics)).unwrap();
        assert_eq!(url, "http://example.org/en/latest/_static/logo.png");
    }

    #[test]
    fn test_resolve_source_root_absolute() {
        let url = resolve_image_url("/images/logo.png", source("guide/setup", &[])).unwrap();
        assert_eq!(url, "http://example.org/en/latest/images/logo.png");
    }

    #[test]
    fn test_resolve_page_relative() {
        let url = resolve_image_url("../_images/a.png", ImageOrigin::Page { page_url: PAGE }).unwrap();
        assert_eq!(url, "http://example.org/en/latest/_images/a.png");
    }

    #[test]
    fn test_resolve_against_relative_page_url() {
        let page = ImageOrigin::Page {
            page_url: "guide/setup.html",
        };
        assert_eq!(resolve_image_url("_images/a.png", page).unwrap(), "guide/_images/a.png");
        assert_eq!(resolve_image_url("../a.png", page).unwrap(), "a.png");
        assert_eq!(resolve_image_url("/a.png", page).unwrap(), "/a.png");
    }

    #[test]
    fn test_unjoinable_page_image_kept_as_written() {
        let mut tree = DocTree::new();
        let root = tree.root();
        tree.append_image(root, "//[bad]/a.png", None);
        let options = Options {
            use_first_image: true,
            ..Options::default()
        };

        let choice = select(&mut PageFields::new(), &tree, &options).unwrap();
        assert_eq!(choice.url, "//[bad]/a.png");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("True"));
        assert!(parse_flag("yes"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_field_image_consumes_fields() {
        let tree = DocTree::new();
        let mut fields: PageFields = [
            ("og:image", "cover.png"),
            ("og:image:alt", "Cover"),
            ("og:locale", "en_US"),
        ]
        .into_iter()
        .collect();

        let choice = select(&mut fields, &tree, &Options::default()).unwrap();

        assert_eq!(choice.url, "http://example.org/en/latest/guide/cover.png");
        assert_eq!(choice.alt.as_deref(), Some("Cover"));
        assert!(fields.get("og:image").is_none());
        assert!(fields.get("og:image:alt").is_none());
        assert_eq!(fields.get("og:locale"), Some("en_US"));
    }

    #[test]
    fn test_first_image_disabled_by_field() {
        let mut tree = DocTree::new();
        let root = tree.root();
        tree.append_image(root, "inline.png", Some("Inline"));
        let options = Options {
            use_first_image: true,
            image: Some("default.png".to_string()),
            ..Options::default()
        };
        let mut fields: PageFields = [("ogp_use_first_image", "false")].into_iter().collect();

        let choice = select(&mut fields, &tree, &options).unwrap();
        assert_eq!(choice.url, "http://example.org/en/latest/guide/default.png");
        assert_eq!(choice.alt, None);
    }

    #[test]
    fn test_no_image_configured() {
        let tree = DocTree::new();
        assert!(select(&mut PageFields::new(), &tree, &Options::default()).is_none());
    }
}
