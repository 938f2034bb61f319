//! # rs-opengraph
//!
//! Open Graph social-preview metadata for rendered documentation pages.
//!
//! Given a page's document tree, its title and its location, this library
//! produces the page's `<meta property="og:...">` tags. The interesting part
//! is `og:description`: a single walk over the tree condenses the page into a
//! short, punctuated summary that skips callouts, comments, raw markup and
//! code, and never exceeds its length budget.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_opengraph::tree::HtmlPage;
//! use rs_opengraph::{generate_meta_tags, HostEnvironment, Options, PageContext};
//!
//! let page = HtmlPage::parse(
//!     "<body><h1>Install</h1><p>Download the release and unpack it.</p></body>",
//! );
//! let options = Options {
//!     site_url: Some("https://docs.example.org/".to_string()),
//!     ..Options::default()
//! };
//!
//! let html = generate_meta_tags(
//!     &PageContext::new("install", "Install"),
//!     &page.root(),
//!     &options,
//!     &HostEnvironment::default(),
//! )?;
//! assert!(html.contains(r#"<meta property="og:url" content="https://docs.example.org/install.html" />"#));
//! assert!(html.contains(r#"content="Download the release and unpack it.""#));
//! # Ok::<(), rs_opengraph::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Description Extraction**: tree walk with skip rules, list and title punctuation, safe truncation
//! - **Title Sanitizing**: markup-free titles in two variants for heading detection
//! - **Tag Assembly**: `og:url`, `og:image` resolution, per-page overrides, custom tags
//! - **Any Tree**: works over [`tree::DocTree`], rendered HTML, or a host's own [`tree::DocumentNode`]

mod error;
mod options;

/// Document tree capability and bundled implementations.
pub mod tree;

/// Page description extraction.
pub mod extractor;

/// Title markup stripping.
pub mod title;

/// Open Graph tag assembly and rendering.
pub mod metadata;

/// Build host environment detection.
pub mod host;

/// URL utilities for joining and path resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::extract_description;
pub use host::HostEnvironment;
pub use metadata::{build_tags, OutputLayout, PageContext, PageFields, TagSet};
pub use options::{parse_description_length, Options, DEFAULT_DESCRIPTION_LENGTH};
pub use title::{sanitize_title, SanitizedTitle};

/// Generate the Open Graph `<meta>` tags of one page as HTML.
///
/// Computed tags come first, one per line, followed by
/// [`Options::custom_meta_tags`] verbatim.
pub fn generate_meta_tags<N: tree::DocumentNode>(
    page: &PageContext,
    root: &N,
    options: &Options,
    env: &HostEnvironment,
) -> Result<String> {
    let tags = build_tags(page, root, options, env)?;
    Ok(tags.to_html(&options.custom_meta_tags))
}
