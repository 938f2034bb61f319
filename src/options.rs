//! Configuration options for tag generation.
//!
//! The `Options` struct mirrors the settings a documentation project
//! declares once for the whole site. Individual pages override some of them
//! through [`crate::PageFields`].

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::Result;

/// Description budget used when none (or an unusable one) is configured.
pub const DEFAULT_DESCRIPTION_LENGTH: usize = 200;

/// Site-wide Open Graph options.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_opengraph::Options;
///
/// let options = Options {
///     site_url: Some("https://docs.example.org/en/latest/".to_string()),
///     site_name: Some("Example Docs".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.og_type, "website");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Base URL pages are published under. `og:url` and relative images
    /// resolve against it.
    ///
    /// Default: `None`
    pub site_url: Option<String>,

    /// Maximum length of `og:description`, in chars.
    ///
    /// Numeric strings are accepted; anything else falls back to
    /// [`DEFAULT_DESCRIPTION_LENGTH`].
    ///
    /// Default: `200`
    #[serde(deserialize_with = "deserialize_description_length")]
    pub description_length: usize,

    /// Site-wide `og:image`.
    ///
    /// Default: `None`
    pub image: Option<String>,

    /// Alt text for the site-wide image.
    ///
    /// Default: `None`
    pub image_alt: Option<String>,

    /// Use the first image found on a page as its `og:image`.
    ///
    /// Default: `false`
    pub use_first_image: bool,

    /// `og:type` for every page.
    ///
    /// Default: `"website"`
    #[serde(rename = "type")]
    pub og_type: String,

    /// `og:site_name`, also the fallback image alt text.
    ///
    /// Default: `None`
    pub site_name: Option<String>,

    /// Literal tags appended after the generated ones.
    ///
    /// Default: empty
    pub custom_meta_tags: Vec<String>,

    /// Source directories copied verbatim into the output. Images under
    /// them keep their path instead of being resolved relative to the page.
    ///
    /// Default: empty
    pub static_paths: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            site_url: None,
            description_length: DEFAULT_DESCRIPTION_LENGTH,
            image: None,
            image_alt: None,
            use_first_image: false,
            og_type: "website".to_string(),
            site_name: None,
            custom_meta_tags: Vec::new(),
            static_paths: Vec::new(),
        }
    }
}

impl Options {
    /// Load options from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a description budget, recovering to the default.
///
/// Zero, negative and non-numeric values are configuration mistakes; they
/// are logged and replaced rather than reported.
#[must_use]
pub fn parse_description_length(raw: &str) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(len) if len > 0 => len,
        _ => {
            warn!(value = raw, default = DEFAULT_DESCRIPTION_LENGTH, "invalid description length");
            DEFAULT_DESCRIPTION_LENGTH
        }
    }
}

fn deserialize_description_length<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => parse_description_length(&s),
        serde_json::Value::Number(n) => match n.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(len) if len > 0 => len,
            _ => parse_description_length(&n.to_string()),
        },
        other => parse_description_length(&other.to_string()),
    })
}
