//! Open Graph tag assembly.
//!
//! This module turns one rendered page (its tree, title and location) plus
//! the site [`Options`] into the page's Open Graph tags:
//! 1. `og:title` from the sanitized title
//! 2. `og:type`, `og:url`, `og:site_name`
//! 3. `og:description` from the description extractor
//! 4. `og:image` / `og:image:alt`
//! 5. per-page `og:*` overrides

pub mod image;
pub mod meta_tags;

use tracing::debug;

use crate::error::Result;
use crate::extractor::extract_description;
use crate::host::HostEnvironment;
use crate::options::parse_description_length;
use crate::title::sanitize_title;
use crate::tree::DocumentNode;
use crate::{url_utils, Options};

pub use image::{resolve_image_url, select_image, ImageChoice, ImageOrigin};
pub use meta_tags::{make_tag, TagSet};

/// Per-page field overriding [`Options::description_length`].
pub const DESCRIPTION_LENGTH_FIELD: &str = "ogp_description_length";

/// Prefix of per-page fields copied into the tag set.
pub const OG_PREFIX: &str = "og:";

/// How the builder lays out output files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// `guide/setup.html`
    #[default]
    Flat,
    /// `guide/setup/` (served as `guide/setup/index.html`)
    Directory,
}

/// Ordered per-page override fields, as written in the page's field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    entries: Vec<(String, String)>,
}

impl PageFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Take a field out.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PageFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// What the host knows about the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Output path without suffix, e.g. `guide/setup`.
    pub pagename: String,
    /// Rendered title, possibly containing inline markup.
    pub title: String,
    /// Suffix of output files in [`OutputLayout::Flat`].
    pub file_suffix: String,
    pub layout: OutputLayout,
    pub fields: PageFields,
}

impl PageContext {
    /// A flat `.html` page with no overrides.
    #[must_use]
    pub fn new(pagename: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            pagename: pagename.into(),
            title: title.into(),
            file_suffix: ".html".to_string(),
            layout: OutputLayout::Flat,
            fields: PageFields::new(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: PageFields) -> Self {
        self.fields = fields;
        self
    }

    /// Output path of the page relative to the site root.
    #[must_use]
    pub fn output_path(&self) -> String {
        match self.layout {
            OutputLayout::Flat => format!("{}{}", self.pagename, self.file_suffix),
            OutputLayout::Directory => format!("{}/", self.pagename),
        }
    }
}

/// Compute the Open Graph tags of one page.
///
/// Fails only when the host environment is inconsistent (see
/// [`HostEnvironment::resolve_site_url`]) or the site URL is unparseable.
/// Page content, per-page fields and image values never fail the page.
pub fn build_tags<N: DocumentNode>(
    page: &PageContext,
    root: &N,
    options: &Options,
    env: &HostEnvironment,
) -> Result<TagSet> {
    let mut fields = page.fields.clone();
    let mut tags = TagSet::new();

    let budget = fields
        .get(DESCRIPTION_LENGTH_FIELD)
        .map_or(options.description_length, parse_description_length);

    let title = sanitize_title(&page.title);
    let description = extract_description(root, budget, &title.known_titles());

    tags.insert("og:title", title.text.as_str());
    tags.insert("og:type", options.og_type.as_str());

    let site_url = env.resolve_site_url(options.site_url.as_deref())?;
    let page_url = url_utils::join_url(site_url.as_deref(), &page.output_path())?;
    tags.insert("og:url", page_url.as_str());

    let site_name = options.site_name.as_deref().filter(|s| !s.is_empty());
    if let Some(site_name) = site_name {
        tags.insert("og:site_name", site_name);
    }

    if !description.is_empty() {
        tags.insert("og:description", description);
    }

    if let Some(image) = select_image(
        &mut fields,
        root,
        options,
        site_url.as_deref(),
        &page_url,
        &page.pagename,
    ) {
        tags.insert("og:image", image.url);

        let alt = image
            .alt
            .or_else(|| site_name.map(str::to_string))
            .or_else(|| Some(title.text.clone()).filter(|t| !t.is_empty()));
        if let Some(alt) = alt {
            tags.insert("og:image:alt", alt);
        }
    }

    for (key, value) in fields.iter().filter(|(k, _)| k.starts_with(OG_PREFIX)) {
        tags.insert(key, value);
    }

    debug!(page = %page.pagename, budget, tags = tags.len(), "built Open Graph tags");
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let flat = PageContext::new("guide/setup", "Setup");
        assert_eq!(flat.output_path(), "guide/setup.html");

        let dir = PageContext::new("guide/setup", "Setup").with_layout(OutputLayout::Directory);
        assert_eq!(dir.output_path(), "guide/setup/");
    }

    #[test]
    fn test_page_fields_order_and_remove() {
        let mut fields: PageFields = [("og:locale", "en_US"), ("og:type", "article")]
            .into_iter()
            .collect();
        fields.insert("og:locale", "de_DE");

        let keys: Vec<_> = fields.iter().collect();
        assert_eq!(keys, vec![("og:locale", "de_DE"), ("og:type", "article")]);

        assert_eq!(fields.remove("og:locale").as_deref(), Some("de_DE"));
        assert_eq!(fields.remove("og:locale"), None);
        assert_eq!(fields.get("og:type"), Some("article"));
    }
}
