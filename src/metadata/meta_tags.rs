//! Open Graph tag set and HTML rendering.

/// Ordered `property -> content` map of Open Graph tags.
///
/// Re-inserting a property replaces its content but keeps its position, so
/// per-page overrides land where the computed tag was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    entries: Vec<(String, String)>,
}

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag.
    pub fn insert(&mut self, property: impl Into<String>, content: impl Into<String>) {
        let property = property.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = content,
            None => self.entries.push((property, content)),
        }
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every tag, then `custom` verbatim, one per line.
    #[must_use]
    pub fn to_html(&self, custom: &[String]) -> String {
        self.iter()
            .map(|(property, content)| make_tag(property, content))
            .chain(custom.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format one `<meta>` tag.
///
/// Double quotes in `content` are escaped so they cannot end the attribute.
///
/// ```rust
/// use rs_opengraph::metadata::make_tag;
///
/// assert_eq!(
///     make_tag("og:site_name", r#"The "Best" Docs"#),
///     r#"<meta property="og:site_name" content="The &quot;Best&quot; Docs" />"#
/// );
/// ```
#[must_use]
pub fn make_tag(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{property}" content="{}" />"#,
        content.replace('"', "&quot;")
    )
}
