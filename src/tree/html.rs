//! Rendered HTML pages as document trees.
//!
//! Hosts that only have the rendered page (not the source tree) can parse it
//! with `dom_query` and walk it through [`HtmlNode`]. Elements are classified
//! by tag name and class: headings become titles, `ul`/`ol`/`li` become list
//! nodes, callout boxes become admonitions, and so on.

use dom_query::{Document, NodeRef};

use super::{DocumentNode, ListStyle, NodeKind};
use crate::encoding;

/// Classes that mark an element as a callout box.
const ADMONITION_CLASSES: &[&str] = &[
    "admonition",
    "note",
    "warning",
    "tip",
    "important",
    "caution",
    "danger",
    "error",
    "hint",
    "attention",
    "seealso",
];

/// A parsed rendered page.
pub struct HtmlPage {
    doc: Document,
}

impl HtmlPage {
    /// Parse a rendered page from a UTF-8 string.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Document::from(html),
        }
    }

    /// Parse a rendered page from raw bytes, honoring its charset declaration.
    #[must_use]
    pub fn from_bytes(html: &[u8]) -> Self {
        Self::parse(&encoding::transcode_to_utf8(html))
    }

    /// The node extraction starts from: `<body>`, or the document itself.
    #[must_use]
    pub fn root(&self) -> HtmlNode<'_> {
        let node = self
            .doc
            .select("body")
            .nodes()
            .first()
            .copied()
            .unwrap_or_else(|| self.doc.root());
        HtmlNode { node }
    }

    /// Inner HTML of the first `<h1>`, if any, without permalink anchors.
    ///
    /// Suitable as the page title handed to [`crate::sanitize_title`]: its
    /// sanitized text equals the heading's [`DocumentNode::text`].
    #[must_use]
    pub fn heading_html(&self) -> Option<String> {
        let inner = self.doc.select("h1").try_inner_html()?;

        // Serialize from a copy so the page itself stays untouched
        let heading = Document::from(format!("<body>{inner}</body>"));
        heading.select(".headerlink").remove();
        Some(heading.select("body").inner_html().to_string())
    }
}

/// Handle to one node of an [`HtmlPage`].
#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    node: NodeRef<'a>,
}

impl<'a> HtmlNode<'a> {
    fn wrap(node: NodeRef<'a>) -> Self {
        Self { node }
    }

    fn has_class(&self, wanted: &[&str]) -> bool {
        self.node.attr("class").is_some_and(|class| {
            class
                .split_whitespace()
                .any(|c| wanted.iter().any(|w| c.eq_ignore_ascii_case(w)))
        })
    }

    fn collect_text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![*self];

        while let Some(node) = stack.pop() {
            match node.kind() {
                NodeKind::Text => out.push_str(&node.node.text()),
                NodeKind::Invisible => {}
                _ => stack.extend(node.children().into_iter().rev()),
            }
        }
        out
    }
}

impl DocumentNode for HtmlNode<'_> {
    fn kind(&self) -> NodeKind {
        if self.node.is_text() {
            return NodeKind::Text;
        }

        let Some(name) = self.node.node_name() else {
            // Comments, doctypes and processing instructions have no name.
            // The document node is the only nameless node without a parent.
            return if self.node.parent().is_none() {
                NodeKind::Container
            } else {
                NodeKind::Invisible
            };
        };

        if self.has_class(&["headerlink"]) {
            return NodeKind::Invisible;
        }
        if self.has_class(ADMONITION_CLASSES) {
            return NodeKind::Admonition;
        }

        match name.to_ascii_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => NodeKind::Title,
            "ul" => NodeKind::List(ListStyle::Bullet),
            "ol" => NodeKind::List(ListStyle::Enumerated),
            "li" => NodeKind::ListItem,
            "aside" => NodeKind::Admonition,
            "head" => NodeKind::Invisible,
            "script" | "style" | "noscript" | "template" => NodeKind::Raw,
            "pre" => NodeKind::LiteralBlock,
            "img" => NodeKind::Image,
            _ => NodeKind::Container,
        }
    }

    fn children(&self) -> Vec<Self> {
        self.node.children().into_iter().map(Self::wrap).collect()
    }

    fn parent(&self) -> Option<Self> {
        self.node.parent().map(Self::wrap)
    }

    fn text(&self) -> String {
        self.collect_text()
    }

    fn attr(&self, name: &str) -> Option<String> {
        let attr = match name {
            "uri" => "src",
            other => other,
        };
        self.node.attr(attr).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(page: &HtmlPage) -> Vec<NodeKind> {
        page.root()
            .children()
            .into_iter()
            .filter(|n| n.kind() != NodeKind::Text)
            .map(|n| n.kind())
            .collect()
    }

    #[test]
    fn test_element_classification() {
        let page = HtmlPage::parse(
            r#"<body><h1>T</h1><ul></ul><ol></ol><aside></aside>
            <div class="admonition note"></div><pre></pre><script></script>
            <img src="a.png"><p></p><!-- hidden --></body>"#,
        );

        assert_eq!(
            kinds_of(&page),
            vec![
                NodeKind::Title,
                NodeKind::List(ListStyle::Bullet),
                NodeKind::List(ListStyle::Enumerated),
                NodeKind::Admonition,
                NodeKind::Admonition,
                NodeKind::LiteralBlock,
                NodeKind::Raw,
                NodeKind::Image,
                NodeKind::Container,
                NodeKind::Invisible,
            ]
        );
    }

    #[test]
    fn test_heading_text_skips_headerlink() {
        let page = HtmlPage::parse(
            r##"<body><h1>Getting <em>Started</em><a class="headerlink" href="#x">¶</a></h1></body>"##,
        );
        let heading = page.root().children()[0];
        assert_eq!(heading.kind(), NodeKind::Title);
        assert_eq!(heading.text(), "Getting Started");
    }

    #[test]
    fn test_image_attrs() {
        let page = HtmlPage::parse(r#"<body><img src="_images/logo.png" alt="Logo"></body>"#);
        let img = page.root().children()[0];
        assert_eq!(img.attr("uri").as_deref(), Some("_images/logo.png"));
        assert_eq!(img.attr("alt").as_deref(), Some("Logo"));
    }

    #[test]
    fn test_heading_html() {
        let page = HtmlPage::parse("<body><h1><b>Hello</b> World</h1></body>");
        assert_eq!(page.heading_html().as_deref(), Some("<b>Hello</b> World"));

        let page = HtmlPage::parse("<body><p>no heading</p></body>");
        assert!(page.heading_html().is_none());
    }

    #[test]
    fn test_heading_html_drops_permalink() {
        let page = HtmlPage::parse(
            r##"<body><h1><em>Fast</em> builds<a class="headerlink" href="#x">¶</a></h1></body>"##,
        );
        let raw = page.heading_html().unwrap();
        assert_eq!(raw, "<em>Fast</em> builds");

        let heading = page.root().children()[0];
        assert_eq!(crate::sanitize_title(&raw).text, heading.text());
    }

    #[test]
    fn test_heading_html_leaves_page_intact() {
        let page = HtmlPage::parse(r##"<body><h1>Top<a class="headerlink" href="#t">¶</a></h1></body>"##);
        let _ = page.heading_html();
        assert_eq!(page.doc.select("h1 .headerlink").length(), 1);
    }

    #[test]
    fn test_deeply_nested_text() {
        let depth = 5_000;
        let html = format!("<body>{}deep{}</body>", "<span>".repeat(depth), "</span>".repeat(depth));
        let page = HtmlPage::parse(&html);
        assert_eq!(page.root().text(), "deep");
    }

    #[test]
    fn test_root_parent_is_html() {
        let page = HtmlPage::parse("<p>x</p>");
        let root = page.root();
        assert_eq!(root.kind(), NodeKind::Container);
        assert!(root.parent().is_some());
    }
}
