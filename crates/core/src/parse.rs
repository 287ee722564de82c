//! HTML parsing and DOM manipulation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML, querying it with CSS selectors and mutating it before extraction.
//!
//! # Example
//!
//! ```rust
//! use unmark_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use ego_tree::{NodeId, NodeRef};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};

use crate::{Result, UnmarkError};

/// Compiles a selector, mapping failures to [`UnmarkError::InvalidSelector`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| UnmarkError::InvalidSelector { selector: selector.to_string(), reason: e.to_string() })
}

/// Represents a parsed HTML document.
///
/// The document owns its tree exclusively. Removals and replacements happen
/// in place; detached subtrees are never visited again by any query.
///
/// # Example
///
/// ```rust
/// use unmark_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// The parser recovers from malformed markup, so any string (including
    /// the empty string) produces a document with `html`, `head` and `body`.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    pub(crate) fn root(&self) -> NodeRef<'_, Node> {
        self.html.tree.root()
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`UnmarkError::InvalidSelector`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unmark_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.matches(&sel).map(|element| Element { element }).collect())
    }

    /// Elements of the attached tree matching `selector`, in document order.
    ///
    /// `Html::select` walks the node arena, which still holds detached nodes,
    /// so matching is done over a traversal from the root instead.
    pub(crate) fn matches<'a, 'b>(&'a self, selector: &'b Selector) -> impl Iterator<Item = ElementRef<'a>> + 'b
    where
        'a: 'b,
    {
        self.root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| selector.matches(element))
    }

    pub(crate) fn match_ids(&self, selector: &Selector) -> Vec<NodeId> {
        self.matches(selector).map(|element| element.id()).collect()
    }

    /// Detaches every element matching `selector` together with its subtree.
    ///
    /// Returns the number of matches detached.
    pub fn remove_matching(&mut self, selector: &str) -> Result<usize> {
        let sel = compile_selector(selector)?;
        Ok(self.remove_compiled(&sel))
    }

    pub(crate) fn remove_compiled(&mut self, selector: &Selector) -> usize {
        let ids = self.match_ids(selector);
        for id in &ids {
            self.detach(*id);
        }
        ids.len()
    }

    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Puts a text node where `id` was and detaches the original node.
    pub(crate) fn replace_with_text(&mut self, id: NodeId, text: &str) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.insert_before(Node::Text(Text { text: text.into() }));
            node.detach();
        }
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.matches(&selector).next().map(|el| el.text().collect::<String>())
    }

    /// Gets all text content of the attached tree, markup stripped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.root().descendants() {
            if let Some(text) = node.value().as_text() {
                out.push_str(&text.text);
            }
        }
        out
    }
}

/// A wrapper around scraper's ElementRef for easier DOM access.
///
/// # Example
///
/// ```rust
/// use unmark_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Attributes as `(name, value)` pairs in source order.
    pub fn attrs(&self) -> Vec<(&str, &str)> {
        self.element.value().attrs().collect()
    }

    /// Gets the lowercase tag name of this element.
    ///
    /// Foreign elements such as SVG's `clipPath` keep their source case in
    /// the tree; this folds it.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <a href="https://example.com" data-x="1" class="link">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = Document::parse("").unwrap();
        assert_eq!(doc.select("html").unwrap().len(), 1);
        assert_eq!(doc.select("body").unwrap().len(), 1);
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_attributes_keep_source_order() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let link = &doc.select("a").unwrap()[0];
        let names: Vec<&str> = link.attrs().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["href", "data-x", "class"]);
    }

    #[test]
    fn test_tag_name_is_lowercase() {
        let doc = Document::parse("<div><svg><clipPath>x</clipPath></svg></div>").unwrap();
        assert_eq!(doc.select("div").unwrap()[0].tag_name(), "div");

        let clip = doc.select("svg > *").unwrap();
        assert_eq!(clip.len(), 1);
        assert_eq!(clip[0].tag_name(), "clippath");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(UnmarkError::InvalidSelector { .. })));
    }

    #[test]
    fn test_remove_matching_detaches_subtree() {
        let mut doc = Document::parse("<div><p>keep</p><aside><p>drop</p></aside></div>").unwrap();
        let removed = doc.remove_matching("aside").unwrap();

        assert_eq!(removed, 1);
        assert_eq!(doc.select("p").unwrap().len(), 1);
        assert!(!doc.text_content().contains("drop"));
    }

    #[test]
    fn test_remove_nested_matches() {
        let mut doc = Document::parse("<div class='x'><div class='x'>inner</div></div><p>rest</p>").unwrap();
        let removed = doc.remove_matching(".x").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(doc.select(".x").unwrap().len(), 0);
        assert_eq!(doc.text_content(), "rest");
    }

    #[test]
    fn test_replace_with_text() {
        let mut doc = Document::parse(r#"<p>a <img alt="pic" src="x.png"> b</p>"#).unwrap();
        let sel = compile_selector("img").unwrap();
        let ids = doc.match_ids(&sel);
        doc.replace_with_text(ids[0], "pic");

        assert!(doc.select("img").unwrap().is_empty());
        assert_eq!(doc.select("p").unwrap()[0].text(), "a pic b");
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let text = doc.text_content();

        assert!(text.contains("Heading"));
        assert!(text.contains("Paragraph 1"));
        assert!(text.contains("Paragraph 2"));
    }
}
