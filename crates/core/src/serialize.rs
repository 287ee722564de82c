//! Recursive serialization of an element subtree to text.
//!
//! Text nodes are emitted (optionally minified), comments vanish, and elements
//! either disappear around their content or, when their tag is kept, are
//! re-emitted with an allow-listed attribute set. Block-level children are
//! followed by a newline. `<pre>` content is taken verbatim.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Node};

use crate::attributes::{filter_attributes, render_attributes};
use crate::bundles::KeepSet;
use crate::minify::minify_text;
use crate::tags::{is_block, is_self_closing};

/// Serialization policy for one extraction.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'k> {
    keep: &'k KeepSet,
    minify: bool,
    keep_all_attributes: bool,
}

impl<'k> Serializer<'k> {
    pub fn new(keep: &'k KeepSet, minify: bool, keep_all_attributes: bool) -> Self {
        Self { keep, minify, keep_all_attributes }
    }

    /// Serializes `element` and everything below it.
    pub fn element(&self, element: ElementRef<'_>) -> String {
        let mut out = String::new();
        self.write_node(*element, &mut out);
        out
    }

    fn write_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => {
                if self.minify {
                    out.push_str(&minify_text(&text.text));
                } else {
                    out.push_str(&text.text);
                }
            }
            Node::Element(element) => self.write_element(node, element, out),
            Node::Document | Node::Fragment => self.write_children(node, out),
            Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
        }
    }

    fn write_element(&self, node: NodeRef<'_, Node>, element: &Element, out: &mut String) {
        let tag = element.name();

        if tag == "pre" {
            let text: String = ElementRef::wrap(node)
                .map(|pre| pre.text().collect())
                .unwrap_or_default();
            if self.keep.contains(tag) {
                self.wrap(element, &text, out);
            } else {
                out.push_str(&text);
            }
            return;
        }

        if self.keep.contains(tag) {
            let mut inner = String::new();
            self.write_children(node, &mut inner);
            self.wrap(element, &inner, out);
        } else {
            self.write_children(node, out);
        }
    }

    fn write_children(&self, node: NodeRef<'_, Node>, out: &mut String) {
        for child in node.children() {
            self.write_node(child, out);
            if let Node::Element(element) = child.value()
                && is_block(element.name())
            {
                out.push('\n');
            }
        }
    }

    /// `<tag attrs>content</tag>`, or just `<tag attrs>` for void elements.
    fn wrap(&self, element: &Element, content: &str, out: &mut String) {
        let tag = element.name();
        let attrs = filter_attributes(tag, element.attrs(), self.keep_all_attributes);

        out.push('<');
        out.push_str(tag);
        out.push_str(&render_attributes(&attrs));
        out.push('>');

        if is_self_closing(tag) {
            return;
        }

        out.push_str(content);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}
