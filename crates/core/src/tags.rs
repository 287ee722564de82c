//! Fixed tag tables shared by the pruner and the serializer.

/// Selector matching the whole document, used when no target is given.
pub const DEFAULT_TARGET: &str = "html";

/// Tags rendered on their own line. A newline follows their serialized content.
pub const BLOCK_TAGS: [&str; 36] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "title",
    "tr",
    "ul",
];

/// Void elements. Re-emitting one of these never writes a closing tag.
pub const SELF_CLOSING_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements a browser never renders, removed before extraction unless kept.
pub const HIDDEN_SELECTORS: [&str; 19] = [
    "[hidden]",
    "area",
    "base",
    "basefont",
    "datalist",
    "head",
    "link",
    "meta",
    "noembed",
    "noframes",
    "noscript",
    "param",
    "rp",
    "script",
    "style",
    "template",
    "title",
    "input[type=hidden]",
    "dialog:not([open])",
];

pub fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}
