//! Attribute allow-listing for re-emitted tags.

/// Attributes every kept tag may carry.
pub const DEFAULT_ATTRIBUTES: [&str; 2] = ["id", "class"];

/// Extra attributes permitted per tag, beyond [`DEFAULT_ATTRIBUTES`].
pub const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "rel", "target"]),
    ("abbr", &["title"]),
    ("audio", &["src", "controls"]),
    ("blockquote", &["cite"]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("link", &["rel", "href", "type", "media"]),
    ("meta", &["name", "content", "property", "charset", "http-equiv"]),
    ("ol", &["start", "reversed"]),
    ("q", &["cite"]),
    ("source", &["src", "srcset", "type", "media"]),
    ("td", &["colspan", "rowspan"]),
    ("th", &["colspan", "rowspan"]),
    ("time", &["datetime"]),
    ("video", &["src", "controls", "poster"]),
];

/// Whether `attribute` may appear on a re-emitted `tag`.
pub fn is_allowed(tag: &str, attribute: &str, keep_all: bool) -> bool {
    if keep_all || DEFAULT_ATTRIBUTES.contains(&attribute) {
        return true;
    }

    TAG_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == tag)
        .is_some_and(|(_, allowed)| allowed.contains(&attribute))
}

/// Filters `(name, value)` pairs down to the allowed ones, preserving order.
pub fn filter_attributes<'a, I>(tag: &str, attrs: I, keep_all: bool) -> Vec<(&'a str, &'a str)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attrs
        .into_iter()
        .filter(|(name, _)| is_allowed(tag, name, keep_all))
        .collect()
}

/// Renders ` name="value"` for each pair. Values are written verbatim.
pub fn render_attributes(attrs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out
}
