//! Tag bundles and the keep-set derived from them.
//!
//! A bundle is a symbolic name such as `headings` that stands for a fixed list
//! of tag names. [`KeepSet::expand`] turns the caller's keep-tags into the
//! concrete set of tags whose own markup survives serialization.
//!
//! # Example
//!
//! ```rust
//! use unmark_core::KeepSet;
//!
//! let keep = KeepSet::expand(["headings", "a"]);
//! assert!(keep.contains("h3"));
//! assert!(keep.contains("a"));
//! assert!(!keep.contains("p"));
//! ```

use std::collections::HashSet;

/// Symbolic bundle names and their member tags.
pub const BUNDLES: &[(&str, &[&str])] = &[
    ("headings", &["h1", "h2", "h3", "h4", "h5", "h6"]),
    ("lists", &["ul", "ol", "li", "dl", "dt", "dd"]),
    (
        "tables",
        &["table", "caption", "colgroup", "col", "thead", "tbody", "tfoot", "tr", "th", "td"],
    ),
    (
        "emphasis",
        &["b", "strong", "i", "em", "u", "s", "mark", "small", "sub", "sup"],
    ),
    ("code", &["code", "kbd", "samp", "var", "pre"]),
    (
        "media",
        &["img", "picture", "source", "figure", "figcaption", "audio", "video", "track"],
    ),
    ("links", &["a"]),
    ("quotes", &["blockquote", "q", "cite"]),
];

/// Looks up the member tags of a bundle by name.
pub fn bundle(name: &str) -> Option<&'static [&'static str]> {
    BUNDLES
        .iter()
        .find(|(bundle, _)| bundle.eq_ignore_ascii_case(name))
        .map(|(_, tags)| *tags)
}

/// Tag names whose elements keep their own start and end tags in output.
///
/// Built once per extraction and only queried afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet {
    tags: HashSet<String>,
}

impl KeepSet {
    /// Expands bundle names into their member tags and passes every other
    /// entry through as a literal tag name.
    ///
    /// Entries are lowercased, matching the parser's tag-name normalization.
    /// Unknown tag names are harmless; they simply never match an element.
    pub fn expand<I, S>(keep_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = HashSet::new();
        for entry in keep_tags {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            match bundle(entry) {
                Some(members) => tags.extend(members.iter().map(|tag| tag.to_string())),
                None => {
                    tags.insert(entry.to_ascii_lowercase());
                }
            }
        }
        Self { tags }
    }

    /// Case-insensitive membership test.
    ///
    /// The parser keeps mixed-case names for foreign elements such as SVG's
    /// `clipPath`, so the queried name is lowercased before lookup.
    pub fn contains(&self, tag: &str) -> bool {
        if tag.bytes().any(|b| b.is_ascii_uppercase()) {
            self.tags.contains(&tag.to_ascii_lowercase())
        } else {
            self.tags.contains(tag)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Sorted member list, for diagnostics.
    pub fn to_sorted_vec(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("headings", 6)]
    #[case("lists", 6)]
    #[case("tables", 10)]
    #[case("links", 1)]
    #[case("HEADINGS", 6)]
    fn test_bundle_sizes(#[case] name: &str, #[case] expected: usize) {
        assert_eq!(KeepSet::expand([name]).len(), expected);
    }

    #[test]
    fn test_literal_tags_pass_through() {
        let keep = KeepSet::expand(["span", "my-widget"]);
        assert!(keep.contains("span"));
        assert!(keep.contains("my-widget"));
        assert_eq!(keep.len(), 2);
    }

    #[test]
    fn test_mixed_bundles_and_literals() {
        let keep = KeepSet::expand(vec!["headings".to_string(), "p".to_string(), "h1".to_string()]);
        assert!(keep.contains("h1"));
        assert!(keep.contains("h6"));
        assert!(keep.contains("p"));
        assert_eq!(keep.len(), 7);
    }

    #[test]
    fn test_literal_entries_are_lowercased() {
        let keep = KeepSet::expand(["H1", " Pre "]);
        assert!(keep.contains("h1"));
        assert!(keep.contains("pre"));
    }

    #[rstest]
    #[case("clipPath", "clipPath")]
    #[case("clippath", "clipPath")]
    #[case("CLIPPATH", "clipPath")]
    #[case("foreignObject", "foreignobject")]
    fn test_contains_ignores_case(#[case] entry: &str, #[case] queried: &str) {
        assert!(KeepSet::expand([entry]).contains(queried));
    }

    #[test]
    fn test_empty_input() {
        let keep = KeepSet::expand(Vec::<String>::new());
        assert!(keep.is_empty());
        assert!(!keep.contains("p"));
    }

    #[test]
    fn test_sorted_listing() {
        let keep = KeepSet::expand(["quotes"]);
        assert_eq!(keep.to_sorted_vec(), vec!["blockquote", "cite", "q"]);
    }
}
