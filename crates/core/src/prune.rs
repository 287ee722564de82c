//! Pre-extraction pruning: hidden elements and image alt text.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use scraper::{Node, Selector};

use crate::bundles::KeepSet;
use crate::parse::Document;
use crate::tags::HIDDEN_SELECTORS;

#[allow(clippy::expect_used)]
static HIDDEN: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    HIDDEN_SELECTORS
        .iter()
        .map(|selector| Selector::parse(selector).expect("valid hidden selector"))
        .collect()
});

#[allow(clippy::expect_used)]
static IMG_WITH_ALT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[alt]").expect("valid selector"));

/// Whether the subtree rooted at `node` holds an element named in `keep`,
/// the root itself included.
pub fn should_keep(node: NodeRef<'_, Node>, keep: &KeepSet) -> bool {
    if keep.is_empty() {
        return false;
    }
    node.descendants()
        .filter_map(|n| n.value().as_element())
        .any(|element| keep.contains(element.name()))
}

/// Removes elements a browser would not render, unless they are kept or
/// contain something kept. Returns the number of elements removed.
pub fn remove_hidden(doc: &mut Document, keep: &KeepSet) -> usize {
    let mut removed = 0;
    for (selector, source) in HIDDEN.iter().zip(HIDDEN_SELECTORS) {
        let doomed: Vec<_> = doc
            .matches(selector)
            .filter(|element| !should_keep(**element, keep))
            .map(|element| element.id())
            .collect();

        if !doomed.is_empty() {
            tracing::trace!(selector = source, count = doomed.len(), "removing hidden elements");
        }
        for id in &doomed {
            doc.detach(*id);
        }
        removed += doomed.len();
    }
    removed
}

/// Replaces every `<img alt="...">` with a text node holding its alt text.
///
/// Nothing is replaced when `img` itself is kept. Images without an `alt`
/// attribute stay in place. Returns the number of images replaced.
pub fn substitute_alt_text(doc: &mut Document, keep: &KeepSet) -> usize {
    if keep.contains("img") {
        return 0;
    }

    let images: Vec<_> = doc
        .matches(&IMG_WITH_ALT)
        .filter_map(|img| img.value().attr("alt").map(|alt| (img.id(), alt.to_string())))
        .collect();

    for (id, alt) in &images {
        doc.replace_with_text(*id, alt);
    }
    images.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(doc: &Document) -> String {
        doc.select("body").unwrap()[0].text()
    }

    #[test]
    fn test_removes_scripts_and_styles() {
        let mut doc = Document::parse(
            "<body><p>Visible</p><script>var x = 1;</script><style>p { color: red }</style></body>",
        )
        .unwrap();
        let removed = remove_hidden(&mut doc, &KeepSet::default());

        assert!(removed >= 2);
        assert_eq!(body_text(&doc), "Visible");
    }

    #[test]
    fn test_removes_hidden_attribute_and_head() {
        let mut doc =
            Document::parse("<head><title>T</title></head><body><div hidden>secret</div><p>shown</p></body>").unwrap();
        remove_hidden(&mut doc, &KeepSet::default());

        assert!(doc.select("head").unwrap().is_empty());
        assert!(doc.select("title").unwrap().is_empty());
        assert_eq!(body_text(&doc), "shown");
    }

    #[test]
    fn test_kept_tag_survives() {
        let mut doc = Document::parse("<body><script>code()</script></body>").unwrap();
        remove_hidden(&mut doc, &KeepSet::expand(["script"]));

        assert_eq!(doc.select("script").unwrap().len(), 1);
    }

    #[test]
    fn test_kept_descendant_protects_hidden_ancestor() {
        let mut doc = Document::parse("<body><div hidden><h2>inside</h2></div></body>").unwrap();
        remove_hidden(&mut doc, &KeepSet::expand(["h2"]));

        assert_eq!(doc.select("div[hidden]").unwrap().len(), 1);
        assert_eq!(body_text(&doc), "inside");
    }

    #[test]
    fn test_kept_svg_descendant_matches_case_insensitively() {
        let mut doc =
            Document::parse(r#"<body><div hidden><svg><clipPath id="c">x</clipPath></svg></div></body>"#).unwrap();
        remove_hidden(&mut doc, &KeepSet::expand(["clippath"]));

        assert_eq!(doc.select("div[hidden]").unwrap().len(), 1);
        assert_eq!(body_text(&doc), "x");
    }

    #[test]
    fn test_kept_title_keeps_head_but_not_meta() {
        let mut doc =
            Document::parse(r#"<head><meta name="a" content="b"><title>T</title></head><body></body>"#).unwrap();
        remove_hidden(&mut doc, &KeepSet::expand(["title"]));

        assert_eq!(doc.select("head").unwrap().len(), 1);
        assert_eq!(doc.select("title").unwrap().len(), 1);
        assert!(doc.select("meta").unwrap().is_empty());
    }

    #[test]
    fn test_closed_dialog_removed_open_dialog_kept() {
        let mut doc =
            Document::parse("<body><dialog>closed</dialog><dialog open>open</dialog></body>").unwrap();
        remove_hidden(&mut doc, &KeepSet::default());

        assert_eq!(body_text(&doc), "open");
    }

    #[test]
    fn test_substitute_alt_text() {
        let mut doc =
            Document::parse(r#"<body><p>See <img src="cat.png" alt="a cat"> here <img src="x.png"></p></body>"#)
                .unwrap();
        let replaced = substitute_alt_text(&mut doc, &KeepSet::default());

        assert_eq!(replaced, 1);
        assert_eq!(body_text(&doc), "See a cat here ");
        assert_eq!(doc.select("img").unwrap().len(), 1);
    }

    #[test]
    fn test_kept_img_is_not_substituted() {
        let mut doc = Document::parse(r#"<p><img src="cat.png" alt="a cat"></p>"#).unwrap();
        let replaced = substitute_alt_text(&mut doc, &KeepSet::expand(["media"]));

        assert_eq!(replaced, 0);
        assert_eq!(doc.select("img").unwrap().len(), 1);
    }

    #[test]
    fn test_should_keep_checks_root_and_descendants() {
        let doc = Document::parse("<section><span>x</span></section>").unwrap();
        let section = doc.select("section").unwrap();
        assert_eq!(section.len(), 1);

        let sel = Selector::parse("section").unwrap();
        let node = *doc.matches(&sel).next().unwrap();
        assert!(should_keep(node, &KeepSet::expand(["section"])));
        assert!(should_keep(node, &KeepSet::expand(["span"])));
        assert!(!should_keep(node, &KeepSet::expand(["p"])));
        assert!(!should_keep(node, &KeepSet::default()));
    }
}
