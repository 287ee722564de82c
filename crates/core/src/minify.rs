//! Whitespace minification for text nodes.
//!
//! Each maximal whitespace run collapses according to how many newlines it
//! holds: none becomes a single space, one stays a single newline, and two or
//! more become exactly one blank line (`"\n\n"`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapses the whitespace runs in `text`.
///
/// A fragment that reduces to a lone `"\n"` is incidental formatting between
/// inline siblings and is returned as `" "` instead.
///
/// # Example
///
/// ```rust
/// use unmark_core::minify::minify_text;
///
/// assert_eq!(minify_text("a  \t b"), "a b");
/// assert_eq!(minify_text("a\n\n\n\nb"), "a\n\nb");
/// assert_eq!(minify_text("\n    "), " ");
/// ```
pub fn minify_text(text: &str) -> Cow<'_, str> {
    let collapsed = WHITESPACE_RUN.replace_all(text, |caps: &Captures| match newline_count(&caps[0]) {
        0 => " ",
        1 => "\n",
        _ => "\n\n",
    });

    if collapsed == "\n" { Cow::Borrowed(" ") } else { collapsed }
}

fn newline_count(run: &str) -> usize {
    run.bytes().filter(|b| *b == b'\n').count()
}

/// Drops lines that are empty or whitespace-only and rejoins the rest.
pub fn remove_blank_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
