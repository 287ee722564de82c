//! Selector-driven text extraction.
//!
//! [`extract`] runs the whole pipeline over a parsed [`Document`]:
//!
//! 1. detach everything matched by the removal selectors,
//! 2. drop hidden elements and swap images for their alt text,
//! 3. serialize each element matched by the target selectors,
//! 4. trim, and optionally drop blank lines.
//!
//! # Example
//!
//! ```rust
//! use unmark_core::{ExtractConfig, extract_html};
//!
//! let html = "<div id='post'><h1>Title</h1><p>Body text</p></div><footer>(c)</footer>";
//! let config = ExtractConfig::builder().target("#post").keep_tag("headings").build();
//! let text = extract_html(html, &config).unwrap();
//! assert_eq!(text, "<h1>Title</h1>\nBody text");
//! ```

use scraper::Selector;

use crate::bundles::KeepSet;
use crate::minify::remove_blank_lines;
use crate::parse::{Document, compile_selector};
use crate::prune::{remove_hidden, substitute_alt_text};
use crate::serialize::Serializer;
use crate::tags::{DEFAULT_TARGET, is_block};
use crate::Result;

/// Configuration for text extraction.
///
/// # Example
///
/// ```rust
/// use unmark_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .target("article")
///     .remove(".ads")
///     .minify(true)
///     .build();
/// assert_eq!(config.targets, vec!["article".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Target selectors, visited in order (default: `["html"]`).
    pub targets: Vec<String>,
    /// Selectors whose matches are deleted before extraction.
    pub removals: Vec<String>,
    /// Collapse whitespace in text nodes.
    pub minify: bool,
    /// Drop whitespace-only lines from the final text.
    pub remove_blank_lines: bool,
    /// Stop after the first matched element.
    pub first_only: bool,
    /// Tags (or bundle names) whose own markup is kept.
    pub keep_tags: Vec<String>,
    /// Keep every attribute on kept tags instead of the allow-list.
    pub keep_all_attributes: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            targets: vec![DEFAULT_TARGET.to_string()],
            removals: Vec::new(),
            minify: false,
            remove_blank_lines: false,
            first_only: false,
            keep_tags: Vec::new(),
            keep_all_attributes: false,
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for ExtractConfig.
///
/// The first call to [`target`](Self::target) or [`targets`](Self::targets)
/// replaces the default whole-document target.
#[derive(Debug, Clone)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
    default_targets: bool,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default(), default_targets: true }
    }

    fn clear_default_targets(&mut self) {
        if self.default_targets {
            self.config.targets.clear();
            self.default_targets = false;
        }
    }

    /// Adds a target selector.
    pub fn target(mut self, selector: impl Into<String>) -> Self {
        self.clear_default_targets();
        self.config.targets.push(selector.into());
        self
    }

    /// Adds several target selectors. An empty list keeps the default.
    pub fn targets<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for selector in selectors {
            self = self.target(selector);
        }
        self
    }

    /// Adds a removal selector.
    pub fn remove(mut self, selector: impl Into<String>) -> Self {
        self.config.removals.push(selector.into());
        self
    }

    /// Adds several removal selectors.
    pub fn removals<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.removals.extend(selectors.into_iter().map(Into::into));
        self
    }

    /// Sets whether text nodes are whitespace-minified.
    pub fn minify(mut self, value: bool) -> Self {
        self.config.minify = value;
        self
    }

    /// Sets whether blank lines are dropped from the result.
    pub fn remove_blank_lines(mut self, value: bool) -> Self {
        self.config.remove_blank_lines = value;
        self
    }

    /// Sets whether only the first match is returned.
    pub fn first_only(mut self, value: bool) -> Self {
        self.config.first_only = value;
        self
    }

    /// Adds a tag name or bundle name to keep.
    pub fn keep_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.keep_tags.push(tag.into());
        self
    }

    /// Adds several tag or bundle names to keep.
    pub fn keep_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.keep_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets whether kept tags carry all of their attributes.
    pub fn keep_all_attributes(mut self, value: bool) -> Self {
        self.config.keep_all_attributes = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors compiled up front so a bad one fails before the tree is touched.
struct CompiledSelectors {
    targets: Vec<Selector>,
    removals: Vec<Selector>,
}

impl CompiledSelectors {
    fn compile(config: &ExtractConfig) -> Result<Self> {
        let targets = config
            .targets
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let removals = config
            .removals
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { targets, removals })
    }
}

/// Extracts text from `doc` according to `config`.
///
/// The document is pruned in place first; the caller should treat it as
/// consumed afterwards. No match yields an empty string, not an error.
///
/// # Errors
///
/// Returns [`crate::UnmarkError::InvalidSelector`] if any target or removal
/// selector is invalid. The document is left untouched in that case.
pub fn extract(doc: &mut Document, config: &ExtractConfig) -> Result<String> {
    let keep = KeepSet::expand(&config.keep_tags);
    let selectors = CompiledSelectors::compile(config)?;

    for (selector, source) in selectors.removals.iter().zip(&config.removals) {
        let removed = doc.remove_compiled(selector);
        tracing::debug!(selector = %source, removed, "applied removal selector");
    }

    let hidden = remove_hidden(doc, &keep);
    let images = substitute_alt_text(doc, &keep);
    tracing::debug!(hidden, images, kept = ?keep.to_sorted_vec(), "pruned document");

    let serializer = Serializer::new(&keep, config.minify, config.keep_all_attributes);
    let mut output = String::new();
    let mut matched = 0usize;

    'targets: for (selector, source) in selectors.targets.iter().zip(&config.targets) {
        for element in doc.matches(selector) {
            matched += 1;
            output.push_str(&serializer.element(element));
            if is_block(element.value().name()) {
                output.push('\n');
            }

            if config.first_only {
                tracing::debug!(selector = %source, "first match found, stopping");
                break 'targets;
            }
        }
    }
    tracing::debug!(matched, "serialized target elements");

    let trimmed = output.trim_matches([' ', '\t', '\n']);
    if config.remove_blank_lines {
        Ok(remove_blank_lines(trimmed))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parses `html` and extracts text from it in one step.
pub fn extract_html(html: &str, config: &ExtractConfig) -> Result<String> {
    let mut doc = Document::parse(html)?;
    extract(&mut doc, config)
}
