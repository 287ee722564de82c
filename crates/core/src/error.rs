//! Error types for unmark operations.
//!
//! This module defines [`UnmarkError`], the single error type returned by
//! parsing, extraction and the input helpers.
//!
//! # Example
//!
//! ```rust
//! use unmark_core::{ExtractConfig, UnmarkError, extract_html};
//!
//! let config = ExtractConfig::builder().target("[[broken").build();
//! match extract_html("<p>Hello</p>", &config) {
//!     Err(UnmarkError::InvalidSelector { selector, .. }) => assert_eq!(selector, "[[broken"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction operations.
///
/// Only [`UnmarkError::InvalidSelector`] and [`UnmarkError::HtmlParseError`]
/// can come out of the extraction core; the remaining variants belong to the
/// input helpers in [`crate::input`].
#[derive(Error, Debug)]
pub enum UnmarkError {
    /// A selector string is not valid CSS selector syntax.
    ///
    /// All selectors in a configuration are compiled before the document is
    /// touched, so this error never leaves a half-mutated tree behind.
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The markup could not be interpreted at all.
    ///
    /// The HTML parser recovers from malformed input, so this is rare.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading the input failed.
    #[error("Failed to read input: {0}")]
    ReadError(#[from] std::io::Error),
}

impl UnmarkError {
    /// Returns true for the two failure kinds produced by extraction itself.
    pub fn is_extraction_error(&self) -> bool {
        matches!(self, Self::InvalidSelector { .. } | Self::HtmlParseError(_))
    }
}

/// Result type alias for UnmarkError.
pub type Result<T> = std::result::Result<T, UnmarkError>;
