//! Reading HTML from files and stdin.
//!
//! Bytes are decoded before they reach the parser. Decoding tries, in order:
//! a byte-order mark, strict UTF-8 (which covers ASCII), strict UTF-16LE and
//! UTF-16BE, and finally lossy UTF-8.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::{Result, UnmarkError};

/// Reads and decodes HTML from a local file.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        Err(UnmarkError::FileNotFound(path.to_path_buf()))
    } else {
        let bytes = fs::read(path)?;
        Ok(decode_bytes(&bytes))
    }
}

/// Reads and decodes HTML from standard input until EOF.
pub fn read_stdin() -> Result<String> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(decode_bytes(&buffer))
}

/// Decodes raw input bytes to a string.
///
/// # Example
///
/// ```rust
/// use unmark_core::input::decode_bytes;
///
/// assert_eq!(decode_bytes(b"<p>hi</p>"), "<p>hi</p>");
/// // "hé" as UTF-16LE without a byte-order mark
/// assert_eq!(decode_bytes(&[b'h', 0x00, 0xE9, 0x00]), "hé");
/// ```
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    if bytes.len() % 2 == 0 {
        for encoding in [UTF_16LE, UTF_16BE] {
            if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
                tracing::debug!(encoding = encoding.name(), "decoded input without BOM");
                return text.into_owned();
            }
        }
    }

    tracing::warn!("input is not valid UTF-8 or UTF-16, decoding lossily");
    String::from_utf8_lossy(bytes).into_owned()
}
