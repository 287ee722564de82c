pub mod attributes;
pub mod bundles;
pub mod error;
pub mod extract;
pub mod input;
pub mod minify;
pub mod parse;
pub mod prune;
pub mod serialize;
pub mod tags;

pub use bundles::{BUNDLES, KeepSet, bundle};
pub use error::{Result, UnmarkError};
pub use extract::{ExtractConfig, ExtractConfigBuilder, extract, extract_html};
pub use input::{decode_bytes, read_file, read_stdin};
pub use parse::{Document, Element};
