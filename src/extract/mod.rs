//! Content extraction
//!
//! Turns an HTML page into a cleaned title and main-content text. Link
//! extraction lives with the crawler; this module only cares about what a
//! reader would see.

mod content;
mod text;

pub use content::{extract_content, ExtractedContent, CONTENT_SELECTORS};
pub use text::clean_text;
