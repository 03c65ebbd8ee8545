//! Content module - CMS documents and their display projections

mod document;
mod rich_text;
mod summary;

pub use document::RawDocument;
pub use rich_text::{rich_text_to_html, RichTextBlock, Span};
pub use summary::{AboutContent, ContentSummary, PostDetail};
