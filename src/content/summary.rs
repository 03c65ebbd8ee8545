//! Display projections of raw documents

use serde::Serialize;

use super::RawDocument;
use crate::helpers::display_publication_date;

/// A post as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    /// Unique slug of the post
    pub slug: String,
    pub title: String,
    /// First paragraph of the description
    pub description: String,
    pub cover: String,
    /// Display-formatted last publication date
    pub updated_at: String,
}

impl ContentSummary {
    /// Project a post document into its listing shape
    pub fn from_document(doc: &RawDocument, language: &str) -> Self {
        Self {
            slug: doc.slug().to_string(),
            title: doc.text("title"),
            description: doc.first_paragraph("description"),
            cover: doc.url("cover"),
            updated_at: display_publication_date(doc.last_publication_date.as_deref(), language),
        }
    }
}

/// A full post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub slug: String,
    pub title: String,
    /// Whole description rendered as HTML
    pub description_html: String,
    pub cover: String,
    pub updated_at: String,
}

impl PostDetail {
    pub fn from_document(doc: &RawDocument, language: &str) -> Self {
        Self {
            slug: doc.slug().to_string(),
            title: doc.text("title"),
            description_html: doc.html("description"),
            cover: doc.url("cover"),
            updated_at: display_publication_date(doc.last_publication_date.as_deref(), language),
        }
    }
}

/// Copy of the about page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutContent {
    pub title: String,
    pub description: String,
    pub banner: String,
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

impl AboutContent {
    pub fn from_document(doc: &RawDocument) -> Self {
        Self {
            title: doc.text("title"),
            description: doc.text("description"),
            banner: doc.url("banner"),
            facebook: doc.url("facebook"),
            instagram: doc.url("instagram"),
            linkedin: doc.url("linkedin"),
        }
    }
}
