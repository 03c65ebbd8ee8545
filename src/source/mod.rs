//! Content source - the backend that supplies documents
//!
//! The rest of the crate only talks to the [`ContentSource`] trait, so the
//! HTTP client can be swapped for a test double.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::RawDocument;

pub use http::HttpContentSource;

/// Errors raised while talking to the content backend
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (timeout, DNS, connection refused)
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),
}

/// One page of documents
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub items: Vec<RawDocument>,
    pub page: u32,
    pub total_pages: u32,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of the post listing, 1-based
    ///
    /// Ordering, selected fields and page size belong to the source.
    async fn fetch_content_page(&self, page: u32) -> Result<ContentPage, SourceError>;

    /// Look up a document by type and uid
    async fn fetch_by_uid(&self, doc_type: &str, uid: &str) -> Result<Option<RawDocument>, SourceError>;

    /// Fetch the first document of a singleton type
    async fn fetch_single(&self, doc_type: &str) -> Result<Option<RawDocument>, SourceError>;
}
