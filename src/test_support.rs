//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::content::RawDocument;
use crate::source::{ContentPage, ContentSource, SourceError};

/// Build a post document with a title, one paragraph and a cover
pub fn post_doc(slug: &str, title: &str) -> RawDocument {
    serde_json::from_value(json!({
        "id": format!("id-{}", slug),
        "uid": slug,
        "type": "post",
        "last_publication_date": "2023-05-14T18:21:13+0000",
        "data": {
            "title": [{ "type": "heading1", "text": title }],
            "description": [{ "type": "paragraph", "text": format!("About {}", title) }],
            "cover": { "url": format!("https://cdn.example/{}.png", slug) }
        }
    }))
    .unwrap()
}

/// In-memory content source with canned pages
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<u32, Vec<RawDocument>>,
    singles: HashMap<String, RawDocument>,
    total_pages: u32,
    failing: Mutex<bool>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: u32, slugs: &[&str]) -> Self {
        let docs = slugs.iter().map(|slug| post_doc(slug, slug)).collect();
        self.pages.insert(page, docs);
        self
    }

    pub fn with_single(mut self, doc: RawDocument) -> Self {
        self.singles.insert(doc.doc_type.clone(), doc);
        self
    }

    /// Make every following fetch fail with a network error
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap() {
            Err(SourceError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn fetch_content_page(&self, page: u32) -> Result<ContentPage, SourceError> {
        self.record()?;
        Ok(ContentPage {
            items: self.pages.get(&page).cloned().unwrap_or_default(),
            page,
            total_pages: self.total_pages,
        })
    }

    async fn fetch_by_uid(&self, doc_type: &str, uid: &str) -> Result<Option<RawDocument>, SourceError> {
        self.record()?;
        Ok(self
            .pages
            .values()
            .flatten()
            .find(|doc| doc.doc_type == doc_type && doc.uid.as_deref() == Some(uid))
            .cloned())
    }

    async fn fetch_single(&self, doc_type: &str) -> Result<Option<RawDocument>, SourceError> {
        self.record()?;
        Ok(self.singles.get(doc_type).cloned())
    }
}
