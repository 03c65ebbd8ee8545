//! headless-blog: a blog front end for a headless CMS
//!
//! This crate fetches posts and page copy from a Prismic-style content API
//! and renders them as HTML, with active navigation links and a paginated
//! post listing.

pub mod cache;
pub mod config;
pub mod content;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod source;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use cache::RevalidateCache;
use content::{AboutContent, ContentSummary, PostDetail};
use listing::{ListingController, ListingError, ListingPageState};
use source::{ContentSource, HttpContentSource, SourceError};

/// Outcome of looking up one page of the post listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPage {
    Found(ListingPageState),
    /// The requested page lies past the last page the source reports
    PastEnd { last_page: u32 },
}

/// The main blog application
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Backend supplying documents
    pub source: Arc<dyn ContentSource>,
    listing_cache: RevalidateCache<ListingPage>,
    about_cache: RevalidateCache<Option<AboutContent>>,
}

impl Blog {
    /// Create a blog from a site directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        let source = HttpContentSource::new(&config.api, &config.listing)?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Create a blog over an already built content source
    pub fn with_source(config: config::SiteConfig, source: Arc<dyn ContentSource>) -> Self {
        let ttl = config.revalidate();
        Self {
            config,
            source,
            listing_cache: RevalidateCache::new(ttl),
            about_cache: RevalidateCache::new(ttl),
        }
    }

    /// One page of the post listing
    ///
    /// The first page is served from the revalidation cache; other pages are
    /// fetched on every call.
    pub async fn listing_page(&self, page: u32) -> Result<ListingPage, SourceError> {
        let page = page.max(1);
        if page == 1 {
            self.listing_cache
                .get_or_fetch("/posts", move || self.fetch_listing(1))
                .await
        } else {
            self.fetch_listing(page).await
        }
    }

    async fn fetch_listing(&self, page: u32) -> Result<ListingPage, SourceError> {
        let fetched = self.source.fetch_content_page(page).await?;
        let total_pages = fetched.total_pages.max(1);
        if page > total_pages {
            tracing::debug!("Listing page {} is past the last page {}", page, total_pages);
            return Ok(ListingPage::PastEnd {
                last_page: total_pages,
            });
        }

        let items = fetched
            .items
            .iter()
            .map(|doc| ContentSummary::from_document(doc, &self.config.language))
            .collect();

        Ok(ListingPage::Found(ListingPageState {
            items,
            current_page: page,
            total_pages,
        }))
    }

    /// A single post by slug, `None` when there is no such post
    pub async fn post(&self, slug: &str) -> Result<Option<PostDetail>, SourceError> {
        let doc = self
            .source
            .fetch_by_uid(&self.config.listing.post_type, slug)
            .await?;
        Ok(doc.map(|doc| PostDetail::from_document(&doc, &self.config.language)))
    }

    /// Content of the about page
    pub async fn about(&self) -> Result<Option<AboutContent>, SourceError> {
        self.about_cache
            .get_or_fetch("/about", move || async move {
                let doc = self.source.fetch_single("about").await?;
                Ok::<_, SourceError>(doc.as_ref().map(AboutContent::from_document))
            })
            .await
    }

    /// A listing controller preloaded with the first page
    pub async fn controller(&self) -> Result<ListingController, ListingError> {
        ListingController::preload(self.source.clone(), &self.config.language).await
    }
}
