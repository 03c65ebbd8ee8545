//! Paginated post listing
//!
//! [`ListingController`] owns the page of summaries a reader is looking at
//! and swaps it for another page on request. Navigation is serialized: a
//! request issued while another is still fetching is rejected with
//! [`ListingError::Busy`].

mod controls;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::content::ContentSummary;
use crate::source::{ContentSource, SourceError};

pub use controls::{Affordances, Control};

/// What the listing currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPageState {
    pub items: Vec<ContentSummary>,
    /// 1-based, always within `1..=total_pages`
    pub current_page: u32,
    /// Fixed for the life of the controller
    pub total_pages: u32,
}

impl ListingPageState {
    pub fn new(items: Vec<ContentSummary>, current_page: u32, total_pages: u32) -> Result<Self, ListingError> {
        if current_page == 0 || total_pages == 0 || current_page > total_pages {
            return Err(ListingError::InvalidState {
                page: current_page,
                total_pages,
            });
        }
        Ok(Self {
            items,
            current_page,
            total_pages,
        })
    }

    /// Controls a reader may use from this page
    pub fn affordances(&self) -> Affordances {
        Affordances::for_page(self.current_page, self.total_pages)
    }
}

/// Why a navigation did not change the listing
#[derive(Debug, Error)]
pub enum ListingError {
    /// The source returned no items for the page
    #[error("page {page} has no posts")]
    EmptyPage { page: u32 },

    /// The page lies outside `1..=total_pages`
    #[error("page {page} is out of range (1..={total_pages})")]
    OutOfRange { page: u32, total_pages: u32 },

    /// The control is not offered on the current page
    #[error("{control} is not available on this page")]
    Unavailable { control: Control },

    /// Another navigation is still in flight
    #[error("a page is already being loaded")]
    Busy,

    /// Fetching the page failed
    #[error("failed to fetch page: {0}")]
    Fetch(#[from] SourceError),

    /// Initial page data is inconsistent
    #[error("invalid listing state: page {page} of {total_pages}")]
    InvalidState { page: u32, total_pages: u32 },
}

impl ListingError {
    /// Outcomes that simply leave the reader on the current page
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            ListingError::EmptyPage { .. }
                | ListingError::OutOfRange { .. }
                | ListingError::Unavailable { .. }
        )
    }
}

/// Clears the in-flight flag on every exit path, including cancellation
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the visible page of posts and moves between pages
pub struct ListingController {
    source: Arc<dyn ContentSource>,
    language: String,
    state: Mutex<ListingPageState>,
    in_flight: AtomicBool,
}

impl ListingController {
    /// Start from data the host page already loaded
    pub fn initialize(
        source: Arc<dyn ContentSource>,
        language: &str,
        items: Vec<ContentSummary>,
        page: u32,
        total_pages: u32,
    ) -> Result<Self, ListingError> {
        let state = ListingPageState::new(items, page, total_pages)?;
        Ok(Self {
            source,
            language: language.to_string(),
            state: Mutex::new(state),
            in_flight: AtomicBool::new(false),
        })
    }

    /// Fetch the first page and start from it
    pub async fn preload(source: Arc<dyn ContentSource>, language: &str) -> Result<Self, ListingError> {
        let page = source.fetch_content_page(1).await?;
        let items = map_items(&page.items, language);
        tracing::debug!("Preloaded {} posts, {} pages", items.len(), page.total_pages);
        Self::initialize(source, language, items, 1, page.total_pages.max(1))
    }

    /// Snapshot of the current listing
    pub fn state(&self) -> ListingPageState {
        self.lock_state().clone()
    }

    pub fn affordances(&self) -> Affordances {
        self.lock_state().affordances()
    }

    /// Whether a navigation is currently fetching
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Replace the listing with `page`
    ///
    /// On any error the listing is left exactly as it was.
    pub async fn navigate_to(&self, page: u32) -> Result<ListingPageState, ListingError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(ListingError::Busy)?;

        let total_pages = self.lock_state().total_pages;
        if page == 0 || page > total_pages {
            return Err(ListingError::OutOfRange { page, total_pages });
        }

        tracing::debug!("Loading listing page {}", page);
        let fetched = match self.source.fetch_content_page(page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Failed to load listing page {}: {}", page, e);
                return Err(e.into());
            }
        };

        if fetched.items.is_empty() {
            tracing::debug!("Listing page {} is empty, staying put", page);
            return Err(ListingError::EmptyPage { page });
        }

        let items = map_items(&fetched.items, &self.language);
        let mut state = self.lock_state();
        state.items = items;
        state.current_page = page;
        Ok(state.clone())
    }

    /// Use one of the pager controls
    pub async fn go(&self, control: Control) -> Result<ListingPageState, ListingError> {
        let target = self
            .affordances()
            .target(control)
            .ok_or(ListingError::Unavailable { control })?;
        self.navigate_to(target).await
    }

    pub async fn first(&self) -> Result<ListingPageState, ListingError> {
        self.go(Control::First).await
    }

    pub async fn previous(&self) -> Result<ListingPageState, ListingError> {
        self.go(Control::Previous).await
    }

    pub async fn next(&self) -> Result<ListingPageState, ListingError> {
        self.go(Control::Next).await
    }

    pub async fn last(&self) -> Result<ListingPageState, ListingError> {
        self.go(Control::Last).await
    }

    fn lock_state(&self) -> MutexGuard<'_, ListingPageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn map_items(docs: &[crate::content::RawDocument], language: &str) -> Vec<ContentSummary> {
    docs.iter()
        .map(|doc| ContentSummary::from_document(doc, language))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post_doc, StaticSource};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn summaries(slugs: &[&str]) -> Vec<ContentSummary> {
        slugs
            .iter()
            .map(|slug| ContentSummary::from_document(&post_doc(slug, slug), "pt-BR"))
            .collect()
    }

    fn controller(source: Arc<StaticSource>, page: u32) -> ListingController {
        ListingController::initialize(source, "pt-BR", summaries(&["a", "b", "c"]), page, 5).unwrap()
    }

    #[test]
    fn test_initialize_rejects_inconsistent_pages() {
        let source = Arc::new(StaticSource::new(5));
        for (page, total) in [(0, 5), (6, 5), (1, 0)] {
            let result = ListingController::initialize(source.clone(), "en", Vec::new(), page, total);
            assert!(matches!(result, Err(ListingError::InvalidState { .. })));
        }
    }

    #[tokio::test]
    async fn test_navigate_replaces_items_and_keeps_total() {
        let source = Arc::new(StaticSource::new(7).with_page(3, &["d", "e"]));
        let listing = controller(source.clone(), 2);

        let state = listing.navigate_to(3).await.unwrap();

        assert_eq!(state, ListingPageState::new(summaries(&["d", "e"]), 3, 5).unwrap());
        assert_eq!(listing.state(), state);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_leaves_state() {
        let source = Arc::new(StaticSource::new(5));
        let listing = controller(source.clone(), 2);
        let before = listing.state();

        let err = listing.navigate_to(4).await.unwrap_err();

        assert!(matches!(err, ListingError::EmptyPage { page: 4 }));
        assert!(err.is_ignorable());
        assert_eq!(listing.state(), before);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_is_rejected_without_fetch() {
        let source = Arc::new(StaticSource::new(5));
        let listing = controller(source.clone(), 2);
        let before = listing.state();

        for page in [0, 9] {
            let err = listing.navigate_to(page).await.unwrap_err();
            assert!(matches!(err, ListingError::OutOfRange { total_pages: 5, .. }));
        }

        assert_eq!(listing.state(), before);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_distinct_and_leaves_state() {
        let source = Arc::new(StaticSource::new(5).with_page(3, &["d"]));
        source.set_failing(true);
        let listing = controller(source.clone(), 2);
        let before = listing.state();

        let err = listing.navigate_to(3).await.unwrap_err();

        assert!(matches!(err, ListingError::Fetch(SourceError::Network(_))));
        assert!(!err.is_ignorable());
        assert_eq!(listing.state(), before);
        assert!(!listing.is_fetching());

        source.set_failing(false);
        assert_eq!(listing.navigate_to(3).await.unwrap().current_page, 3);
    }

    #[tokio::test]
    async fn test_previous_controls_unavailable_on_first_page() {
        let source = Arc::new(StaticSource::new(5));
        let listing = controller(source.clone(), 1);

        assert!(matches!(
            listing.previous().await,
            Err(ListingError::Unavailable { control: Control::Previous })
        ));
        assert!(matches!(
            listing.first().await,
            Err(ListingError::Unavailable { control: Control::First })
        ));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_next_controls_unavailable_on_last_page() {
        let source = Arc::new(StaticSource::new(5));
        let listing = controller(source.clone(), 5);

        assert!(matches!(
            listing.next().await,
            Err(ListingError::Unavailable { control: Control::Next })
        ));
        assert!(matches!(
            listing.last().await,
            Err(ListingError::Unavailable { control: Control::Last })
        ));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_controls_compute_targets() {
        let source = Arc::new(
            StaticSource::new(5)
                .with_page(1, &["p1"])
                .with_page(2, &["p2"])
                .with_page(3, &["p3"])
                .with_page(5, &["p5"]),
        );
        let listing = controller(source, 2);

        assert_eq!(listing.next().await.unwrap().current_page, 3);
        assert_eq!(listing.last().await.unwrap().current_page, 5);
        assert_eq!(listing.first().await.unwrap().current_page, 1);
        assert_eq!(listing.next().await.unwrap().current_page, 2);
        assert_eq!(listing.previous().await.unwrap().current_page, 1);
    }

    #[tokio::test]
    async fn test_preload_starts_on_first_page() {
        let source = Arc::new(StaticSource::new(4).with_page(1, &["x", "y", "z"]));
        let listing = ListingController::preload(source, "en").await.unwrap();

        let state = listing.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 4);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[0].updated_at, "May 14, 2023");
    }

    /// Source whose listing fetch waits until released
    struct GatedSource {
        inner: StaticSource,
        gate: Notify,
    }

    #[async_trait]
    impl ContentSource for GatedSource {
        async fn fetch_content_page(&self, page: u32) -> Result<crate::source::ContentPage, SourceError> {
            self.gate.notified().await;
            self.inner.fetch_content_page(page).await
        }

        async fn fetch_by_uid(
            &self,
            doc_type: &str,
            uid: &str,
        ) -> Result<Option<crate::content::RawDocument>, SourceError> {
            self.inner.fetch_by_uid(doc_type, uid).await
        }

        async fn fetch_single(&self, doc_type: &str) -> Result<Option<crate::content::RawDocument>, SourceError> {
            self.inner.fetch_single(doc_type).await
        }
    }

    #[tokio::test]
    async fn test_overlapping_navigation_is_busy() {
        let source = Arc::new(GatedSource {
            inner: StaticSource::new(5).with_page(3, &["d"]).with_page(4, &["e"]),
            gate: Notify::new(),
        });
        let listing =
            ListingController::initialize(source.clone(), "en", summaries(&["a"]), 2, 5).unwrap();

        let (first, second) = tokio::join!(listing.navigate_to(3), async {
            tokio::task::yield_now().await;
            assert!(listing.is_fetching());
            let result = listing.navigate_to(4).await;
            source.gate.notify_one();
            result
        });

        assert_eq!(first.unwrap().current_page, 3);
        assert!(matches!(second, Err(ListingError::Busy)));
        assert_eq!(source.inner.calls(), 1);
        assert!(!listing.is_fetching());

        source.gate.notify_one();
        assert_eq!(listing.navigate_to(4).await.unwrap().current_page, 4);
    }
}
