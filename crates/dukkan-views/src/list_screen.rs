//! # Generic List Screen
//!
//! One [`ListScreen`] drives every paginated table in the dashboard. It
//! wires the pure [`ListState`] machine to a [`QueryCache`] and a fetcher,
//! so each entity module only supplies its endpoint call and its scope.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ListScreen<T>                            │
//! │                                                                 │
//! │  actions ──► ListState ──► ListQuery ──► QueryCache ──► fetcher │
//! │  (search,     (pure)        (tuple       (memoize,      (API)   │
//! │   filter,                    key)         coalesce,             │
//! │   page)                                   keep stale)           │
//! │                                  │                              │
//! │          Store<ListScreenState> ◄┘   InvalidationBus ──► stale  │
//! │          (items, loading, stale)     (background task)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Every action that changes the query triggers a refresh; rejected
//!    actions (bad search, out-of-range page) trigger nothing.
//! 2. A failed refresh keeps the rows already on screen and reports the
//!    error through the notifier.
//! 3. Hearing the screen's scope on the invalidation bus only marks data
//!    stale. The next refresh refetches; nothing refetches on its own.
//! 4. Results are dropped when the query changed while the fetch was in
//!    flight. The in-flight page belongs to a tuple nobody displays now.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use chrono::NaiveDate;
use dukkan_api::{ApiResult, Page};
use dukkan_core::i18n::localize_validation_error;
use dukkan_core::types::{FilterType, ListQuery};
use tokio::sync::broadcast;
use tracing::debug;

use crate::cache::QueryCache;
use crate::invalidation::{InvalidationBus, Scope};
use crate::list_state::ListState;
use crate::notify::Notifier;
use crate::store::{Store, Subscription};

// =============================================================================
// Fetcher Types
// =============================================================================

/// Boxed future returned by a page fetcher.
pub type PageFuture<T> = Pin<Box<dyn Future<Output = ApiResult<Page<T>>> + Send>>;

/// Shared closure that turns a [`ListQuery`] into one page of rows.
pub type PageFetcher<T> = Arc<dyn Fn(ListQuery) -> PageFuture<T> + Send + Sync>;

// =============================================================================
// Screen State
// =============================================================================

/// Everything a table widget needs to render one list screen.
#[derive(Debug, Clone)]
pub struct ListScreenState<T> {
    /// Pagination, search and filter machine. `list.search_input` is the
    /// text box; `list.search_term` is what the rows actually match.
    pub list: ListState,

    /// Rows of the page on screen.
    pub items: Vec<T>,

    /// A fetch for the current query is in flight.
    pub loading: bool,

    /// The rows on screen predate an invalidation.
    pub stale: bool,
}

impl<T> ListScreenState<T> {
    fn with_list(list: ListState) -> Self {
        ListScreenState {
            list,
            items: Vec::new(),
            loading: false,
            stale: false,
        }
    }
}

impl<T> Default for ListScreenState<T> {
    fn default() -> Self {
        ListScreenState::with_list(ListState::new())
    }
}

// =============================================================================
// List Screen
// =============================================================================

struct ScreenInner<T> {
    store: Store<ListScreenState<T>>,
    cache: QueryCache<ListQuery, Page<T>>,
    fetch: PageFetcher<T>,
    notifier: Notifier,
}

/// Observable list screen over one paginated endpoint.
///
/// Clones share state, cache and subscriptions.
pub struct ListScreen<T> {
    inner: Arc<ScreenInner<T>>,
}

impl<T> Clone for ListScreen<T> {
    fn clone(&self) -> Self {
        ListScreen {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ListScreen<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Builds a screen and spawns its invalidation listener.
    ///
    /// Must be called from within a Tokio runtime. The listener holds only
    /// a weak handle and exits once every clone of the screen is dropped.
    pub fn new<F, Fut>(
        fetch: F,
        initial: ListState,
        scope: Scope,
        invalidations: &InvalidationBus,
        notifier: Notifier,
    ) -> Self
    where
        F: Fn(ListQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Page<T>>> + Send + 'static,
    {
        let fetch: PageFetcher<T> = Arc::new(move |query| Box::pin(fetch(query)));
        let inner = Arc::new(ScreenInner {
            store: Store::new(ListScreenState::with_list(initial)),
            cache: QueryCache::new(),
            fetch,
            notifier,
        });
        tokio::spawn(watch_invalidations(
            Arc::downgrade(&inner),
            invalidations.subscribe(),
            scope,
        ));
        ListScreen { inner }
    }

    /// Snapshot of the current screen state.
    pub fn state(&self) -> ListScreenState<T> {
        self.inner.store.get_state()
    }

    /// Registers a listener called after every state change.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ListScreenState<T>) + Send + Sync + 'static,
    ) -> Subscription<ListScreenState<T>> {
        self.inner.store.subscribe(listener)
    }

    /// Fetches the page for the current query, through the cache.
    ///
    /// On success the rows and page info land in the state and the stale
    /// flag clears. On failure the rows on screen stay and the error goes
    /// to the notifier.
    pub async fn refresh(&self) {
        let query = self.inner.store.get_state().list.query();
        self.inner.store.update(|s| s.loading = true);

        let fetch = Arc::clone(&self.inner.fetch);
        let fetch_query = query.clone();
        let result = self
            .inner
            .cache
            .fetch(query.clone(), move || fetch(fetch_query))
            .await;

        match result {
            Ok(page) => {
                self.inner.store.update(|s| {
                    // The user may have moved on while this page was in
                    // flight; only the current tuple's answer lands.
                    if s.list.query() == query {
                        s.items = page.items;
                        s.list.record_page_info(page.total_pages, page.total_count);
                        s.stale = false;
                    }
                    s.loading = false;
                });
            }
            Err(error) => {
                debug!(%error, "List refresh failed");
                self.inner.store.update(|s| s.loading = false);
                self.inner.notifier.error(error.user_message());
            }
        }
    }

    /// Updates the search text box. Never touches the committed term.
    pub fn stage_search(&self, input: impl Into<String>) {
        let input = input.into();
        self.inner.store.update(|s| s.list.stage_search(input));
    }

    /// Commits the staged search and refetches page 1.
    ///
    /// Returns `false` without fetching when the input fails validation.
    pub async fn commit_search(&self) -> bool {
        match self.inner.store.try_update(|s| s.list.commit_search()) {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(error) => {
                self.inner.notifier.error(localize_validation_error(&error));
                false
            }
        }
    }

    /// Switches the date filter and refetches page 1.
    pub async fn set_filter(&self, filter: Option<FilterType>) {
        self.inner.store.update(|s| s.list.set_filter(filter));
        self.refresh().await;
    }

    /// Sets the custom date range. Refetches only when the range applied,
    /// which requires the `Custom` filter to be active.
    pub async fn set_custom_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let mut applied = false;
        self.inner.store.update(|s| {
            applied = s.list.set_custom_range(start, end);
        });
        if applied {
            self.refresh().await;
        }
        applied
    }

    /// Moves to `page`. Refetches only when the page is in range.
    pub async fn set_page(&self, page: u32) -> bool {
        let mut accepted = false;
        self.inner.store.update(|s| {
            accepted = s.list.set_page(page);
        });
        if accepted {
            self.refresh().await;
        }
        accepted
    }

    /// Marks every cached page stale and flags the screen.
    ///
    /// Called by the mutations of the owning entity module; remote scopes
    /// arrive through the invalidation bus instead.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate_all().await;
        self.inner.store.update(|s| s.stale = true);
    }
}

/// Background task marking the screen stale when its scope is published.
async fn watch_invalidations<T>(
    inner: Weak<ScreenInner<T>>,
    mut rx: broadcast::Receiver<Scope>,
    scope: Scope,
) where
    T: Clone + Send + Sync + 'static,
{
    loop {
        let hit = match rx.recv().await {
            Ok(published) => published == scope,
            // A lagged receiver may have dropped this scope; treat the
            // gap as an invalidation.
            Err(broadcast::error::RecvError::Lagged(_)) => true,
            Err(broadcast::error::RecvError::Closed) => break,
        };
        if !hit {
            continue;
        }
        let Some(inner) = inner.upgrade() else { break };
        inner.cache.invalidate_all().await;
        inner.store.update(|s| s.stale = true);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dukkan_api::ApiError;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    struct Fixture {
        screen: ListScreen<String>,
        calls: Arc<AtomicU32>,
        failing: Arc<AtomicBool>,
        bus: InvalidationBus,
        notices: tokio::sync::broadcast::Receiver<crate::notify::Notice>,
    }

    fn fixture() -> Fixture {
        let calls = Arc::new(AtomicU32::new(0));
        let failing = Arc::new(AtomicBool::new(false));
        let bus = InvalidationBus::new();
        let notifier = Notifier::new();
        let notices = notifier.subscribe();

        let fetch_calls = calls.clone();
        let fetch_failing = failing.clone();
        let screen = ListScreen::new(
            move |query: ListQuery| {
                let calls = fetch_calls.clone();
                let failing = fetch_failing.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if failing.load(Ordering::SeqCst) {
                        return Err(ApiError::MissingData {
                            endpoint: "/Product/getallproducts".into(),
                        });
                    }
                    Ok(Page {
                        items: vec![format!("row-p{}", query.page_num)],
                        current_page: query.page_num,
                        page_size: query.page_size,
                        total_pages: 3,
                        total_count: 120,
                    })
                }
            },
            ListState::new(),
            Scope::Products,
            &bus,
            notifier,
        );

        Fixture {
            screen,
            calls,
            failing,
            bus,
            notices,
        }
    }

    #[tokio::test]
    async fn test_repeated_refresh_hits_the_cache() {
        let f = fixture();

        f.screen.refresh().await;
        f.screen.refresh().await;

        assert_eq!(f.calls.load(Ordering::SeqCst), 1);
        let state = f.screen.state();
        assert_eq!(state.items, vec!["row-p1".to_string()]);
        assert_eq!(state.list.total_pages, 3);
        assert_eq!(state.list.total_count, 120);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_each_page_is_its_own_cache_entry() {
        let f = fixture();

        f.screen.refresh().await;
        assert!(f.screen.set_page(2).await);

        assert_eq!(f.calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.screen.state().items, vec!["row-p2".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_rows_and_reports() {
        let mut f = fixture();

        f.screen.refresh().await;
        f.screen.invalidate().await;
        f.failing.store(true, Ordering::SeqCst);
        f.screen.refresh().await;

        let state = f.screen.state();
        assert_eq!(state.items, vec!["row-p1".to_string()]);
        assert!(state.stale);
        assert!(!state.loading);

        let notice = f.notices.try_recv().unwrap();
        assert_eq!(notice.level, crate::notify::NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_rejected_page_fetches_nothing() {
        let f = fixture();

        assert!(!f.screen.set_page(9).await);
        assert!(!f.screen.set_page(0).await);

        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.screen.state().list.page, 1);
    }

    #[tokio::test]
    async fn test_rejected_search_fetches_nothing() {
        let f = fixture();

        f.screen.stage_search("x".repeat(101));
        assert!(!f.screen.commit_search().await);

        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.screen.state().list.search_term, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_published_scope_marks_stale_and_next_refresh_refetches() {
        let f = fixture();

        f.screen.refresh().await;
        assert_eq!(f.calls.load(Ordering::SeqCst), 1);

        f.bus.publish(Scope::Products);
        // Wait for the background listener to process the publication.
        for _ in 0..50 {
            if f.screen.state().stale {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(f.screen.state().stale);

        f.screen.refresh().await;
        assert_eq!(f.calls.load(Ordering::SeqCst), 2);
        assert!(!f.screen.state().stale);
    }

    #[tokio::test]
    async fn test_foreign_scope_leaves_screen_fresh() {
        let f = fixture();

        f.screen.refresh().await;
        f.bus.publish(Scope::Customers);
        tokio::task::yield_now().await;

        assert!(!f.screen.state().stale);
        f.screen.refresh().await;
        assert_eq!(f.calls.load(Ordering::SeqCst), 1);
    }
}
