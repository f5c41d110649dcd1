//! # Dashboard Screen
//!
//! Headline metrics and the financial summary, one payload for the whole
//! screen. Almost every mutation in the app moves these figures, so the
//! screen listens on [`Scope::Dashboard`] and keeps showing the last
//! numbers while they are stale.

use std::sync::{Arc, Weak};

use dukkan_api::{ApiGateway, DashboardApi};
use dukkan_core::types::DashboardData;
use tokio::sync::broadcast;

use crate::cache::QueryCache;
use crate::invalidation::{InvalidationBus, Scope};
use crate::notify::Notifier;
use crate::store::{Store, Subscription};

/// What the dashboard widgets render.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last payload received. `None` only before the first fetch.
    pub data: Option<DashboardData>,
    pub loading: bool,
    pub stale: bool,
}

struct DashboardInner {
    store: Store<DashboardState>,
    cache: QueryCache<(), DashboardData>,
    api: DashboardApi,
    notifier: Notifier,
}

/// Observable dashboard view-model.
pub struct DashboardScreen {
    inner: Arc<DashboardInner>,
}

impl Clone for DashboardScreen {
    fn clone(&self) -> Self {
        DashboardScreen {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl DashboardScreen {
    /// Must be called from within a Tokio runtime.
    pub fn new(gateway: ApiGateway, invalidations: &InvalidationBus, notifier: Notifier) -> Self {
        let inner = Arc::new(DashboardInner {
            store: Store::new(DashboardState::default()),
            cache: QueryCache::new(),
            api: DashboardApi::new(gateway),
            notifier,
        });
        tokio::spawn(watch_dashboard(
            Arc::downgrade(&inner),
            invalidations.subscribe(),
        ));
        DashboardScreen { inner }
    }

    pub fn state(&self) -> DashboardState {
        self.inner.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&DashboardState) + Send + Sync + 'static,
    ) -> Subscription<DashboardState> {
        self.inner.store.subscribe(listener)
    }

    /// Fetches the dashboard payload through the cache.
    ///
    /// On failure the numbers already on screen stay.
    pub async fn refresh(&self) {
        self.inner.store.update(|s| s.loading = true);

        let api = self.inner.api.clone();
        let result = self
            .inner
            .cache
            .fetch((), move || async move { api.get().await })
            .await;

        match result {
            Ok(data) => {
                self.inner.store.update(|s| {
                    s.data = Some(data);
                    s.stale = false;
                    s.loading = false;
                });
            }
            Err(error) => {
                self.inner.store.update(|s| s.loading = false);
                self.inner.notifier.error(error.user_message());
            }
        }
    }
}

/// Background task marking the dashboard stale on its scope.
async fn watch_dashboard(inner: Weak<DashboardInner>, mut rx: broadcast::Receiver<Scope>) {
    loop {
        let hit = match rx.recv().await {
            Ok(scope) => scope == Scope::Dashboard,
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
