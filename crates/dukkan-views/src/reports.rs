//! # Reports Screen
//!
//! Profit-and-loss summary, one payload for the whole screen. The same
//! mutations that move the dashboard move these figures, so the screen
//! listens on [`Scope::Reports`] and keeps showing the last numbers
//! while they are stale.

use std::sync::{Arc, Weak};

use dukkan_api::{ApiGateway, ReportsApi};
use dukkan_core::types::ReportData;
use tokio::sync::broadcast;

use crate::cache::QueryCache;
use crate::invalidation::{InvalidationBus, Scope};
use crate::notify::Notifier;
use crate::store::{Store, Subscription};

/// What the reports widgets render.
#[derive(Debug, Clone, Default)]
pub struct ReportsState {
    /// Last payload received. `None` only before the first fetch.
    pub data: Option<ReportData>,
    pub loading: bool,
    pub stale: bool,
}

struct ReportsInner {
    store: Store<ReportsState>,
    cache: QueryCache<(), ReportData>,
    api: ReportsApi,
    notifier: Notifier,
}

/// Observable reports view-model.
pub struct ReportsScreen {
    inner: Arc<ReportsInner>,
}

impl Clone for ReportsScreen {
    fn clone(&self) -> Self {
        ReportsScreen {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ReportsScreen {
    /// Must be called from within a Tokio runtime.
    pub fn new(gateway: ApiGateway, invalidations: &InvalidationBus, notifier: Notifier) -> Self {
        let inner = Arc::new(ReportsInner {
            store: Store::new(ReportsState::default()),
            cache: QueryCache::new(),
            api: ReportsApi::new(gateway),
            notifier,
        });
        tokio::spawn(watch_reports(
            Arc::downgrade(&inner),
            invalidations.subscribe(),
        ));
        ReportsScreen { inner }
    }

    pub fn state(&self) -> ReportsState {
        self.inner.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&ReportsState) + Send + Sync + 'static,
    ) -> Subscription<ReportsState> {
        self.inner.store.subscribe(listener)
    }

    /// Fetches the report summary through the cache.
    ///
    /// On failure the figures already on screen stay.
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

/// Background task marking the report stale on its scope.
async fn watch_reports(inner: Weak<ReportsInner>, mut rx: broadcast::Receiver<Scope>) {
    loop {
        let hit = match rx.recv().await {
            Ok(scope) => scope == Scope::Reports,
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
    use axum::extract::State;
    use axum::routing::get;
    use axum::{Json, Router};
    use dukkan_api::{ClientConfig, CredentialStore};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    async fn summary(State(hits): State<Arc<AtomicU32>>) -> Json<serde_json::Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(serde_json::json!({
            "isSuccess": true,
            "message": "Report summary retrieved successfully.",
            "data": {
                "totalRevenue": 1500.0,
                "totalProfit": 560.0,
                "totalExpenses": 240.0,
                "netProfit": 320.0,
                "profitMargin": 21.33,
            },
            "errors": [],
        }))
    }

    async fn fixture() -> (ReportsScreen, InvalidationBus, Arc<AtomicU32>) {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route("/api/reports/summary", get(summary))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut config = ClientConfig::default();
        config.api.url = format!("http://{addr}/api");
        let gateway = ApiGateway::new(&config, CredentialStore::in_memory()).unwrap();

        let invalidations = InvalidationBus::new();
        let screen = ReportsScreen::new(gateway, &invalidations, Notifier::new());
        (screen, invalidations, hits)
    }

    #[tokio::test]
    async fn test_repeated_refresh_reuses_the_summary() {
        let (screen, _invalidations, hits) = fixture().await;

        screen.refresh().await;
        screen.refresh().await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let data = screen.state().data.unwrap();
        assert!((data.total_revenue - 1500.0).abs() < 1e-9);
        assert!((data.profit_margin - 21.33).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_reports_scope_marks_stale_then_refetches() {
        let (screen, invalidations, hits) = fixture().await;

        screen.refresh().await;
        invalidations.publish(Scope::Reports);

        // Wait for the background listener.
        for _ in 0..50 {
            if screen.state().stale {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert!(screen.state().stale);
        assert!(screen.state().data.is_some());

        screen.refresh().await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(!screen.state().stale);
    }

    #[tokio::test]
    async fn test_dashboard_scope_leaves_report_fresh() {
        let (screen, invalidations, hits) = fixture().await;

        screen.refresh().await;
        invalidations.publish(Scope::Dashboard);
        tokio::task::yield_now().await;

        assert!(!screen.state().stale);
        screen.refresh().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
