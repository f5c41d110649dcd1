//! Store profile settings screen. Name, contact details and the logo;
//! the owner email is read-only and only ever displayed.

use std::sync::{Arc, Weak};

use dukkan_api::{ApiGateway, ImageUpload, ProfileApi, ProfileInput};
use dukkan_core::i18n::translate;
use dukkan_core::types::StoreProfile;
use tokio::sync::broadcast;

use crate::cache::QueryCache;
use crate::invalidation::{InvalidationBus, Scope};
use crate::notify::Notifier;
use crate::store::{Store, Subscription};

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: Option<StoreProfile>,
    pub loading: bool,
    /// An update is in flight; the save button disables itself.
    pub busy: bool,
    pub stale: bool,
}

struct ProfileInner {
    store: Store<ProfileState>,
    cache: QueryCache<(), StoreProfile>,
    api: ProfileApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

/// Observable profile view-model.
pub struct ProfileView {
    inner: Arc<ProfileInner>,
}

impl Clone for ProfileView {
    fn clone(&self) -> Self {
        ProfileView {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ProfileView {
    /// Must be called from within a Tokio runtime.
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let events = invalidations.subscribe();
        let inner = Arc::new(ProfileInner {
            store: Store::new(ProfileState::default()),
            cache: QueryCache::new(),
            api: ProfileApi::new(gateway),
            invalidations,
            notifier,
        });
        tokio::spawn(watch_profile(Arc::downgrade(&inner), events));
        ProfileView { inner }
    }

    pub fn state(&self) -> ProfileState {
        self.inner.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&ProfileState) + Send + Sync + 'static,
    ) -> Subscription<ProfileState> {
        self.inner.store.subscribe(listener)
    }

    /// Fetches the profile through the cache. A failure keeps the
    /// profile already on screen.
    pub async fn refresh(&self) {
        self.inner.store.update(|s| s.loading = true);

        let api = self.inner.api.clone();
        let result = self
            .inner
            .cache
            .fetch((), move || async move { api.get().await })
            .await;

        match result {
            Ok(profile) => {
                self.inner.store.update(|s| {
                    s.profile = Some(profile);
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

    /// Saves the profile, optionally replacing the logo, then refetches
    /// so the header shows the new identity.
    pub async fn update(&self, input: &ProfileInput, logo: Option<ImageUpload>) -> bool {
        self.inner.store.update(|s| s.busy = true);
        let result = self.inner.api.update(input, logo).await;
        self.inner.store.update(|s| s.busy = false);

        match result {
            Ok(message) => {
                self.inner.notifier.success(translate(&message));
                self.inner.cache.invalidate_all().await;
                self.inner.invalidations.publish(Scope::Profile);
                self.refresh().await;
                true
            }
            Err(error) => {
                self.inner.notifier.error(error.user_message());
                false
            }
        }
    }
}

/// Background task marking the profile stale on its scope.
async fn watch_profile(inner: Weak<ProfileInner>, mut rx: broadcast::Receiver<Scope>) {
    loop {
        let hit = match rx.recv().await {
            Ok(scope) => scope == Scope::Profile,
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
