//! # Session View
//!
//! Login, registration, the password flows and sign-out, plus the
//! app-wide reaction to session events. This is the only view-model the
//! shell needs before anything else renders: `restore` decides between
//! the login screen and the dashboard.
//!
//! ```text
//! login/register ──► AuthApi ──► credentials stored ──► user in state
//!
//! any 401 ──► SessionEvent::Expired ──► user cleared + expiry toast
//! logout  ──► SessionEvent::SignedOut ─► user cleared
//! ```

use std::sync::{Arc, Weak};

use dukkan_api::{ApiGateway, AuthApi, RegisterInput, ResetPasswordInput, SessionEvent};
use dukkan_core::i18n::{self, translate};
use dukkan_core::types::User;
use tokio::sync::broadcast;
use tracing::warn;

use crate::notify::Notifier;
use crate::store::{Store, Subscription};

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    /// An auth request is in flight; the form disables its submit button.
    pub busy: bool,
}

struct SessionInner {
    store: Store<SessionState>,
    auth: AuthApi,
    gateway: ApiGateway,
    notifier: Notifier,
}

/// Observable authentication view-model.
pub struct SessionView {
    inner: Arc<SessionInner>,
}

impl Clone for SessionView {
    fn clone(&self) -> Self {
        SessionView {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SessionView {
    /// Must be called from within a Tokio runtime.
    pub fn new(gateway: ApiGateway, notifier: Notifier) -> Self {
        let events = gateway.session().subscribe();
        let inner = Arc::new(SessionInner {
            store: Store::new(SessionState::default()),
            auth: AuthApi::new(gateway.clone()),
            gateway,
            notifier,
        });
        tokio::spawn(watch_session(Arc::downgrade(&inner), events));
        SessionView { inner }
    }

    pub fn state(&self) -> SessionState {
        self.inner.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> Subscription<SessionState> {
        self.inner.store.subscribe(listener)
    }

    /// Loads the persisted session, honoring its expiry.
    ///
    /// Returns whether someone is signed in.
    pub async fn restore(&self) -> bool {
        let credentials = self.inner.gateway.credentials();
        if let Err(error) = credentials.load().await {
            warn!(%error, "Stored session could not be loaded");
            return false;
        }
        let user = credentials.current_user().await;
        let authenticated = user.is_some();
        self.inner.store.update(|s| s.user = user);
        authenticated
    }

    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.inner.store.update(|s| s.busy = true);
        match self.inner.auth.login(email, password).await {
            Ok((user, message)) => {
                self.inner.store.update(|s| {
                    s.user = Some(user);
                    s.busy = false;
                });
                self.inner.notifier.success(translate(&message));
                true
            }
            Err(error) => {
                self.inner.store.update(|s| s.busy = false);
                self.inner.notifier.error(error.user_message());
                false
            }
        }
    }

    /// Registers a new store owner. The backend signs the account in
    /// right away, so a success lands on the dashboard.
    pub async fn register(&self, input: &RegisterInput) -> bool {
        self.inner.store.update(|s| s.busy = true);
        match self.inner.auth.register(input).await {
            Ok((user, message)) => {
                self.inner.store.update(|s| {
                    s.user = Some(user);
                    s.busy = false;
                });
                self.inner.notifier.success(translate(&message));
                true
            }
            Err(error) => {
                self.inner.store.update(|s| s.busy = false);
                self.inner.notifier.error(error.user_message());
                false
            }
        }
    }

    /// Requests a reset code. The answer is deliberately the same whether
    /// or not the email exists; it is toasted as received.
    pub async fn forgot_password(&self, email: &str) -> bool {
        self.inner.store.update(|s| s.busy = true);
        let result = self.inner.auth.forgot_password(email).await;
        self.inner.store.update(|s| s.busy = false);
        match result {
            Ok(message) => {
                self.inner.notifier.success(translate(&message));
                true
            }
            Err(error) => {
                self.inner.notifier.error(error.user_message());
                false
            }
        }
    }

    pub async fn reset_password(&self, input: &ResetPasswordInput) -> bool {
        self.inner.store.update(|s| s.busy = true);
        let result = self.inner.auth.reset_password(input).await;
        self.inner.store.update(|s| s.busy = false);
        match result {
            Ok(message) => {
                self.inner.notifier.success(translate(&message));
                true
            }
            Err(error) => {
                self.inner.notifier.error(error.user_message());
                false
            }
        }
    }

    /// Signs out. The server call is best effort; the local session is
    /// gone when this returns.
    pub async fn logout(&self) {
        self.inner.auth.logout().await;
        self.inner.store.update(|s| s.user = None);
        self.inner
            .notifier
            .success(translate("Logged out successfully."));
    }
}

/// Background task reacting to gateway session events.
async fn watch_session(inner: Weak<SessionInner>, mut rx: broadcast::Receiver<SessionEvent>) {
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        };
        let Some(inner) = inner.upgrade() else { break };
        match event {
            SessionEvent::Expired => {
                inner.store.update(|s| s.user = None);
                inner.notifier.error(i18n::SESSION_EXPIRED);
            }
            SessionEvent::SignedOut => {
                inner.store.update(|s| s.user = None);
            }
            // login/register put the user in state themselves.
            SessionEvent::SignedIn => {}
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
