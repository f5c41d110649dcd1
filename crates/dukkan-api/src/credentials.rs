//! # Credential Store
//!
//! Persists the signed-in user and bearer token across launches.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Credential Lifecycle                              │
//! │                                                                         │
//! │  sign-in ──► Session { token, user, expires_at = now + 7 days }        │
//! │                 │                                                       │
//! │                 ├──► in-memory cache (RwLock, read on every request)   │
//! │                 └──► session.toml in the platform config dir           │
//! │                                                                         │
//! │  every request ──► token() - returns None once expires_at has passed   │
//! │                                                                         │
//! │  401 from server ──► clear() - cache wiped AND file deleted            │
//! │  sign-out        ──► clear()                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The 7-day lifetime matches the backend token lifetime; an on-disk session
//! older than that is discarded on load rather than sent to the server.

use chrono::{DateTime, Duration, Utc};
use dukkan_core::User;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// How long a stored session stays valid (days).
pub const SESSION_TTL_DAYS: i64 = 7;

// =============================================================================
// Session
// =============================================================================

/// A signed-in session as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent on every authenticated request.
    pub token: String,

    /// The signed-in user as returned by the sign-in endpoint.
    pub user: User,

    /// When this session stops being usable.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a fresh session from a sign-in response.
    pub fn from_user(user: User) -> Self {
        Session {
            token: user.token.clone(),
            user,
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Returns true once the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Remaining validity in whole seconds (0 when expired).
    pub fn remaining_secs(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

// =============================================================================
// Credential Store
// =============================================================================

/// Thread-safe store for the current session.
///
/// Cheap to clone; all clones share the same cache and file path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Current session (if signed in).
    session: Arc<RwLock<Option<Session>>>,
    /// Where the session file lives. `None` keeps everything in memory.
    path: Option<PathBuf>,
}

impl CredentialStore {
    /// Creates a store backed by the platform config directory.
    pub fn new() -> Self {
        CredentialStore {
            session: Arc::new(RwLock::new(None)),
            path: Self::default_session_path(),
        }
    }

    /// Creates a store backed by an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        CredentialStore {
            session: Arc::new(RwLock::new(None)),
            path: Some(path),
        }
    }

    /// Creates a store that never touches disk.
    pub fn in_memory() -> Self {
        CredentialStore {
            session: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Loads a previously saved session from disk, if any.
    ///
    /// An expired file is deleted rather than loaded; the operator signs in
    /// again instead of sending a token the server will reject.
    pub async fn load(&self) -> ApiResult<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if !path.exists() {
            debug!(?path, "No stored session");
            return Ok(());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApiError::CredentialLoadFailed(e.to_string()))?;
        let session: Session =
            toml::from_str(&contents).map_err(|e| ApiError::CredentialLoadFailed(e.to_string()))?;

        if session.is_expired() {
            info!("Stored session has expired, discarding");
            let _ = std::fs::remove_file(path);
            return Ok(());
        }

        debug!(
            email = %session.user.email,
            remaining_secs = session.remaining_secs(),
            "Restored session from disk"
        );
        *self.session.write().await = Some(session);
        Ok(())
    }

    /// Stores a fresh session for the given user and persists it.
    pub async fn store(&self, user: User) -> ApiResult<Session> {
        let session = Session::from_user(user);

        if let Some(path) = self.path.as_ref() {
            self.persist(path, &session)?;
        }

        info!(email = %session.user.email, "Session stored");
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Returns the bearer token if a non-expired session exists.
    pub async fn token(&self) -> Option<String> {
        let guard = self.session.read().await;
        match guard.as_ref() {
            Some(session) if !session.is_expired() => Some(session.token.clone()),
            _ => None,
        }
    }

    /// Returns the signed-in user if a non-expired session exists.
    pub async fn current_user(&self) -> Option<User> {
        let guard = self.session.read().await;
        match guard.as_ref() {
            Some(session) if !session.is_expired() => Some(session.user.clone()),
            _ => None,
        }
    }

    /// Returns true if a usable session exists.
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    /// Wipes the session from memory and disk.
    ///
    /// Called on sign-out and unconditionally on any 401 answer.
    pub async fn clear(&self) {
        *self.session.write().await = None;

        if let Some(path) = self.path.as_ref() {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(?path, "Failed to delete session file: {}", e);
                }
            }
        }

        info!("Session cleared");
    }

    /// Writes the session file, creating parent directories as needed.
    fn persist(&self, path: &PathBuf, session: &Session) -> ApiResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(session)
            .map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;

        debug!(?path, "Session file written");
        Ok(())
    }

    /// Returns the default session file path.
    fn default_session_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dukkan", "dashboard")
            .map(|dirs| dirs.config_dir().join("session.toml"))
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
