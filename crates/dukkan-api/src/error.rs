//! # Gateway Error Types
//!
//! Error types for remote API operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gateway Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Session      │  │    Envelope     │  │      Transport          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unauthorized   │  │  Rejected       │  │  Transport (reqwest)    │ │
//! │  │                 │  │  MissingData    │  │  Http (bare status)     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Credentials   │  │      Validation         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidBaseUrl │  │  CredentialLoad │  │  Validation (from      │ │
//! │  │  InvalidConfig  │  │  CredentialSave │  │  dukkan-core checks)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## User-Facing Messages
//! Raw error text is for logs. Anything shown to the operator goes through
//! [`ApiError::user_message`], which maps each category onto the Arabic
//! strings in `dukkan_core::i18n`.

use dukkan_core::ValidationError;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway error type covering all possible remote API failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// The server answered 401. Credentials have already been cleared by the
    /// session guard before this variant is returned.
    #[error("Session rejected by server (401). Sign in again.")]
    Unauthorized,

    // =========================================================================
    // Envelope Errors
    // =========================================================================
    /// The server answered with `isSuccess: false`. The HTTP status may still
    /// have been 200; the envelope flag is authoritative.
    #[error("Request rejected by server: {message}")]
    Rejected {
        /// The envelope `message` field (English, translatable).
        message: String,
        /// The envelope `errors` list, usually field-level detail.
        errors: Vec<String>,
    },

    /// The envelope claimed success but carried no `data` payload.
    #[error("Server reported success for {endpoint} but sent no data")]
    MissingData { endpoint: String },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network-level failure: DNS, connect, timeout, or body decode.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status with a body that was not a recognizable envelope.
    #[error("HTTP error: {status}")]
    Http { status: reqwest::StatusCode },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Credential Storage Errors
    // =========================================================================
    /// Failed to read the stored session file.
    #[error("Failed to load credentials: {0}")]
    CredentialLoadFailed(String),

    /// Failed to write the session file.
    #[error("Failed to save credentials: {0}")]
    CredentialSaveFailed(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// A request was refused client-side before any bytes left the machine.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for UI handling)
// =============================================================================

impl ApiError {
    /// Returns true if this error means the session is gone and the operator
    /// must sign in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Returns true if the request never produced a usable server answer.
    ///
    /// Connection failures keep any cached data on screen; the views layer
    /// serves stale entries instead of blanking the page.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Returns true if the server itself rejected the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// Maps this error onto the Arabic string the operator should see.
    ///
    /// ## Mapping
    /// - `Rejected` runs the envelope message through the translation table;
    ///   unknown messages fall back to the raw English text
    /// - `Unauthorized` always reads as an expired session
    /// - `Transport` reads as a connection problem
    /// - `Validation` uses the per-field messages from `dukkan-core`
    /// - Everything else collapses to the generic unexpected-error string
    pub fn user_message(&self) -> String {
        use dukkan_core::i18n;

        match self {
            ApiError::Rejected { message, .. } => i18n::translate(message).to_string(),
            ApiError::Unauthorized => i18n::SESSION_EXPIRED.to_string(),
            ApiError::Transport(_) => i18n::CONNECTION_FAILED.to_string(),
            ApiError::Validation(err) => i18n::localize_validation_error(err),
            _ => i18n::UNEXPECTED_ERROR.to_string(),
        }
    }
}
