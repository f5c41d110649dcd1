//! # API Gateway
//!
//! The single HTTP client wrapping the backend REST API.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Pipeline                                │
//! │                                                                         │
//! │   endpoint module (products, orders, ...)                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   build request ──► with_bearer ──► send ──► guard_session ──► decode  │
//! │   (URL + body)      (middleware 1)           (middleware 2)   envelope │
//! │                     attach token             any 401 clears            │
//! │                     if signed in             credentials and           │
//! │                                              emits Expired             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The gateway is constructed once and handed to whoever needs it; there is
//!   no global client hiding behind a module.
//! - Both middleware steps are plain functions. They compose in `execute` and
//!   nowhere else, so the whole pipeline is readable in one screen.
//! - One attempt per request. Failures surface immediately; the caller (or
//!   the operator) decides whether to try again.
//! - Decoding always goes through [`ApiEnvelope`]: a 200 with
//!   `isSuccess: false` is a rejection, and a non-2xx body that parses as an
//!   envelope keeps its server message instead of a bare status code.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use dukkan_core::types::ListQuery;
use dukkan_core::validation::validate_image_upload;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::envelope::{ApiEnvelope, Page};
use crate::error::{ApiError, ApiResult};
use crate::session::{SessionEvent, SessionWatch};

// =============================================================================
// Middleware
// =============================================================================

/// Request middleware: attaches the bearer token when one exists.
///
/// Unauthenticated calls (sign-in itself) go out untouched.
pub fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Response middleware: turns any 401 into a dead session.
///
/// Credentials are cleared and [`SessionEvent::Expired`] is emitted before
/// the error is returned, so every subscriber learns about the expiry even
/// if the caller swallows the `Err`.
pub async fn guard_session(
    status: StatusCode,
    credentials: &CredentialStore,
    session: &SessionWatch,
) -> ApiResult<()> {
    if status == StatusCode::UNAUTHORIZED {
        warn!("Server answered 401, clearing stored credentials");
        credentials.clear().await;
        session.emit(SessionEvent::Expired);
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}

// =============================================================================
// Image Upload
// =============================================================================

/// An image file attached to a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, kept for the `filename` form attribute.
    pub file_name: String,
    /// MIME type. Must be `image/*`.
    pub content_type: String,
    /// Raw file bytes. At most 5 MB.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageUpload {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Runs the client-side checks: name present, `image/*`, within 5 MB.
    pub fn validate(&self) -> ApiResult<()> {
        validate_image_upload(&self.file_name, &self.content_type, self.bytes.len())?;
        Ok(())
    }

    /// Converts into a multipart part. Callers validate first.
    pub(crate) fn into_part(self) -> ApiResult<Part> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// Typed HTTP gateway over the backend API.
///
/// Cheap to clone; clones share the connection pool, the credential store,
/// and the session event channel.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: Client,
    base_url: Url,
    credentials: CredentialStore,
    session: SessionWatch,
}

impl ApiGateway {
    /// Builds a gateway from validated configuration.
    pub fn new(config: &ClientConfig, credentials: CredentialStore) -> ApiResult<Self> {
        config.validate()?;

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(ApiGateway {
            http,
            base_url: config.base_url()?,
            credentials,
            session: SessionWatch::new(),
        })
    }

    /// The credential store backing this gateway.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// The session event channel.
    pub fn session(&self) -> &SessionWatch {
        &self.session
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// `Url::join` would drop the `/api` prefix for absolute paths, so the
    /// endpoint is appended textually instead.
    fn endpoint_url(&self, path: &str) -> ApiResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// Runs the full middleware pipeline around one request.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let token = self.credentials.token().await;
        let request = with_bearer(request, token.as_deref());

        let response = request.send().await?;
        guard_session(response.status(), &self.credentials, &self.session).await?;
        Ok(response)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// GET returning the envelope's `data`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(%path, "GET");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.get(url)).await?;
        self.decode(response, path).await
    }

    /// GET for a list endpoint, with the filter tuple as query parameters.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiResult<Page<T>> {
        debug!(%path, page = query.page_num, "GET (paged)");
        let mut url = self.endpoint_url(path)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());

        let response = self.execute(self.http.get(url)).await?;
        self.decode(response, path).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// POST with a JSON body, returning `(data, message)`.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<(T, String)> {
        debug!(%path, "POST");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.post(url).json(body)).await?;
        self.decode_parts(response, path).await
    }

    /// PATCH with a JSON body, returning `(data, message)`.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<(T, String)> {
        debug!(%path, "PATCH");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.patch(url).json(body)).await?;
        self.decode_parts(response, path).await
    }

    /// POST with a multipart body, returning `(data, message)`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<(T, String)> {
        debug!(%path, "POST (multipart)");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.post(url).multipart(form)).await?;
        self.decode_parts(response, path).await
    }

    /// PATCH with a multipart body, returning `(data, message)`.
    pub async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<(T, String)> {
        debug!(%path, "PATCH (multipart)");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.patch(url).multipart(form)).await?;
        self.decode_parts(response, path).await
    }

    // =========================================================================
    // Acknowledgement-only mutations
    // =========================================================================

    /// DELETE returning only the server message.
    pub async fn delete_message(&self, path: &str) -> ApiResult<String> {
        debug!(%path, "DELETE");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.delete(url)).await?;
        self.decode_message(response).await
    }

    /// PATCH without a body, returning only the server message.
    pub async fn patch_message(&self, path: &str) -> ApiResult<String> {
        debug!(%path, "PATCH");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.patch(url)).await?;
        self.decode_message(response).await
    }

    /// POST without a body, returning only the server message.
    pub async fn post_message(&self, path: &str) -> ApiResult<String> {
        debug!(%path, "POST");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.post(url)).await?;
        self.decode_message(response).await
    }

    /// POST with a JSON body, returning only the server message.
    pub async fn post_json_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        debug!(%path, "POST");
        let url = self.endpoint_url(path)?;
        let response = self.execute(self.http.post(url).json(body)).await?;
        self.decode_message(response).await
    }

    // =========================================================================
    // Envelope decoding
    // =========================================================================

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> ApiResult<T> {
        self.decode_parts(response, path).await.map(|(data, _)| data)
    }

    async fn decode_parts<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> ApiResult<(T, String)> {
        let status = response.status();

        if !status.is_success() {
            // A non-2xx body can still be a well-formed failure envelope
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<T>>(&body) {
                return envelope.into_parts(path);
            }
            return Err(ApiError::Http { status });
        }

        let envelope = response.json::<ApiEnvelope<T>>().await?;
        envelope.into_parts(path)
    }

    async fn decode_message(&self, response: reqwest::Response) -> ApiResult<String> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                return envelope.into_message();
            }
            return Err(ApiError::Http { status });
        }

        let envelope = response.json::<ApiEnvelope<serde_json::Value>>().await?;
        envelope.into_message()
    }
}
