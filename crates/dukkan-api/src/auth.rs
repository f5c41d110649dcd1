//! # Authentication Endpoints
//!
//! Sign-in, registration, and the password-reset flow. This module is the
//! only writer of the credential store; everything else just reads the
//! token through the gateway.
//!
//! ## Session Lifecycle
//!
//! ```text
//! ┌──────────────┐  POST /Auth/login   ┌──────────────┐
//! │ login screen │ ──────────────────► │   backend    │
//! │              │ ◄────────────────── │              │
//! └──────┬───────┘  User (with token)  └──────────────┘
//!        │
//!        │ store(user)                 emit(SignedIn)
//!        ▼                                   ▼
//! ┌─────────────────┐              ┌──────────────────┐
//! │ CredentialStore │              │   SessionWatch   │
//! │ (7-day expiry)  │              │ (UI subscribers) │
//! └─────────────────┘              └──────────────────┘
//!
//! Registration follows the same path: a successful register signs the
//! user straight in. Sign-out is best-effort on the wire but always
//! clears the local session.
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use dukkan_core::types::User;
use dukkan_core::validation::{validate_email, validate_name, validate_password};
use dukkan_core::ValidationError;

use crate::client::ApiGateway;
use crate::error::ApiResult;
use crate::session::SessionEvent;

// ============================================================================
// Form Inputs
// ============================================================================

/// Fields from the registration form.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// Fields from the reset-password form, including the emailed OTP code.
#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub email: String,
    pub otp_code: String,
    pub new_password: String,
}

// ============================================================================
// Wire Payloads
// ============================================================================

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    phone_number: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordPayload<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordPayload<'a> {
    email: &'a str,
    otp_code: &'a str,
    new_password: &'a str,
}

// ============================================================================
// Endpoint Wrapper
// ============================================================================

/// Typed access to the `/Auth` controller.
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: ApiGateway,
}

impl AuthApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Signs in and persists the session.
    ///
    /// On success the returned token is stored with a 7-day expiry and
    /// `SignedIn` is broadcast, so the gateway starts attaching the
    /// bearer header immediately.
    ///
    /// ## Returns
    /// The authenticated user and the server message for the toast.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(User, String)> {
        let email = validate_email(email)?;
        debug!(%email, "Signing in");

        let payload = LoginPayload {
            email: &email,
            password,
        };
        let (user, message): (User, String) =
            self.gateway.post_json("/Auth/login", &payload).await?;

        self.gateway.credentials().store(user.clone()).await?;
        self.gateway.session().emit(SessionEvent::SignedIn);
        info!(user = %user.name, "Signed in");

        Ok((user, message))
    }

    /// Creates an account and signs the new user straight in.
    pub async fn register(&self, input: &RegisterInput) -> ApiResult<(User, String)> {
        validate_name(&input.name)?;
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;
        if input.phone_number.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "phoneNumber".to_string(),
            }
            .into());
        }
        debug!(%email, "Registering account");

        let payload = RegisterPayload {
            name: input.name.trim(),
            email: &email,
            password: &input.password,
            phone_number: input.phone_number.trim(),
        };
        let (user, message): (User, String) =
            self.gateway.post_json("/Auth/register", &payload).await?;

        self.gateway.credentials().store(user.clone()).await?;
        self.gateway.session().emit(SessionEvent::SignedIn);
        info!(user = %user.name, "Account created");

        Ok((user, message))
    }

    /// Asks the server to email a reset code.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let email = validate_email(email)?;
        debug!(%email, "Requesting password reset");

        let payload = ForgotPasswordPayload { email: &email };
        self.gateway
            .post_json_message("/Auth/forgot-password", &payload)
            .await
    }

    /// Exchanges the emailed OTP code for a new password.
    pub async fn reset_password(&self, input: &ResetPasswordInput) -> ApiResult<String> {
        let email = validate_email(&input.email)?;
        validate_password(&input.new_password)?;
        if input.otp_code.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "otpCode".to_string(),
            }
            .into());
        }
        debug!(%email, "Resetting password");

        let payload = ResetPasswordPayload {
            email: &email,
            otp_code: input.otp_code.trim(),
            new_password: &input.new_password,
        };
        self.gateway
            .post_json_message("/Auth/reset-password", &payload)
            .await
    }

    /// Signs out.
    ///
    /// The server call is best-effort: stored credentials are wiped and
    /// `SignedOut` is broadcast even when the request fails, so the UI
    /// can always return to the login screen.
    pub async fn logout(&self) {
        if let Err(error) = self.gateway.post_message("/Auth/logout").await {
            warn!(%error, "Logout request failed, clearing the local session anyway");
        }

        self.gateway.credentials().clear().await;
        self.gateway.session().emit(SessionEvent::SignedOut);
        info!("Signed out");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::credentials::CredentialStore;
    use crate::error::ApiError;
    use axum::extract::State;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    async fn spawn_fixture(router: Router) -> ApiGateway {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut config = ClientConfig::default();
        config.api.url = format!("http://{addr}/api");
        ApiGateway::new(&config, CredentialStore::in_memory()).unwrap()
    }

    fn user_envelope(message: &str) -> serde_json::Value {
        serde_json::json!({
            "isSuccess": true,
            "message": message,
            "data": {
                "userId": "u-1",
                "email": "owner@dukkan.app",
                "name": "Ahmed",
                "token": "tok-1",
                "roles": ["Owner"],
            },
            "errors": [],
        })
    }

    #[tokio::test]
    async fn test_login_persists_session_and_emits_signed_in() {
        async fn login() -> Json<serde_json::Value> {
            Json(user_envelope("Login successful."))
        }

        let router = Router::new().route("/api/Auth/login", post(login));
        let gateway = spawn_fixture(router).await;
        let mut events = gateway.session().subscribe();

        let api = AuthApi::new(gateway.clone());
        let (user, message) = api.login("owner@dukkan.app", "secret1").await.unwrap();

        assert_eq!(user.name, "Ahmed");
        assert_eq!(message, "Login successful.");
        assert!(gateway.credentials().is_authenticated().await);
        assert_eq!(gateway.credentials().token().await.as_deref(), Some("tok-1"));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedIn);
    }

    #[tokio::test]
    async fn test_rejected_login_stores_nothing() {
        async fn login() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "isSuccess": false,
                "message": "Invalid email or password",
                "data": null,
                "errors": ["Invalid email or password"],
            }))
        }

        let router = Router::new().route("/api/Auth/login", post(login));
        let gateway = spawn_fixture(router).await;

        let api = AuthApi::new(gateway.clone());
        let error = api.login("owner@dukkan.app", "wrong!").await.unwrap_err();

        assert!(error.is_rejection());
        assert_eq!(
            error.user_message(),
            "البريد الإلكتروني أو كلمة المرور غير صحيحة"
        );
        assert!(!gateway.credentials().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_sends_camel_case_payload() {
        type Captured = Arc<Mutex<Option<String>>>;

        async fn register(
            State(captured): State<Captured>,
            body: String,
        ) -> Json<serde_json::Value> {
            *captured.lock().await = Some(body);
            Json(user_envelope("Account created successfully."))
        }

        let captured: Captured = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route("/api/Auth/register", post(register))
            .with_state(captured.clone());
        let gateway = spawn_fixture(router).await;

        let api = AuthApi::new(gateway.clone());
        let input = RegisterInput {
            name: "Ahmed".to_string(),
            email: "owner@dukkan.app".to_string(),
            password: "secret1".to_string(),
            phone_number: "01001234567".to_string(),
        };
        api.register(&input).await.unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&captured.lock().await.clone().unwrap()).unwrap();
        assert_eq!(body["phoneNumber"], "01001234567");
        assert_eq!(body["email"], "owner@dukkan.app");
        assert!(body.get("phone_number").is_none());

        // Registration signs the user in
        assert!(gateway.credentials().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_server_fails() {
        // No /Auth/logout route: the fixture answers 404 with a plain body
        let router = Router::new();
        let gateway = spawn_fixture(router).await;

        gateway
            .credentials()
            .store(User {
                user_id: "u-1".to_string(),
                email: "owner@dukkan.app".to_string(),
                name: "Ahmed".to_string(),
                token: "tok-1".to_string(),
                roles: vec![],
            })
            .await
            .unwrap();
        let mut events = gateway.session().subscribe();

        let api = AuthApi::new(gateway.clone());
        api.logout().await;

        assert!(!gateway.credentials().is_authenticated().await);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_login_validates_email_before_any_request() {
        let gateway = ApiGateway::new(&ClientConfig::default(), CredentialStore::in_memory())
            .unwrap();
        let api = AuthApi::new(gateway);

        let error = api.login("not an email", "secret1").await.unwrap_err();
        assert!(matches!(error, ApiError::Validation(_)));
    }
}
