//! # Store Profile Endpoints
//!
//! The store identity shown in the sidebar and on the settings screen.
//! The owner email is fixed at registration and never sent back; updates
//! go over multipart so a new logo can ride along, mirroring the product
//! form contract (`StoreName`, `Phone`, `Address`, `LogoUrl` file part).

use reqwest::multipart::Form;
use tracing::debug;

use dukkan_core::types::StoreProfile;
use dukkan_core::validation::validate_name;

use crate::client::{ApiGateway, ImageUpload};
use crate::error::ApiResult;

/// Editable profile fields. The owner email is read-only server-side.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub store_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.store_name)?;
        Ok(())
    }
}

/// Typed access to the `/User` profile endpoints.
#[derive(Debug, Clone)]
pub struct ProfileApi {
    gateway: ApiGateway,
}

impl ProfileApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches the current store profile.
    pub async fn get(&self) -> ApiResult<StoreProfile> {
        debug!("Fetching store profile");
        self.gateway.get_json("/User/profile").await
    }

    /// Updates the profile. A `None` logo keeps the stored one.
    ///
    /// The backend acknowledges updates with a boolean, so only the
    /// confirmation message comes back.
    pub async fn update(
        &self,
        input: &ProfileInput,
        logo: Option<ImageUpload>,
    ) -> ApiResult<String> {
        input.validate()?;
        debug!(store = %input.store_name, "Updating store profile");

        let mut form = Form::new().text("StoreName", input.store_name.trim().to_string());
        if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            form = form.text("Phone", phone.trim().to_string());
        }
        if let Some(address) = input.address.as_deref().filter(|a| !a.trim().is_empty()) {
            form = form.text("Address", address.trim().to_string());
        }
        if let Some(logo) = logo {
            logo.validate()?;
            form = form.part("LogoUrl", logo.into_part()?);
        }

        let (_, message): (bool, String) = self
            .gateway
            .patch_multipart("/User/updateprofile", form)
            .await?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::credentials::CredentialStore;
    use axum::extract::State;
    use axum::routing::patch;
    use axum::{Json, Router};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_update_sends_expected_parts() {
        type Captured = Arc<Mutex<Option<String>>>;

        async fn capture(
            State(captured): State<Captured>,
            body: axum::body::Bytes,
        ) -> Json<serde_json::Value> {
            *captured.lock().await = Some(String::from_utf8_lossy(&body).into_owned());
            Json(serde_json::json!({
                "isSuccess": true,
                "message": "Profile updated successfully.",
                "data": true,
                "errors": [],
            }))
        }

        let captured: Captured = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route("/api/User/updateprofile", patch(capture))
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let mut config = ClientConfig::default();
        config.api.url = format!("http://{addr}/api");
        let gateway = ApiGateway::new(&config, CredentialStore::in_memory()).unwrap();

        let api = ProfileApi::new(gateway);
        let input = ProfileInput {
            store_name: "دكان أحمد".to_string(),
            phone: Some("01001234567".to_string()),
            address: None,
        };
        let logo = ImageUpload::new("logo.png", "image/png", b"png".to_vec());
        let message = api.update(&input, Some(logo)).await.unwrap();
        assert_eq!(message, "Profile updated successfully.");

        let body = captured.lock().await.clone().unwrap();
        assert!(body.contains("name=\"StoreName\""));
        assert!(body.contains("name=\"Phone\""));
        assert!(body.contains("name=\"LogoUrl\""));
        // Blank optional fields stay off the wire
        assert!(!body.contains("name=\"Address\""));
    }

    #[test]
    fn test_blank_store_name_rejected() {
        let input = ProfileInput {
            store_name: " ".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
