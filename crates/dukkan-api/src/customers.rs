//! # Customer Endpoints
//!
//! Remote operations for the customer book. Customers travel as plain JSON;
//! only `email` is dropped from the payload when empty, matching what the
//! backend validator expects.

use serde::Serialize;
use tracing::debug;

use dukkan_core::types::{Customer, ListQuery};
use dukkan_core::validation::{validate_email, validate_name};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

/// Fields the operator fills in when creating or editing a customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        if let Some(email) = self.email.as_deref() {
            if !email.trim().is_empty() {
                validate_email(email)?;
            }
        }
        Ok(())
    }

    /// Some(email) only when the operator actually typed one.
    fn cleaned_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Wire payload for add/update. `id` rides along only on update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
}

impl<'a> CustomerPayload<'a> {
    fn new(id: Option<&'a str>, input: &'a CustomerInput) -> Self {
        CustomerPayload {
            id,
            name: input.name.trim(),
            phone: input.phone.as_deref(),
            email: input.cleaned_email(),
            address: input.address.as_deref(),
        }
    }
}

/// Remote API for customers.
#[derive(Debug, Clone)]
pub struct CustomersApi {
    gateway: ApiGateway,
}

impl CustomersApi {
    pub fn new(gateway: ApiGateway) -> Self {
        CustomersApi { gateway }
    }

    /// Fetches one page of customers.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Customer>> {
        self.gateway
            .get_page("/Customer/getallcustomers", query)
            .await
    }

    /// Fetches a single customer by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Customer> {
        self.gateway.get_json(&format!("/Customer/{id}")).await
    }

    /// Creates a customer, returning it with the server message.
    pub async fn add(&self, input: &CustomerInput) -> ApiResult<(Customer, String)> {
        debug!(name = %input.name, "Adding customer");
        input.validate()?;
        self.gateway
            .post_json("/Customer/addcustomer", &CustomerPayload::new(None, input))
            .await
    }

    /// Updates a customer. The backend acknowledges with a boolean.
    pub async fn update(&self, id: &str, input: &CustomerInput) -> ApiResult<String> {
        debug!(%id, "Updating customer");
        input.validate()?;
        let (_, message): (bool, String) = self
            .gateway
            .patch_json(
                "/Customer/updatecustomer",
                &CustomerPayload::new(Some(id), input),
            )
            .await?;
        Ok(message)
    }

    /// Deletes a customer.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting customer");
        self.gateway.delete_message(&format!("/Customer/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> CustomerInput {
        CustomerInput {
            name: "أحمد محمود".into(),
            phone: Some("01001234567".into()),
            email: None,
            address: Some("القاهرة".into()),
        }
    }

    #[test]
    fn test_input_validation() {
        assert!(sample_input().validate().is_ok());

        let mut input = sample_input();
        input.name = "".into();
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.email = Some("not-an-email".into());
        assert!(input.validate().is_err());

        // Empty email string counts as "no email", not an invalid one
        let mut input = sample_input();
        input.email = Some("".into());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_add_payload_shape() {
        let input = sample_input();
        let value = serde_json::to_value(CustomerPayload::new(None, &input)).unwrap();

        assert_eq!(value["name"], "أحمد محمود");
        assert_eq!(value["phone"], "01001234567");
        assert_eq!(value["address"], "القاهرة");
        // Neither id nor the empty email appear on create
        assert!(value.get("id").is_none());
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_update_payload_carries_id() {
        let mut input = sample_input();
        input.email = Some("ahmed@example.com".into());
        let value = serde_json::to_value(CustomerPayload::new(Some("c-9"), &input)).unwrap();

        assert_eq!(value["id"], "c-9");
        assert_eq!(value["email"], "ahmed@example.com");
    }
}
