//! # Supplier Endpoints
//!
//! Remote operations for suppliers. Same JSON conventions as customers:
//! optional fields are dropped from the payload rather than sent empty.

use serde::Serialize;
use tracing::debug;

use dukkan_core::types::{ListQuery, Supplier};
use dukkan_core::validation::{validate_email, validate_name};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

/// Fields the operator fills in when creating or editing a supplier.
#[derive(Debug, Clone, Default)]
pub struct SupplierInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl SupplierInput {
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        if let Some(email) = self.email.as_deref() {
            if !email.trim().is_empty() {
                validate_email(email)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SupplierPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> SupplierPayload<'a> {
    fn new(id: Option<&'a str>, input: &'a SupplierInput) -> Self {
        SupplierPayload {
            id,
            name: input.name.trim(),
            phone: input.phone.as_deref(),
            email: input
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty()),
            address: input.address.as_deref(),
            company: input.company.as_deref(),
            notes: input.notes.as_deref(),
        }
    }
}

/// Remote API for suppliers.
#[derive(Debug, Clone)]
pub struct SuppliersApi {
    gateway: ApiGateway,
}

impl SuppliersApi {
    pub fn new(gateway: ApiGateway) -> Self {
        SuppliersApi { gateway }
    }

    /// Fetches one page of suppliers.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Supplier>> {
        self.gateway
            .get_page("/Supplier/getallsuppliers", query)
            .await
    }

    /// Fetches a single supplier by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Supplier> {
        self.gateway.get_json(&format!("/Supplier/{id}")).await
    }

    /// Creates a supplier, returning it with the server message.
    pub async fn add(&self, input: &SupplierInput) -> ApiResult<(Supplier, String)> {
        debug!(name = %input.name, "Adding supplier");
        input.validate()?;
        self.gateway
            .post_json("/Supplier/addsupplier", &SupplierPayload::new(None, input))
            .await
    }

    /// Updates a supplier. The backend acknowledges with a boolean.
    pub async fn update(&self, id: &str, input: &SupplierInput) -> ApiResult<String> {
        debug!(%id, "Updating supplier");
        input.validate()?;
        let (_, message): (bool, String) = self
            .gateway
            .patch_json(
                "/Supplier/updatesupplier",
                &SupplierPayload::new(Some(id), input),
            )
            .await?;
        Ok(message)
    }

    /// Deletes a supplier.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting supplier");
        self.gateway.delete_message(&format!("/Supplier/{id}")).await
    }
}
