//! # Fixed Asset Endpoints
//!
//! CRUD for long-lived equipment tracked on the assets page. The server
//! owns the depreciation schedule: it derives `monthlyDepreciation` from
//! cost and useful life at creation time and accrues
//! `accumulatedDepreciation` on its own clock. The client never sends
//! either figure; [`dukkan_core::depreciation`] exists only to preview
//! the monthly charge in the form before submission.
//!
//! Once accrual has started the server rejects cost and lifetime edits,
//! so callers should check [`FixedAsset::schedule_locked`] before
//! offering an edit form at all.
//!
//! [`FixedAsset::schedule_locked`]: dukkan_core::types::FixedAsset::schedule_locked

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use dukkan_core::types::{FixedAsset, ListQuery};
use dukkan_core::validation::{validate_name, validate_positive_amount, validate_useful_life_months};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

// ============================================================================
// Form Input
// ============================================================================

/// Asset fields collected from the form, validated before hitting the wire.
#[derive(Debug, Clone)]
pub struct AssetInput {
    pub name: String,
    pub category: Option<String>,
    pub purchase_cost: f64,
    pub purchase_date: NaiveDate,
    pub useful_life_months: u32,
}

impl AssetInput {
    /// Checks the fields the server would reject anyway.
    ///
    /// ## Rules
    /// - `name` is required
    /// - `purchase_cost` must be strictly positive
    /// - `useful_life_months` must be at least 1
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        validate_positive_amount(self.purchase_cost, "purchaseCost")?;
        validate_useful_life_months(self.useful_life_months)?;
        Ok(())
    }
}

// ============================================================================
// Wire Payload
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    purchase_cost: f64,
    purchase_date: String,
    useful_life_months: u32,
}

impl<'a> AssetPayload<'a> {
    fn new(input: &'a AssetInput, id: Option<&'a str>) -> Self {
        Self {
            id,
            name: &input.name,
            category: input.category.as_deref().filter(|c| !c.trim().is_empty()),
            purchase_cost: input.purchase_cost,
            purchase_date: input.purchase_date.format("%Y-%m-%d").to_string(),
            useful_life_months: input.useful_life_months,
        }
    }
}

// ============================================================================
// Endpoint Wrapper
// ============================================================================

/// Typed access to the `/FixedAsset` controller.
#[derive(Debug, Clone)]
pub struct FixedAssetsApi {
    gateway: ApiGateway,
}

impl FixedAssetsApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches one page of assets.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<FixedAsset>> {
        debug!(page = query.page_num, "Fetching fixed assets");
        self.gateway
            .get_page("/FixedAsset/getallfixedassets", query)
            .await
    }

    /// Fetches a single asset by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<FixedAsset> {
        debug!(%id, "Fetching fixed asset");
        self.gateway.get_json(&format!("/FixedAsset/{id}")).await
    }

    /// Registers a new asset and returns it with the server-derived
    /// depreciation schedule, plus the server's confirmation message.
    pub async fn add(&self, input: &AssetInput) -> ApiResult<(FixedAsset, String)> {
        input.validate()?;
        debug!(name = %input.name, "Adding fixed asset");
        let payload = AssetPayload::new(input, None);
        self.gateway
            .post_json("/FixedAsset/addfixedasset", &payload)
            .await
    }

    /// Updates an asset the server still allows edits on.
    ///
    /// The backend acknowledges updates with a boolean, so only the
    /// confirmation message is surfaced. Assets with accrued
    /// depreciation come back as rejections.
    pub async fn update(&self, id: &str, input: &AssetInput) -> ApiResult<String> {
        input.validate()?;
        debug!(%id, "Updating fixed asset");
        let payload = AssetPayload::new(input, Some(id));
        let (_ok, message): (bool, String) = self
            .gateway
            .patch_json("/FixedAsset/updatefixedasset", &payload)
            .await?;
        Ok(message)
    }

    /// Deletes an asset and returns the server's confirmation message.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting fixed asset");
        self.gateway
            .delete_message(&format!("/FixedAsset/{id}"))
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
