//! # Reports Endpoint
//!
//! Single fetch backing the profit-and-loss reports screen. Revenue,
//! profit, expenses and the margin are all aggregated server-side; the
//! client renders the five figures as received.

use tracing::debug;

use dukkan_core::types::ReportData;

use crate::client::ApiGateway;
use crate::error::ApiResult;

/// Typed access to the reports summary endpoint.
#[derive(Debug, Clone)]
pub struct ReportsApi {
    gateway: ApiGateway,
}

impl ReportsApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches the profit-and-loss summary in one round trip.
    pub async fn get(&self) -> ApiResult<ReportData> {
        debug!("Fetching report summary");
        self.gateway.get_json("/reports/summary").await
    }
}
