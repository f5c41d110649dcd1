//! # Dashboard Endpoint
//!
//! Single fetch backing the home screen. All aggregation (sales totals,
//! profit, cash position, low-stock counts) happens server-side, so the
//! client gets one ready-to-render payload instead of stitching numbers
//! together from the entity endpoints.

use tracing::debug;

use dukkan_core::types::DashboardData;

use crate::client::ApiGateway;
use crate::error::ApiResult;

/// Typed access to the `/Dashboard` controller.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    gateway: ApiGateway,
}

impl DashboardApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches the metrics and financial summary in one round trip.
    pub async fn get(&self) -> ApiResult<DashboardData> {
        debug!("Fetching dashboard data");
        self.gateway.get_json("/Dashboard/getdashboarddata").await
    }
}
