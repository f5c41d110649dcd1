//! # Stock Movement Endpoints
//!
//! Read-only view of the server-maintained stock ledger. Movements are
//! written by the backend as a side effect of orders, restocks, and
//! manual adjustments; the client only lists them.

use tracing::debug;

use dukkan_core::types::{ListQuery, StockMovement};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

/// Typed access to the `/StockMovement` controller.
#[derive(Debug, Clone)]
pub struct StockApi {
    gateway: ApiGateway,
}

impl StockApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches one page of the ledger, newest first.
    ///
    /// Search matches product names and invoice numbers; the date
    /// filters in `query` bound the movement timestamp.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<StockMovement>> {
        debug!(page = query.page_num, "Fetching stock movements");
        self.gateway
            .get_page("/StockMovement/getallstockmovements", query)
            .await
    }
}
