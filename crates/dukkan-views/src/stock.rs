//! Stock movement ledger. Read-only; the server writes the ledger as a
//! side effect of orders and manual adjustments. Opens on the current
//! month like the rest of the movement views.

use dukkan_api::{ApiGateway, StockApi};
use dukkan_core::types::{FilterType, StockMovement};

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

#[derive(Clone)]
pub struct StockScreen {
    list: ListScreen<StockMovement>,
}

impl StockScreen {
    pub fn new(gateway: ApiGateway, invalidations: &InvalidationBus, notifier: Notifier) -> Self {
        let api = StockApi::new(gateway);
        let list = ListScreen::new(
            move |query| {
                let api = api.clone();
                async move { api.list(&query).await }
            },
            ListState::with_filter(FilterType::ThisMonth),
            Scope::StockMovements,
            invalidations,
            notifier,
        );
        StockScreen { list }
    }

    pub fn list(&self) -> &ListScreen<StockMovement> {
        &self.list
    }
}
