//! # Orders Screen
//!
//! Invoice history, filtered to the current month by default. Creating
//! orders lives in [`crate::order_form`]; this screen lists, opens and
//! deletes them.
//!
//! Deleting an order restocks its items and rewrites the financials on
//! the server, so the invalidation fans out to products, stock movements,
//! the dashboard and the reports alongside the orders list itself.

use dukkan_api::{ApiGateway, OrdersApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::{FilterType, Order};

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

/// Every scope an order mutation touches on the server.
pub(crate) const ORDER_SCOPES: [Scope; 5] = [
    Scope::Orders,
    Scope::Dashboard,
    Scope::Reports,
    Scope::Products,
    Scope::StockMovements,
];

#[derive(Clone)]
pub struct OrdersScreen {
    list: ListScreen<Order>,
    api: OrdersApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl OrdersScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = OrdersApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::with_filter(FilterType::ThisMonth),
            Scope::Orders,
            &invalidations,
            notifier.clone(),
        );
        OrdersScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    pub fn list(&self) -> &ListScreen<Order> {
        &self.list
    }

    /// Full order with its line items, for the details dialog.
    pub async fn details(&self, id: &str) -> Option<Order> {
        match self.api.get_by_id(id).await {
            Ok(order) => Some(order),
            Err(error) => {
                self.notifier.error(error.user_message());
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(message) => {
                self.notifier.success(translate(&message));
                self.list.invalidate().await;
                self.invalidations.publish_all(&ORDER_SCOPES);
                self.list.refresh().await;
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }
}
