//! # Order Form
//!
//! Observable draft for the new-invoice dialog. Every edit recomputes the
//! previewed totals instantly through [`dukkan_core::order`]; submission
//! hands the draft to the server, which recomputes everything with
//! authority and answers with the persisted order.
//!
//! ```text
//! add_line / set_quantity / set_discount ──► OrderDraft (pure)
//!                │                               │
//!                │ rejected edits toast,         │ subtotal / final_total
//!                │ draft stays as it was         │ expected_profit
//!                ▼                               ▼
//!            Notifier                     subscribed widgets
//!
//! submit ──► POST /Order/createorder ──► clear draft, fan out scopes
//! ```
//!
//! ## Rules
//!
//! 1. A rejected edit leaves the draft exactly as it was. The stock toast
//!    names the quantity actually available.
//! 2. The client never reconciles its profit preview with the server's
//!    figure. The answer's totals are displayed as received.
//! 3. A failed submit keeps the draft so the user can fix and resend.

use dukkan_api::{ApiGateway, OrdersApi};
use dukkan_core::i18n::{localize_core_error, translate};
use dukkan_core::types::{Order, Product};
use dukkan_core::OrderDraft;
use tracing::info;

use crate::invalidation::InvalidationBus;
use crate::notify::Notifier;
use crate::orders::ORDER_SCOPES;
use crate::store::{Store, Subscription};

/// View-model for the order creation dialog.
#[derive(Clone)]
pub struct OrderFormView {
    store: Store<OrderDraft>,
    api: OrdersApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl OrderFormView {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        OrderFormView {
            store: Store::new(OrderDraft::new()),
            api: OrdersApi::new(gateway),
            invalidations,
            notifier,
        }
    }

    /// Snapshot of the draft, totals included.
    pub fn draft(&self) -> OrderDraft {
        self.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&OrderDraft) + Send + Sync + 'static,
    ) -> Subscription<OrderDraft> {
        self.store.subscribe(listener)
    }

    /// Adds `quantity` of `product`, optionally at a bargained price.
    ///
    /// Returns `false` and toasts when stock or limits block the line.
    pub fn add_line(&self, product: &Product, quantity: i64, custom_price: Option<f64>) -> bool {
        let added = self
            .store
            .try_update(|d| d.add_line(product, quantity, custom_price).map(|_| ()));
        match added {
            Ok(()) => true,
            Err(error) => {
                self.notifier.error(localize_core_error(&error));
                false
            }
        }
    }

    pub fn remove_line(&self, line_id: &str) {
        self.store.update(|d| d.remove_line(line_id));
    }

    /// Changes a line's quantity, checked against the stock on screen.
    /// Quantity zero removes the line.
    pub fn set_quantity(&self, line_id: &str, quantity: i64, available_stock: i64) -> bool {
        let changed = self
            .store
            .try_update(|d| d.set_quantity(line_id, quantity, available_stock));
        match changed {
            Ok(()) => true,
            Err(error) => {
                self.notifier.error(localize_core_error(&error));
                false
            }
        }
    }

    /// Sets the order discount. Values outside [0, 100] are rejected and
    /// the previous discount stays.
    pub fn set_discount(&self, percent: f64) -> bool {
        match self.store.try_update(|d| d.set_discount(percent)) {
            Ok(()) => true,
            Err(error) => {
                self.notifier.error(localize_core_error(&error));
                false
            }
        }
    }

    pub fn set_customer(&self, customer_id: Option<String>) {
        self.store.update(|d| d.set_customer(customer_id));
    }

    pub fn set_notes(&self, notes: Option<String>) {
        self.store
            .update(|d| d.notes = notes.filter(|n| !n.trim().is_empty()));
    }

    /// Discards the draft, e.g. when the dialog closes.
    pub fn clear(&self) {
        self.store.update(|d| d.clear());
    }

    /// Submits the draft.
    ///
    /// On success the draft clears, the affected scopes are invalidated
    /// and the persisted order comes back with the server's authoritative
    /// totals. On failure the draft stays for another attempt.
    pub async fn submit(&self) -> Option<Order> {
        let draft = self.store.get_state();
        if let Err(error) = draft.validate_for_submit() {
            self.notifier.error(localize_core_error(&error));
            return None;
        }

        match self.api.create(&draft.to_request()).await {
            Ok((order, message)) => {
                info!(id = %order.id, total = order.total, "Order submitted");
                self.notifier.success(translate(&message));
                self.store.update(|d| d.clear());
                self.invalidations.publish_all(&ORDER_SCOPES);
                Some(order)
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
