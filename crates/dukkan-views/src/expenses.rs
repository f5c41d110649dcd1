//! # Expenses Screen
//!
//! Date-filtered expense ledger. Expense mutations move the financial
//! summary and the profit-and-loss report, so every change also
//! invalidates [`Scope::Dashboard`] and [`Scope::Reports`].

use dukkan_api::{ApiGateway, ExpenseInput, ExpensesApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::{Expense, FilterType};

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

#[derive(Clone)]
pub struct ExpensesScreen {
    list: ListScreen<Expense>,
    api: ExpensesApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl ExpensesScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = ExpensesApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::with_filter(FilterType::ThisMonth),
            Scope::Expenses,
            &invalidations,
            notifier.clone(),
        );
        ExpensesScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    pub fn list(&self) -> &ListScreen<Expense> {
        &self.list
    }

    pub async fn add(&self, input: &ExpenseInput) -> bool {
        match self.api.add(input).await {
            Ok((_, message)) => {
                self.after_change(&message).await;
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }

    pub async fn update(&self, id: &str, input: &ExpenseInput) -> bool {
        match self.api.update(id, input).await {
            Ok(message) => {
                self.after_change(&message).await;
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(message) => {
                self.after_change(&message).await;
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }

    async fn after_change(&self, message: &str) {
        self.notifier.success(translate(message));
        self.list.invalidate().await;
        self.invalidations
            .publish_all(&[Scope::Expenses, Scope::Dashboard, Scope::Reports]);
        self.list.refresh().await;
    }
}
