//! Suppliers screen view-model.

use dukkan_api::{ApiGateway, SupplierInput, SuppliersApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::Supplier;

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

#[derive(Clone)]
pub struct SuppliersScreen {
    list: ListScreen<Supplier>,
    api: SuppliersApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl SuppliersScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = SuppliersApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::new(),
            Scope::Suppliers,
            &invalidations,
            notifier.clone(),
        );
        SuppliersScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    pub fn list(&self) -> &ListScreen<Supplier> {
        &self.list
    }

    pub async fn add(&self, input: &SupplierInput) -> bool {
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

    pub async fn update(&self, id: &str, input: &SupplierInput) -> bool {
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
        self.invalidations.publish(Scope::Suppliers);
        self.list.refresh().await;
    }
}
