//! # Products Screen
//!
//! Paginated product catalog with image upload on create and update.
//! Stock levels on this screen belong to the server; order mutations
//! elsewhere invalidate it through [`Scope::Products`].

use dukkan_api::{ApiGateway, ImageUpload, ProductInput, ProductsApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::Product;
use tracing::info;

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

/// View-model for the products table and its dialogs.
#[derive(Clone)]
pub struct ProductsScreen {
    list: ListScreen<Product>,
    api: ProductsApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl ProductsScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = ProductsApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::new(),
            Scope::Products,
            &invalidations,
            notifier.clone(),
        );
        ProductsScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    /// The paginated table under this screen.
    pub fn list(&self) -> &ListScreen<Product> {
        &self.list
    }

    /// Creates a product. Returns whether the list was refreshed.
    pub async fn add(&self, input: &ProductInput, image: Option<ImageUpload>) -> bool {
        match self.api.add(input, image).await {
            Ok((product, message)) => {
                info!(id = %product.id, "Product created");
                self.after_change(&message).await;
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }

    /// Updates a product. A `None` image keeps the stored one.
    pub async fn update(
        &self,
        id: &str,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> bool {
        match self.api.update(id, input, image).await {
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

    /// Toast, invalidate, broadcast, then show the fresh page.
    async fn after_change(&self, message: &str) {
        self.notifier.success(translate(message));
        self.list.invalidate().await;
        self.invalidations.publish(Scope::Products);
        self.list.refresh().await;
    }
}
