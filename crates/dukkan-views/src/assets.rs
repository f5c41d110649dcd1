//! Fixed assets register. Creating and editing go through
//! [`crate::asset_form`], which owns the depreciation lock; this screen
//! lists and deletes. Asset changes move the net-profit figures, so the
//! dashboard and the reports are invalidated with the register.

use dukkan_api::{ApiGateway, FixedAssetsApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::FixedAsset;

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

pub(crate) const ASSET_SCOPES: [Scope; 3] = [Scope::FixedAssets, Scope::Dashboard, Scope::Reports];

#[derive(Clone)]
pub struct AssetsScreen {
    list: ListScreen<FixedAsset>,
    api: FixedAssetsApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl AssetsScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = FixedAssetsApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::new(),
            Scope::FixedAssets,
            &invalidations,
            notifier.clone(),
        );
        AssetsScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    pub fn list(&self) -> &ListScreen<FixedAsset> {
        &self.list
    }

    pub async fn delete(&self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(message) => {
                self.notifier.success(translate(&message));
                self.list.invalidate().await;
                self.invalidations.publish_all(&ASSET_SCOPES);
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
