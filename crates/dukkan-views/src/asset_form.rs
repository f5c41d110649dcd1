//! # Fixed Asset Form
//!
//! Draft for the asset dialog with the straight-line preview and the
//! depreciation lock. The server posts the schedule; the moment any
//! depreciation has accumulated, cost and useful life freeze on the
//! client so the user cannot draft an edit the server would refuse.
//!
//! ## Rules
//!
//! 1. `monthly_preview` is `cost / months`, recomputed on every edit.
//! 2. On a locked draft, `set_cost` and `set_useful_life_months` fail
//!    with the depreciation-lock toast and change nothing. Name and
//!    category edits stay allowed.
//! 3. Submit routes to create or update depending on whether the draft
//!    came from an existing asset.

use chrono::{NaiveDate, Utc};
use dukkan_api::{ApiGateway, AssetInput, FixedAssetsApi};
use dukkan_core::depreciation::{is_locked, preview_monthly, useful_life_years};
use dukkan_core::error::{CoreError, CoreResult};
use dukkan_core::i18n::{localize_core_error, translate};
use dukkan_core::types::FixedAsset;

use crate::assets::ASSET_SCOPES;
use crate::invalidation::InvalidationBus;
use crate::notify::Notifier;
use crate::store::{Store, Subscription};

// =============================================================================
// Draft
// =============================================================================

/// Editable asset fields plus the lock carried from the stored asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDraft {
    /// Present when editing an existing asset.
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub purchase_cost: f64,
    pub purchase_date: NaiveDate,
    pub useful_life_months: u32,
    /// Depreciation the server has posted so far. Any positive amount
    /// freezes cost and life.
    pub accumulated_depreciation: f64,
}

impl AssetDraft {
    /// Blank draft dated today.
    pub fn for_new() -> Self {
        AssetDraft {
            id: None,
            name: String::new(),
            category: None,
            purchase_cost: 0.0,
            purchase_date: Utc::now().date_naive(),
            useful_life_months: 12,
            accumulated_depreciation: 0.0,
        }
    }

    /// Draft seeded from a stored asset.
    pub fn for_edit(asset: &FixedAsset) -> Self {
        AssetDraft {
            id: Some(asset.id.clone()),
            name: asset.name.clone(),
            category: asset.category.clone(),
            purchase_cost: asset.purchase_cost,
            purchase_date: asset.purchase_date,
            useful_life_months: asset.useful_life_months,
            accumulated_depreciation: asset.accumulated_depreciation,
        }
    }

    /// The schedule has started and the financial fields are frozen.
    pub fn locked(&self) -> bool {
        is_locked(self.accumulated_depreciation)
    }

    fn lock_error(&self) -> CoreError {
        CoreError::DepreciationLocked {
            accumulated: self.accumulated_depreciation,
        }
    }

    /// Changes the cost unless the schedule is locked.
    pub fn set_cost(&mut self, cost: f64) -> CoreResult<()> {
        if self.locked() {
            return Err(self.lock_error());
        }
        self.purchase_cost = cost;
        Ok(())
    }

    /// Changes the useful life unless the schedule is locked.
    pub fn set_useful_life_months(&mut self, months: u32) -> CoreResult<()> {
        if self.locked() {
            return Err(self.lock_error());
        }
        self.useful_life_months = months;
        Ok(())
    }

    /// Monthly depreciation the server will post, previewed.
    pub fn monthly_preview(&self) -> CoreResult<f64> {
        preview_monthly(self.purchase_cost, self.useful_life_months)
    }

    /// Useful life in years, for the hint under the months input.
    pub fn life_in_years(&self) -> f64 {
        useful_life_years(self.useful_life_months)
    }

    fn to_input(&self) -> AssetInput {
        AssetInput {
            name: self.name.clone(),
            category: self.category.clone(),
            purchase_cost: self.purchase_cost,
            purchase_date: self.purchase_date,
            useful_life_months: self.useful_life_months,
        }
    }
}

// =============================================================================
// Form View
// =============================================================================

/// View-model for the asset create/edit dialog.
#[derive(Clone)]
pub struct AssetFormView {
    store: Store<AssetDraft>,
    api: FixedAssetsApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl AssetFormView {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        AssetFormView {
            store: Store::new(AssetDraft::for_new()),
            api: FixedAssetsApi::new(gateway),
            invalidations,
            notifier,
        }
    }

    /// Resets the form for a new asset.
    pub fn open_new(&self) {
        self.store.update(|d| *d = AssetDraft::for_new());
    }

    /// Loads a stored asset into the form, lock included.
    pub fn open_edit(&self, asset: &FixedAsset) {
        let draft = AssetDraft::for_edit(asset);
        self.store.update(|d| *d = draft);
    }

    pub fn draft(&self) -> AssetDraft {
        self.store.get_state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&AssetDraft) + Send + Sync + 'static,
    ) -> Subscription<AssetDraft> {
        self.store.subscribe(listener)
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.store.update(|d| d.name = name);
    }

    pub fn set_category(&self, category: Option<String>) {
        self.store
            .update(|d| d.category = category.filter(|c| !c.trim().is_empty()));
    }

    pub fn set_purchase_date(&self, date: NaiveDate) {
        self.store.update(|d| d.purchase_date = date);
    }

    /// Edits the cost. Toasts and returns `false` on a locked schedule.
    pub fn set_cost(&self, cost: f64) -> bool {
        match self.store.try_update(|d| d.set_cost(cost)) {
            Ok(()) => true,
            Err(error) => {
                self.notifier.error(localize_core_error(&error));
                false
            }
        }
    }

    /// Edits the useful life. Toasts and returns `false` on a locked
    /// schedule.
    pub fn set_useful_life_months(&self, months: u32) -> bool {
        match self.store.try_update(|d| d.set_useful_life_months(months)) {
            Ok(()) => true,
            Err(error) => {
                self.notifier.error(localize_core_error(&error));
                false
            }
        }
    }

    /// Creates or updates the asset, depending on the draft's origin.
    ///
    /// The owning register screen hears [`crate::invalidation::Scope::FixedAssets`]
    /// and refetches on its next refresh.
    pub async fn submit(&self) -> bool {
        let draft = self.draft();
        let input = draft.to_input();

        let outcome = match &draft.id {
            Some(id) => self.api.update(id, &input).await,
            None => self.api.add(&input).await.map(|(_, message)| message),
        };

        match outcome {
            Ok(message) => {
                self.notifier.success(translate(&message));
                self.invalidations.publish_all(&ASSET_SCOPES);
                self.store.update(|d| *d = AssetDraft::for_new());
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
