//! # Notes Screen
//!
//! Sticky notes with completion toggles. Notes can also be pinned to a
//! customer; the customer dialog reads those through [`NotesScreen::for_customer`].

use dukkan_api::{ApiGateway, NotesApi};
use dukkan_core::i18n::translate;
use dukkan_core::types::Note;

use crate::invalidation::{InvalidationBus, Scope};
use crate::list_screen::ListScreen;
use crate::list_state::ListState;
use crate::notify::Notifier;

#[derive(Clone)]
pub struct NotesScreen {
    list: ListScreen<Note>,
    api: NotesApi,
    invalidations: InvalidationBus,
    notifier: Notifier,
}

impl NotesScreen {
    pub fn new(gateway: ApiGateway, invalidations: InvalidationBus, notifier: Notifier) -> Self {
        let api = NotesApi::new(gateway);
        let fetch_api = api.clone();
        let list = ListScreen::new(
            move |query| {
                let api = fetch_api.clone();
                async move { api.list(&query).await }
            },
            ListState::new(),
            Scope::Notes,
            &invalidations,
            notifier.clone(),
        );
        NotesScreen {
            list,
            api,
            invalidations,
            notifier,
        }
    }

    pub fn list(&self) -> &ListScreen<Note> {
        &self.list
    }

    /// Notes pinned to one customer, for the customer-details dialog.
    ///
    /// Failures surface as a toast and an empty list.
    pub async fn for_customer(&self, customer_id: &str) -> Vec<Note> {
        match self.api.for_customer(customer_id).await {
            Ok(notes) => notes,
            Err(error) => {
                self.notifier.error(error.user_message());
                Vec::new()
            }
        }
    }

    pub async fn add(&self, content: &str, customer_id: Option<&str>) -> bool {
        match self.api.add(content, customer_id).await {
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

    pub async fn update(&self, id: &str, content: &str) -> bool {
        match self.api.update(id, content).await {
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

    /// Flips a note between open and completed.
    pub async fn toggle_completion(&self, id: &str) -> bool {
        match self.api.toggle_completion(id).await {
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
        self.invalidations.publish(Scope::Notes);
        self.list.refresh().await;
    }
}
