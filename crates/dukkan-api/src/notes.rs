//! # Note Endpoints
//!
//! Remote operations for notes. A note is free text, optionally pinned to a
//! customer, with a completion flag the operator toggles from the list.

use serde::Serialize;
use tracing::debug;

use dukkan_core::types::{ListQuery, Note};
use dukkan_core::validation::validate_note_content;

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
}

/// Remote API for notes.
#[derive(Debug, Clone)]
pub struct NotesApi {
    gateway: ApiGateway,
}

impl NotesApi {
    pub fn new(gateway: ApiGateway) -> Self {
        NotesApi { gateway }
    }

    /// Fetches one page of notes.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Note>> {
        self.gateway.get_page("/Note/getallnotes", query).await
    }

    /// Fetches every note pinned to one customer.
    pub async fn for_customer(&self, customer_id: &str) -> ApiResult<Vec<Note>> {
        self.gateway
            .get_json(&format!("/Note/customer/{customer_id}"))
            .await
    }

    /// Creates a note, optionally pinned to a customer.
    pub async fn add(
        &self,
        content: &str,
        customer_id: Option<&str>,
    ) -> ApiResult<(Note, String)> {
        let content = validate_note_content(content)?;
        debug!(chars = content.len(), "Adding note");
        self.gateway
            .post_json(
                "/Note/addnote",
                &NotePayload {
                    id: None,
                    content: &content,
                    customer_id,
                },
            )
            .await
    }

    /// Rewrites a note's text. The backend acknowledges with a boolean.
    pub async fn update(&self, id: &str, content: &str) -> ApiResult<String> {
        let content = validate_note_content(content)?;
        debug!(%id, "Updating note");
        let (_, message): (bool, String) = self
            .gateway
            .patch_json(
                "/Note/updatenote",
                &NotePayload {
                    id: Some(id),
                    content: &content,
                    customer_id: None,
                },
            )
            .await?;
        Ok(message)
    }

    /// Flips the completion flag.
    pub async fn toggle_completion(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Toggling note completion");
        self.gateway
            .patch_message(&format!("/Note/togglecompletion/{id}"))
            .await
    }

    /// Deletes a note.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting note");
        self.gateway.delete_message(&format!("/Note/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = NotePayload {
            id: None,
            content: "متابعة طلب أحمد يوم الخميس",
            customer_id: Some("c-2"),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["content"], "متابعة طلب أحمد يوم الخميس");
        assert_eq!(value["customerId"], "c-2");
        assert!(value.get("id").is_none());
    }
}
