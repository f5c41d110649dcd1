//! # Response Envelope
//!
//! Every backend endpoint answers with the same JSON wrapper:
//!
//! ```json
//! {
//!   "isSuccess": true,
//!   "message": "Products retrieved successfully",
//!   "data": { ... },
//!   "errors": []
//! }
//! ```
//!
//! ## Decoding Rules
//! - `isSuccess` is authoritative. A 200 with `isSuccess: false` is a
//!   rejection, never a success.
//! - `data` is only trusted when `isSuccess` is true; a success without data
//!   is a server bug surfaced as [`ApiError::MissingData`].
//! - List endpoints nest a [`Page`] inside `data` rather than a bare array.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Envelope
// =============================================================================

/// The backend's uniform response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded. Checked even on HTTP 2xx.
    pub is_success: bool,

    /// Human-readable outcome (English, translated client-side).
    #[serde(default)]
    pub message: String,

    /// The payload. Present on success, usually absent on failure.
    pub data: Option<T>,

    /// Field-level error detail on failure.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, turning envelope-level failure into [`ApiError`].
    ///
    /// `endpoint` only feeds the missing-data diagnostic.
    pub fn into_result(self, endpoint: &str) -> ApiResult<T> {
        self.into_parts(endpoint).map(|(data, _)| data)
    }

    /// Unwraps the payload together with the server message.
    ///
    /// Mutations surface the message as a toast, so both halves matter.
    pub fn into_parts(self, endpoint: &str) -> ApiResult<(T, String)> {
        let ApiEnvelope {
            is_success,
            message,
            data,
            errors,
        } = self;

        if !is_success {
            return Err(ApiError::Rejected { message, errors });
        }
        match data {
            Some(data) => Ok((data, message)),
            None => Err(ApiError::MissingData {
                endpoint: endpoint.to_string(),
            }),
        }
    }

    /// Unwraps an envelope whose only useful payload is the message itself.
    ///
    /// Deletes and similar acknowledgement-only endpoints answer with
    /// `data: null`, so the message is the result.
    pub fn into_message(self) -> ApiResult<String> {
        if !self.is_success {
            return Err(ApiError::Rejected {
                message: self.message,
                errors: self.errors,
            });
        }
        Ok(self.message)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a list endpoint's results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows on this page.
    pub items: Vec<T>,

    /// 1-based page number this answer covers.
    pub current_page: u32,

    /// Requested page size.
    pub page_size: u32,

    /// Total pages available for the current filter.
    pub total_pages: u32,

    /// Total matching rows across all pages.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Maps the row type, keeping the paging numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }

    /// Returns true when no rows matched at all.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            items: Vec::new(),
            current_page: dukkan_core::types::DEFAULT_PAGE_NUM,
            page_size: dukkan_core::types::DEFAULT_PAGE_SIZE,
            total_pages: 1,
            total_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: i32,
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let env: ApiEnvelope<Payload> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "ok", "data": {"value": 7}, "errors": []}"#,
        )
        .unwrap();

        let payload = env.into_result("/test").unwrap();
        assert_eq!(payload, Payload { value: 7 });
    }

    #[test]
    fn test_rejection_carries_message_and_errors() {
        let env: ApiEnvelope<Payload> = serde_json::from_str(
            r#"{"isSuccess": false, "message": "Stock unavailable", "data": null,
                "errors": ["quantity exceeds stock"]}"#,
        )
        .unwrap();

        match env.into_result("/test") {
            Err(ApiError::Rejected { message, errors }) => {
                assert_eq!(message, "Stock unavailable");
                assert_eq!(errors, vec!["quantity exceeds stock".to_string()]);
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_data_is_missing_data() {
        let env: ApiEnvelope<Payload> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "ok", "data": null, "errors": []}"#,
        )
        .unwrap();

        match env.into_result("/test") {
            Err(ApiError::MissingData { endpoint }) => assert_eq!(endpoint, "/test"),
            other => panic!("expected MissingData, got {:?}", other),
        }
    }

    #[test]
    fn test_into_parts_keeps_the_message() {
        let env: ApiEnvelope<Payload> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "Order created successfully",
                "data": {"value": 3}, "errors": []}"#,
        )
        .unwrap();

        let (payload, message) = env.into_parts("/Order/createorder").unwrap();
        assert_eq!(payload.value, 3);
        assert_eq!(message, "Order created successfully");
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        // Some endpoints omit `errors` entirely
        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"isSuccess": true, "data": {"value": 1}}"#).unwrap();
        assert!(env.errors.is_empty());
        assert!(env.message.is_empty());
    }

    #[test]
    fn test_into_message_for_acknowledgement_endpoints() {
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"isSuccess": true, "message": "Product deleted successfully", "data": null}"#,
        )
        .unwrap();
        assert_eq!(env.into_message().unwrap(), "Product deleted successfully");

        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"isSuccess": false, "message": "Product not found", "data": null}"#,
        )
        .unwrap();
        assert!(env.into_message().is_err());
    }

    #[test]
    fn test_page_wire_names() {
        let page: Page<Payload> = serde_json::from_str(
            r#"{"items": [{"value": 1}, {"value": 2}],
                "currentPage": 2, "pageSize": 50, "totalPages": 3, "totalCount": 130}"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 130);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_default_page_is_empty() {
        let page: Page<Payload> = Page::default();
        assert!(page.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }
}
