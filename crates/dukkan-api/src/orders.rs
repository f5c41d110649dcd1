//! # Order Endpoints
//!
//! Remote operations for orders.
//!
//! ## Who Computes What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Totals Ownership                              │
//! │                                                                         │
//! │  CLIENT (dukkan-core::order)          SERVER (authoritative)           │
//! │  ───────────────────────────          ──────────────────────           │
//! │  draft line totals, subtotal,         the stored Order: subtotal,      │
//! │  discounted total, expected           total, and PROFIT as recorded    │
//! │  profit - all preview only            against real buying prices       │
//! │                                                                         │
//! │  The created Order returned here replaces every client-side preview.   │
//! │  If the two disagree, the server number is displayed.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use dukkan_core::order::CreateOrderRequest;
use dukkan_core::types::{ListQuery, Order};

use crate::client::ApiGateway;
use crate::envelope::Page;
use crate::error::ApiResult;

/// Remote API for orders.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    gateway: ApiGateway,
}

impl OrdersApi {
    pub fn new(gateway: ApiGateway) -> Self {
        OrdersApi { gateway }
    }

    /// Fetches one page of orders.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Order>> {
        self.gateway.get_page("/Order/getallorders", query).await
    }

    /// Fetches a single order by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Order> {
        self.gateway.get_json(&format!("/Order/{id}")).await
    }

    /// Submits a draft, returning the stored order and the server message.
    ///
    /// The returned [`Order`] carries the authoritative totals and profit.
    pub async fn create(&self, request: &CreateOrderRequest) -> ApiResult<(Order, String)> {
        debug!(lines = request.order_items.len(), "Creating order");
        self.gateway.post_json("/Order/createorder", request).await
    }

    /// Deletes an order.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting order");
        self.gateway.delete_message(&format!("/Order/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::credentials::CredentialStore;
    use axum::extract::State;
    use axum::routing::post;
    use axum::{Json, Router};
    use dukkan_core::order::OrderDraft;
    use dukkan_core::types::Product;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn product(id: &str, selling: f64, buying: f64, stock: i64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            buying_price: buying,
            selling_price: selling,
            stock,
            image_url: None,
            description: None,
            supplier_id: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_sends_draft_and_decodes_server_order() {
        type Captured = Arc<Mutex<Option<serde_json::Value>>>;

        async fn capture(
            State(captured): State<Captured>,
            Json(body): Json<serde_json::Value>,
        ) -> Json<serde_json::Value> {
            *captured.lock().await = Some(body);
            Json(serde_json::json!({
                "isSuccess": true,
                "message": "Order created successfully.",
                "data": {
                    "id": "o-1",
                    "orderNumber": "ORD-0001",
                    "customerId": null,
                    "customerName": null,
                    "items": [{
                        "productId": "p-1",
                        "productName": "Product p-1",
                        "quantity": 2,
                        "buyingPrice": 10.0,
                        "sellingPrice": 15.0,
                        "total": 30.0,
                        "profit": 10.0
                    }],
                    "subtotal": 30.0,
                    "tax": 0.0,
                    "discount": 10.0,
                    "total": 27.0,
                    "profit": 9.5,
                    "status": "completed",
                    "createdAt": "2024-01-15T10:00:00Z"
                },
                "errors": [],
            }))
        }

        let captured: Captured = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route("/api/Order/createorder", post(capture))
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let mut config = ClientConfig::default();
        config.api.url = format!("http://{addr}/api");
        let gateway = ApiGateway::new(&config, CredentialStore::in_memory()).unwrap();

        // Build the request the way the order screen does
        let mut draft = OrderDraft::default();
        draft.add_line(&product("p-1", 15.0, 10.0, 50), 2, None).unwrap();
        draft.set_discount(10.0).unwrap();
        let request = draft.to_request();

        let api = OrdersApi::new(gateway);
        let (order, message) = api.create(&request).await.unwrap();

        // Server numbers come back as-is, including the profit it recorded
        assert_eq!(order.order_number, "ORD-0001");
        assert_eq!(order.total, 27.0);
        assert_eq!(order.profit, 9.5);
        assert_eq!(message, "Order created successfully.");

        // And the body that went out was the camelCase draft shape
        let body = captured.lock().await.clone().unwrap();
        assert_eq!(body["discount"], 10.0);
        assert_eq!(body["orderItems"][0]["productId"], "p-1");
        assert_eq!(body["orderItems"][0]["quantity"], 2);
        assert!(body["orderItems"][0].get("customItemPrice").is_none());
    }
}
